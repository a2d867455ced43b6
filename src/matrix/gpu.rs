//! Умножение матриц на GPU

use super::kernels::KERNEL_NAME;
use crate::opencl::types::cl_uint;
use crate::opencl::{Buffer, CommandQueue, Context, Device, Program};
use anyhow::{ensure, Context as _, Result};
use tracing::{debug, info};

/// Контекст и очередь команд на первом найденном GPU
pub struct GpuMatrixMultiplier {
    // Очередь объявлена первой: освобождается раньше контекста
    queue: CommandQueue,
    context: Context,
}

impl GpuMatrixMultiplier {
    pub fn new() -> Result<Self> {
        let device = Device::first_gpu().context("Failed to find an OpenCL GPU device")?;
        info!(
            platform = %device.platform_name().unwrap_or_default(),
            device = %device.name().unwrap_or_default(),
            "выбрано устройство OpenCL"
        );

        let context = Context::new(device).context("Failed to create context")?;
        let queue = CommandQueue::new(&context).context("Failed to create command queue")?;
        Ok(Self { queue, context })
    }

    pub fn device(&self) -> &Device {
        self.context.device()
    }

    /// Перемножает две матрицы `size x size`, компилируя ядро из `source`
    pub fn multiply(&self, source: &str, a: &[f32], b: &[f32], size: usize) -> Result<Vec<f32>> {
        let (matrix_elements, size_arg) = validate_inputs(a, b, size)?;

        let a_buffer = Buffer::from_slice(&self.context, a).context("Failed to create buffer A")?;
        let b_buffer = Buffer::from_slice(&self.context, b).context("Failed to create buffer B")?;
        let c_buffer = Buffer::<f32>::write_only(&self.context, matrix_elements)
            .context("Failed to create buffer C")?;
        debug!(bytes = c_buffer.byte_size(), "буферы созданы");

        let program = Program::build(&self.context, source).context("Failed to build program")?;
        let mut kernel = program
            .create_kernel(KERNEL_NAME)
            .context("Failed to create kernel")?;

        kernel
            .set_arg_buffer(0, &a_buffer)
            .and_then(|()| kernel.set_arg_buffer(1, &b_buffer))
            .and_then(|()| kernel.set_arg_buffer(2, &c_buffer))
            .and_then(|()| kernel.set_arg_scalar(3, size_arg))
            .context("Failed to set kernel arguments")?;

        self.queue
            .enqueue_nd_range(&kernel, &[size, size])
            .context("Failed to enqueue kernel")?;
        self.queue.finish().context("Failed to wait for kernel")?;

        let mut c = vec![0.0f32; matrix_elements];
        self.queue
            .read_buffer(&c_buffer, &mut c)
            .context("Failed to read buffer C")?;
        debug!(kernel = kernel.name(), "результат прочитан");

        Ok(c)
    }
}

/// Проверяет размеры входных матриц; возвращает число элементов и `size` для ядра
fn validate_inputs(a: &[f32], b: &[f32], size: usize) -> Result<(usize, cl_uint)> {
    ensure!(size > 0, "matrix size must be positive");
    let size_arg = cl_uint::try_from(size).context("matrix size does not fit cl_uint")?;
    let matrix_elements = size
        .checked_mul(size)
        .with_context(|| format!("matrix size {size} is too large"))?;
    ensure!(
        a.len() == matrix_elements && b.len() == matrix_elements,
        "expected {} elements per matrix, got {} and {}",
        matrix_elements,
        a.len(),
        b.len()
    );
    Ok((matrix_elements, size_arg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_inputs() {
        let a = vec![1.0f32; 16];
        let b = vec![2.0f32; 16];
        let (elements, size_arg) = validate_inputs(&a, &b, 4).unwrap();
        assert_eq!(elements, 16);
        assert_eq!(size_arg, 4);
    }

    #[test]
    fn test_validate_inputs_rejects_mismatch() {
        let a = vec![1.0f32; 16];
        let err = validate_inputs(&a, &[1.0, 2.0, 3.0], 4).unwrap_err();
        assert!(err.to_string().contains("expected 16 elements per matrix, got 16 and 3"));

        let err = validate_inputs(&[], &[], 0).unwrap_err();
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_validate_inputs_huge_size_is_an_error() {
        let err = validate_inputs(&[], &[], usize::MAX).unwrap_err();
        assert!(err.to_string().contains("matrix size"));

        // Помещается в cl_uint, но size * size переполняет usize на 32-битных целях
        let size = cl_uint::MAX as usize;
        assert!(validate_inputs(&[], &[], size).is_err());
    }
}
