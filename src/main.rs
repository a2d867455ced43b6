//! Умножение двух матриц на GPU через OpenCL

use anyhow::Result;
use opencl_matmul::{
    matrix::{
        compare_results, cpu_matrix_multiply, format_matrix, initialize_matrices,
        load_kernel_source, GpuMatrixMultiplier, MatrixType, KERNEL_PATH, MATRIX_SIZE,
    },
    utils::{init_logging, measure_time},
};
use tracing::{info, warn};

const MATRIX_TYPE: MatrixType = MatrixType::Sequential;

fn main() -> Result<()> {
    init_logging();
    info!(size = MATRIX_SIZE, matrix_type = ?MATRIX_TYPE, "умножение матриц на GPU");

    let (a, b) = initialize_matrices(MATRIX_TYPE, MATRIX_SIZE);

    let multiplier = GpuMatrixMultiplier::new()?;
    let device = multiplier.device();
    info!(device = %device.name().unwrap_or_default(), "устройство готово");
    let source = load_kernel_source(KERNEL_PATH)?;

    let (c, gpu_duration) = measure_time(|| multiplier.multiply(&source, &a, &b, MATRIX_SIZE));
    let c = c?;
    info!(?gpu_duration, "GPU вычисления завершены");

    println!("Result matrix C:");
    print!("{}", format_matrix(&c, MATRIX_SIZE));

    let mut cpu_c = vec![0.0f32; MATRIX_SIZE * MATRIX_SIZE];
    let ((), cpu_duration) = measure_time(|| cpu_matrix_multiply(&a, &b, &mut cpu_c, MATRIX_SIZE));
    if compare_results(&c, &cpu_c, MATRIX_SIZE) {
        info!(?cpu_duration, "результаты GPU и CPU совпадают");
    } else {
        warn!("результат GPU не совпадает с CPU эталоном");
    }

    Ok(())
}
