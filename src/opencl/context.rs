//! Контекст и очередь команд OpenCL

use super::bindings::{api, OpenCl};
use super::buffer::Buffer;
use super::callbacks::log_context_error;
use super::device::Device;
use super::error::ClError;
use super::program::Kernel;
use super::types::*;
use std::ffi::c_void;
use std::ptr;
use tracing::{debug, warn};

/// Контекст OpenCL для одного устройства
pub struct Context {
    api: &'static OpenCl,
    raw: cl_context,
    device: Device,
}

impl Context {
    pub fn new(device: Device) -> Result<Self, ClError> {
        let api = api()?;
        let device_id = device.id();
        let raw = cl_create!(
            api,
            clCreateContext(
                ptr::null(),
                1,
                &device_id,
                Some(log_context_error),
                ptr::null_mut()
            )
        )?;
        debug!("создан контекст OpenCL");
        Ok(Self { api, raw, device })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub(crate) fn raw(&self) -> cl_context {
        self.raw
    }

    pub(crate) fn api(&self) -> &'static OpenCl {
        self.api
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        if let Err(e) = cl_check!(self.api, clReleaseContext(self.raw)) {
            warn!(error = %e, "не удалось освободить контекст");
        }
    }
}

/// Очередь команд с последовательным исполнением
pub struct CommandQueue {
    api: &'static OpenCl,
    raw: cl_command_queue,
}

impl CommandQueue {
    pub fn new(context: &Context) -> Result<Self, ClError> {
        let api = context.api();
        let raw = cl_create!(
            api,
            clCreateCommandQueue(context.raw(), context.device().id(), 0)
        )?;
        debug!("создана очередь команд");
        Ok(Self { api, raw })
    }

    /// Ставит ядро в очередь на сетке `global`; размер рабочей группы выбирает runtime
    pub fn enqueue_nd_range(&self, kernel: &Kernel, global: &[usize]) -> Result<(), ClError> {
        cl_check!(
            self.api,
            clEnqueueNDRangeKernel(
                self.raw,
                kernel.raw(),
                global.len() as cl_uint,
                ptr::null(),
                global.as_ptr(),
                ptr::null(),
                0,
                ptr::null(),
                ptr::null_mut()
            )
        )
    }

    /// Ждёт завершения всех команд в очереди
    pub fn finish(&self) -> Result<(), ClError> {
        cl_check!(self.api, clFinish(self.raw))
    }

    /// Блокирующее чтение всего буфера в `out`
    pub fn read_buffer<T: Copy>(&self, buffer: &Buffer<T>, out: &mut [T]) -> Result<(), ClError> {
        if out.len() != buffer.len() {
            return Err(ClError::SizeMismatch {
                expected: buffer.len(),
                actual: out.len(),
            });
        }
        cl_check!(
            self.api,
            clEnqueueReadBuffer(
                self.raw,
                buffer.raw(),
                CL_TRUE,
                0,
                buffer.byte_size(),
                out.as_mut_ptr() as *mut c_void,
                0,
                ptr::null(),
                ptr::null_mut()
            )
        )
    }
}

impl Drop for CommandQueue {
    fn drop(&mut self) {
        if let Err(e) = cl_check!(self.api, clReleaseCommandQueue(self.raw)) {
            warn!(error = %e, "не удалось освободить очередь команд");
        }
    }
}
