//! Компиляция программ и ядра OpenCL

use super::bindings::OpenCl;
use super::buffer::Buffer;
use super::context::Context;
use super::device::Device;
use super::error::ClError;
use super::types::*;
use super::utils::{query_string, to_c_string};
use std::ffi::{c_char, c_void};
use std::mem::size_of;
use std::ptr;
use tracing::{debug, warn};

/// Программа OpenCL, собранная для устройства контекста
pub struct Program {
    api: &'static OpenCl,
    raw: cl_program,
}

impl Program {
    /// Создаёт программу из исходного кода и собирает её.
    /// При ошибке компиляции возвращает лог сборки.
    pub fn build(context: &Context, source: &str) -> Result<Self, ClError> {
        let api = context.api();
        let source_ptr = source.as_ptr() as *const c_char;
        let source_len = source.len();
        let raw = cl_create!(
            api,
            clCreateProgramWithSource(context.raw(), 1, &source_ptr, &source_len)
        )?;
        let program = Self { api, raw };

        let device = context.device();
        let device_id = device.id();
        let status = unsafe {
            (api.clBuildProgram)(raw, 1, &device_id, ptr::null(), None, ptr::null_mut())
        };
        if status != CL_SUCCESS {
            let log = program
                .build_log(device)
                .unwrap_or_else(|e| format!("<лог сборки недоступен: {e}>"));
            return Err(ClError::Build { code: status, log });
        }

        debug!(bytes = source_len, "программа OpenCL собрана");
        Ok(program)
    }

    /// Лог сборки программы для устройства
    pub fn build_log(&self, device: &Device) -> Result<String, ClError> {
        query_string("clGetProgramBuildInfo", |size, value, size_ret| unsafe {
            (self.api.clGetProgramBuildInfo)(
                self.raw,
                device.id(),
                CL_PROGRAM_BUILD_LOG,
                size,
                value,
                size_ret,
            )
        })
    }

    pub fn create_kernel(&self, name: &str) -> Result<Kernel, ClError> {
        let c_name = to_c_string(name)?;
        let raw = cl_create!(self.api, clCreateKernel(self.raw, c_name.as_ptr()))?;
        Ok(Kernel {
            api: self.api,
            raw,
            name: name.to_string(),
        })
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        if let Err(e) = cl_check!(self.api, clReleaseProgram(self.raw)) {
            warn!(error = %e, "не удалось освободить программу");
        }
    }
}

/// Ядро OpenCL с привязываемыми аргументами
pub struct Kernel {
    api: &'static OpenCl,
    raw: cl_kernel,
    name: String,
}

impl Kernel {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Привязывает буфер к аргументу `index`
    pub fn set_arg_buffer<T>(&mut self, index: cl_uint, buffer: &Buffer<T>) -> Result<(), ClError> {
        let mem = buffer.raw();
        cl_check!(
            self.api,
            clSetKernelArg(
                self.raw,
                index,
                size_of::<cl_mem>(),
                &mem as *const cl_mem as *const c_void
            )
        )
    }

    /// Привязывает скалярное значение к аргументу `index`
    pub fn set_arg_scalar<T: Copy>(&mut self, index: cl_uint, value: T) -> Result<(), ClError> {
        cl_check!(
            self.api,
            clSetKernelArg(
                self.raw,
                index,
                size_of::<T>(),
                &value as *const T as *const c_void
            )
        )
    }

    pub(crate) fn raw(&self) -> cl_kernel {
        self.raw
    }
}

impl Drop for Kernel {
    fn drop(&mut self) {
        if let Err(e) = cl_check!(self.api, clReleaseKernel(self.raw)) {
            warn!(kernel = %self.name, error = %e, "не удалось освободить ядро");
        }
    }
}
