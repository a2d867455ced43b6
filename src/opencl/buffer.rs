//! Буферы памяти устройства

use super::bindings::OpenCl;
use super::context::Context;
use super::error::ClError;
use super::types::*;
use std::ffi::c_void;
use std::marker::PhantomData;
use std::mem::size_of;
use std::ptr;
use tracing::warn;

/// Буфер на устройстве из `len` элементов типа `T`
pub struct Buffer<T> {
    api: &'static OpenCl,
    raw: cl_mem,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T: Copy> Buffer<T> {
    /// Буфер только для чтения, заполненный копией `data`
    pub fn from_slice(context: &Context, data: &[T]) -> Result<Self, ClError> {
        let api = context.api();
        let raw = cl_create!(
            api,
            clCreateBuffer(
                context.raw(),
                CL_MEM_READ_ONLY | CL_MEM_COPY_HOST_PTR,
                data.len() * size_of::<T>(),
                // CL_MEM_COPY_HOST_PTR только читает host память
                data.as_ptr() as *mut c_void
            )
        )?;
        Ok(Self::wrap(api, raw, data.len()))
    }

    /// Буфер только для записи ядром
    pub fn write_only(context: &Context, len: usize) -> Result<Self, ClError> {
        let api = context.api();
        let raw = cl_create!(
            api,
            clCreateBuffer(
                context.raw(),
                CL_MEM_WRITE_ONLY,
                len * size_of::<T>(),
                ptr::null_mut()
            )
        )?;
        Ok(Self::wrap(api, raw, len))
    }

    fn wrap(api: &'static OpenCl, raw: cl_mem, len: usize) -> Self {
        Self {
            api,
            raw,
            len,
            _marker: PhantomData,
        }
    }
}

impl<T> Buffer<T> {
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub fn byte_size(&self) -> usize {
        self.len * size_of::<T>()
    }

    pub(crate) fn raw(&self) -> cl_mem {
        self.raw
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        if let Err(e) = cl_check!(self.api, clReleaseMemObject(self.raw)) {
            warn!(error = %e, "не удалось освободить буфер");
        }
    }
}
