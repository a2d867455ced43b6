//! Низкоуровневые привязки к OpenCL API
//!
//! Библиотека OpenCL (ICD loader) открывается во время выполнения через
//! `libloading`, поэтому для сборки и тестов она не нужна.

use super::callbacks::ContextNotifyCallback;
use super::error::ClError;
use super::types::*;
use libloading::Library;
use std::ffi::{c_char, c_void};
use std::sync::OnceLock;
use tracing::debug;

#[cfg(target_os = "linux")]
const LIBRARY_NAMES: &[&str] = &["libOpenCL.so.1", "libOpenCL.so"];
#[cfg(target_os = "macos")]
const LIBRARY_NAMES: &[&str] = &["/System/Library/Frameworks/OpenCL.framework/OpenCL"];
#[cfg(target_os = "windows")]
const LIBRARY_NAMES: &[&str] = &["OpenCL.dll"];
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const LIBRARY_NAMES: &[&str] = &["libOpenCL.so"];

/// Тип callback-функции, вызываемой по завершении сборки программы
pub type BuildNotifyCallback = Option<unsafe extern "C" fn(program: cl_program, user_data: *mut c_void)>;

/// Объявляет таблицу функций OpenCL и её загрузку из библиотеки.
/// Имена полей совпадают с именами символов в библиотеке.
macro_rules! opencl_api {
    ($( fn $name:ident($($arg:ident: $ty:ty),* $(,)?) -> $ret:ty; )*) => {
        /// Таблица функций OpenCL, загруженных из ICD loader
        #[allow(non_snake_case)]
        pub struct OpenCl {
            _library: Library,
            $( pub $name: unsafe extern "C" fn($($arg: $ty),*) -> $ret, )*
        }

        impl OpenCl {
            #[allow(non_snake_case)]
            unsafe fn from_library(library: Library) -> Result<Self, ClError> {
                $(
                    let $name = *library
                        .get::<unsafe extern "C" fn($($ty),*) -> $ret>(stringify!($name).as_bytes())
                        .map_err(|e| ClError::MissingSymbol {
                            symbol: stringify!($name),
                            reason: e.to_string(),
                        })?;
                )*
                Ok(Self { _library: library, $($name,)* })
            }
        }
    };
}

opencl_api! {
    fn clGetPlatformIDs(
        num_entries: cl_uint,
        platforms: *mut cl_platform_id,
        num_platforms: *mut cl_uint,
    ) -> cl_int;

    fn clGetPlatformInfo(
        platform: cl_platform_id,
        param_name: cl_platform_info,
        param_value_size: usize,
        param_value: *mut c_void,
        param_value_size_ret: *mut usize,
    ) -> cl_int;

    fn clGetDeviceIDs(
        platform: cl_platform_id,
        device_type: cl_device_type,
        num_entries: cl_uint,
        devices: *mut cl_device_id,
        num_devices: *mut cl_uint,
    ) -> cl_int;

    fn clGetDeviceInfo(
        device: cl_device_id,
        param_name: cl_device_info,
        param_value_size: usize,
        param_value: *mut c_void,
        param_value_size_ret: *mut usize,
    ) -> cl_int;

    fn clCreateContext(
        properties: *const cl_context_properties,
        num_devices: cl_uint,
        devices: *const cl_device_id,
        pfn_notify: ContextNotifyCallback,
        user_data: *mut c_void,
        errcode_ret: *mut cl_int,
    ) -> cl_context;

    fn clCreateCommandQueue(
        context: cl_context,
        device: cl_device_id,
        properties: cl_command_queue_properties,
        errcode_ret: *mut cl_int,
    ) -> cl_command_queue;

    fn clCreateProgramWithSource(
        context: cl_context,
        count: cl_uint,
        strings: *const *const c_char,
        lengths: *const usize,
        errcode_ret: *mut cl_int,
    ) -> cl_program;

    fn clBuildProgram(
        program: cl_program,
        num_devices: cl_uint,
        device_list: *const cl_device_id,
        options: *const c_char,
        pfn_notify: BuildNotifyCallback,
        user_data: *mut c_void,
    ) -> cl_int;

    fn clGetProgramBuildInfo(
        program: cl_program,
        device: cl_device_id,
        param_name: cl_program_build_info,
        param_value_size: usize,
        param_value: *mut c_void,
        param_value_size_ret: *mut usize,
    ) -> cl_int;

    fn clCreateKernel(
        program: cl_program,
        kernel_name: *const c_char,
        errcode_ret: *mut cl_int,
    ) -> cl_kernel;

    fn clSetKernelArg(
        kernel: cl_kernel,
        arg_index: cl_uint,
        arg_size: usize,
        arg_value: *const c_void,
    ) -> cl_int;

    fn clCreateBuffer(
        context: cl_context,
        flags: cl_mem_flags,
        size: usize,
        host_ptr: *mut c_void,
        errcode_ret: *mut cl_int,
    ) -> cl_mem;

    fn clEnqueueNDRangeKernel(
        command_queue: cl_command_queue,
        kernel: cl_kernel,
        work_dim: cl_uint,
        global_work_offset: *const usize,
        global_work_size: *const usize,
        local_work_size: *const usize,
        num_events_in_wait_list: cl_uint,
        event_wait_list: *const cl_event,
        event: *mut cl_event,
    ) -> cl_int;

    fn clEnqueueReadBuffer(
        command_queue: cl_command_queue,
        buffer: cl_mem,
        blocking_read: cl_bool,
        offset: usize,
        size: usize,
        ptr: *mut c_void,
        num_events_in_wait_list: cl_uint,
        event_wait_list: *const cl_event,
        event: *mut cl_event,
    ) -> cl_int;

    fn clFinish(command_queue: cl_command_queue) -> cl_int;

    fn clReleaseMemObject(memobj: cl_mem) -> cl_int;
    fn clReleaseKernel(kernel: cl_kernel) -> cl_int;
    fn clReleaseProgram(program: cl_program) -> cl_int;
    fn clReleaseCommandQueue(command_queue: cl_command_queue) -> cl_int;
    fn clReleaseContext(context: cl_context) -> cl_int;
}

impl OpenCl {
    /// Открывает первую найденную библиотеку OpenCL и загружает все функции
    pub fn load() -> Result<Self, ClError> {
        let mut failures = Vec::new();
        for name in LIBRARY_NAMES {
            match unsafe { Library::new(name) } {
                Ok(library) => {
                    debug!(library = name, "загружена библиотека OpenCL");
                    return unsafe { Self::from_library(library) };
                }
                Err(e) => failures.push(format!("{name}: {e}")),
            }
        }
        Err(ClError::RuntimeNotFound(failures.join("; ")))
    }
}

static OPENCL: OnceLock<OpenCl> = OnceLock::new();

/// Возвращает таблицу функций OpenCL, загружая библиотеку при первом вызове
pub fn api() -> Result<&'static OpenCl, ClError> {
    if let Some(api) = OPENCL.get() {
        return Ok(api);
    }
    let loaded = OpenCl::load()?;
    Ok(OPENCL.get_or_init(|| loaded))
}
