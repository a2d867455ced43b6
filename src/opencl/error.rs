//! Ошибки OpenCL

use super::types::{cl_int, CL_SUCCESS};
use thiserror::Error;

/// Ошибки слоя OpenCL
#[derive(Debug, Error)]
pub enum ClError {
    #[error("OpenCL runtime не найден: {0}")]
    RuntimeNotFound(String),

    #[error("в библиотеке OpenCL нет функции {symbol}: {reason}")]
    MissingSymbol { symbol: &'static str, reason: String },

    #[error("{call} завершился с ошибкой {} ({code})", code_name(.code))]
    Api { call: &'static str, code: cl_int },

    #[error("{0} вернул пустой дескриптор")]
    NullHandle(&'static str),

    #[error("не найдено ни одной платформы OpenCL")]
    NoPlatform,

    #[error("не найдено GPU устройство OpenCL")]
    NoDevice,

    #[error("ошибка компиляции программы {} ({code}):\n{log}", code_name(.code))]
    Build { code: cl_int, log: String },

    #[error("размер буфера {actual} не совпадает с ожидаемым {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("строка содержит нулевой байт: {0:?}")]
    InvalidString(String),
}

impl ClError {
    /// Превращает код возврата функции OpenCL в `Result`
    pub fn check(call: &'static str, code: cl_int) -> Result<(), ClError> {
        if code == CL_SUCCESS {
            Ok(())
        } else {
            Err(ClError::Api { call, code })
        }
    }
}

fn code_name(code: &cl_int) -> &'static str {
    error_name(*code)
}

/// Символьное имя кода возврата OpenCL
pub fn error_name(code: cl_int) -> &'static str {
    match code {
        0 => "CL_SUCCESS",
        -1 => "CL_DEVICE_NOT_FOUND",
        -2 => "CL_DEVICE_NOT_AVAILABLE",
        -3 => "CL_COMPILER_NOT_AVAILABLE",
        -4 => "CL_MEM_OBJECT_ALLOCATION_FAILURE",
        -5 => "CL_OUT_OF_RESOURCES",
        -6 => "CL_OUT_OF_HOST_MEMORY",
        -7 => "CL_PROFILING_INFO_NOT_AVAILABLE",
        -8 => "CL_MEM_COPY_OVERLAP",
        -9 => "CL_IMAGE_FORMAT_MISMATCH",
        -10 => "CL_IMAGE_FORMAT_NOT_SUPPORTED",
        -11 => "CL_BUILD_PROGRAM_FAILURE",
        -12 => "CL_MAP_FAILURE",
        -13 => "CL_MISALIGNED_SUB_BUFFER_OFFSET",
        -14 => "CL_EXEC_STATUS_ERROR_FOR_EVENTS_IN_WAIT_LIST",
        -15 => "CL_COMPILE_PROGRAM_FAILURE",
        -16 => "CL_LINKER_NOT_AVAILABLE",
        -17 => "CL_LINK_PROGRAM_FAILURE",
        -18 => "CL_DEVICE_PARTITION_FAILED",
        -19 => "CL_KERNEL_ARG_INFO_NOT_AVAILABLE",
        -30 => "CL_INVALID_VALUE",
        -31 => "CL_INVALID_DEVICE_TYPE",
        -32 => "CL_INVALID_PLATFORM",
        -33 => "CL_INVALID_DEVICE",
        -34 => "CL_INVALID_CONTEXT",
        -35 => "CL_INVALID_QUEUE_PROPERTIES",
        -36 => "CL_INVALID_COMMAND_QUEUE",
        -37 => "CL_INVALID_HOST_PTR",
        -38 => "CL_INVALID_MEM_OBJECT",
        -39 => "CL_INVALID_IMAGE_FORMAT_DESCRIPTOR",
        -40 => "CL_INVALID_IMAGE_SIZE",
        -41 => "CL_INVALID_SAMPLER",
        -42 => "CL_INVALID_BINARY",
        -43 => "CL_INVALID_BUILD_OPTIONS",
        -44 => "CL_INVALID_PROGRAM",
        -45 => "CL_INVALID_PROGRAM_EXECUTABLE",
        -46 => "CL_INVALID_KERNEL_NAME",
        -47 => "CL_INVALID_KERNEL_DEFINITION",
        -48 => "CL_INVALID_KERNEL",
        -49 => "CL_INVALID_ARG_INDEX",
        -50 => "CL_INVALID_ARG_VALUE",
        -51 => "CL_INVALID_ARG_SIZE",
        -52 => "CL_INVALID_KERNEL_ARGS",
        -53 => "CL_INVALID_WORK_DIMENSION",
        -54 => "CL_INVALID_WORK_GROUP_SIZE",
        -55 => "CL_INVALID_WORK_ITEM_SIZE",
        -56 => "CL_INVALID_GLOBAL_OFFSET",
        -57 => "CL_INVALID_EVENT_WAIT_LIST",
        -58 => "CL_INVALID_EVENT",
        -59 => "CL_INVALID_OPERATION",
        -60 => "CL_INVALID_GL_OBJECT",
        -61 => "CL_INVALID_BUFFER_SIZE",
        -62 => "CL_INVALID_MIP_LEVEL",
        -63 => "CL_INVALID_GLOBAL_WORK_SIZE",
        -64 => "CL_INVALID_PROPERTY",
        -65 => "CL_INVALID_IMAGE_DESCRIPTOR",
        -66 => "CL_INVALID_COMPILER_OPTIONS",
        -67 => "CL_INVALID_LINKER_OPTIONS",
        -68 => "CL_INVALID_DEVICE_PARTITION_COUNT",
        -1001 => "CL_PLATFORM_NOT_FOUND_KHR",
        _ => "CL_UNKNOWN_ERROR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names() {
        assert_eq!(error_name(0), "CL_SUCCESS");
        assert_eq!(error_name(-11), "CL_BUILD_PROGRAM_FAILURE");
        assert_eq!(error_name(-46), "CL_INVALID_KERNEL_NAME");
        assert_eq!(error_name(-1001), "CL_PLATFORM_NOT_FOUND_KHR");
        assert_eq!(error_name(-9999), "CL_UNKNOWN_ERROR");
        assert_eq!(error_name(5), "CL_UNKNOWN_ERROR");
    }

    #[test]
    fn test_check_success_and_failure() {
        assert!(ClError::check("clFinish", CL_SUCCESS).is_ok());

        let err = ClError::check("clCreateBuffer", -61).unwrap_err();
        assert!(matches!(err, ClError::Api { call: "clCreateBuffer", code: -61 }));
    }

    #[test]
    fn test_api_error_message_names_call_and_code() {
        let message = ClError::Api { call: "clEnqueueNDRangeKernel", code: -54 }.to_string();
        assert!(message.contains("clEnqueueNDRangeKernel"));
        assert!(message.contains("CL_INVALID_WORK_GROUP_SIZE"));
        assert!(message.contains("-54"));
    }

    #[test]
    fn test_build_error_carries_log() {
        let err = ClError::Build {
            code: -11,
            log: "<kernel>:3:5: error: use of undeclared identifier 'x'".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("CL_BUILD_PROGRAM_FAILURE"));
        assert!(message.contains("undeclared identifier"));
    }
}
