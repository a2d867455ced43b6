//! Вспомогательные функции для OpenCL

use super::error::ClError;
use super::types::cl_int;
use std::ffi::{c_void, CString};

/// Преобразует строку в null-terminated строку для C
pub fn to_c_string(s: &str) -> Result<CString, ClError> {
    CString::new(s).map_err(|_| ClError::InvalidString(s.to_string()))
}

/// Преобразует байты, полученные от OpenCL, в строку без завершающих нулей
pub fn bytes_to_string(mut bytes: Vec<u8>) -> String {
    while bytes.last() == Some(&0) {
        bytes.pop();
    }
    String::from_utf8_lossy(&bytes).trim_end().to_string()
}

/// Читает строковый параметр через двойной вызов `clGet*Info`:
/// первый вызов узнаёт размер, второй заполняет буфер.
pub fn query_string<F>(call: &'static str, mut query: F) -> Result<String, ClError>
where
    F: FnMut(usize, *mut c_void, *mut usize) -> cl_int,
{
    let mut size = 0usize;
    ClError::check(call, query(0, std::ptr::null_mut(), &mut size))?;
    if size == 0 {
        return Ok(String::new());
    }

    let mut bytes = vec![0u8; size];
    ClError::check(
        call,
        query(size, bytes.as_mut_ptr() as *mut c_void, std::ptr::null_mut()),
    )?;
    Ok(bytes_to_string(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opencl::types::CL_SUCCESS;

    #[test]
    fn test_to_c_string() {
        let name = to_c_string("matrix_mult").unwrap();
        assert_eq!(name.as_bytes_with_nul(), b"matrix_mult\0");

        let err = to_c_string("matrix\0mult").unwrap_err();
        assert!(matches!(err, ClError::InvalidString(_)));
    }

    #[test]
    fn test_bytes_to_string_strips_nul_and_newlines() {
        assert_eq!(bytes_to_string(b"NVIDIA CUDA\0".to_vec()), "NVIDIA CUDA");
        assert_eq!(bytes_to_string(b"log line\n\0\0".to_vec()), "log line");
        assert_eq!(bytes_to_string(Vec::new()), "");
    }

    #[test]
    fn test_query_string_two_calls() {
        let value = b"Intel(R) UHD Graphics\0";
        let mut calls = 0;
        let result = query_string("clGetDeviceInfo", |size, ptr, size_ret| {
            calls += 1;
            if !size_ret.is_null() {
                unsafe { *size_ret = value.len() };
            }
            if !ptr.is_null() {
                assert_eq!(size, value.len());
                unsafe {
                    std::ptr::copy_nonoverlapping(value.as_ptr(), ptr as *mut u8, value.len());
                }
            }
            CL_SUCCESS
        })
        .unwrap();

        assert_eq!(result, "Intel(R) UHD Graphics");
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_query_string_propagates_error() {
        let err = query_string("clGetPlatformInfo", |_, _, _| -30).unwrap_err();
        assert!(matches!(err, ClError::Api { call: "clGetPlatformInfo", code: -30 }));
    }

    #[test]
    fn test_query_string_empty() {
        let result = query_string("clGetProgramBuildInfo", |_, _, size_ret| {
            if !size_ret.is_null() {
                unsafe { *size_ret = 0 };
            }
            CL_SUCCESS
        })
        .unwrap();
        assert!(result.is_empty());
    }
}
