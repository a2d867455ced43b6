//! Макросы для вызовов OpenCL

/// Вызывает функцию OpenCL, возвращающую код ошибки, и превращает код в `Result`
macro_rules! cl_check {
    ($api:expr, $func:ident($($arg:expr),* $(,)?)) => {{
        let code = unsafe { ($api.$func)($($arg),*) };
        $crate::opencl::ClError::check(stringify!($func), code)
    }};
}

/// Вызывает функцию создания объекта OpenCL.
/// Последний аргумент (`errcode_ret`) макрос подставляет сам.
macro_rules! cl_create {
    ($api:expr, $func:ident($($arg:expr),* $(,)?)) => {{
        let mut code: $crate::opencl::types::cl_int = $crate::opencl::types::CL_SUCCESS;
        let handle = unsafe { ($api.$func)($($arg,)* &mut code) };
        $crate::opencl::ClError::check(stringify!($func), code).and_then(|()| {
            if handle.is_null() {
                Err($crate::opencl::ClError::NullHandle(stringify!($func)))
            } else {
                Ok(handle)
            }
        })
    }};
}
