//! Выбор платформы и GPU устройства

use super::bindings::{api, OpenCl};
use super::error::ClError;
use super::types::*;
use super::utils::query_string;
use std::ptr;
use tracing::debug;

/// GPU устройство OpenCL вместе с его платформой
#[derive(Debug, Clone, Copy)]
pub struct Device {
    id: cl_device_id,
    platform: cl_platform_id,
}

impl Device {
    /// Находит первое GPU устройство, перебирая все платформы
    pub fn first_gpu() -> Result<Self, ClError> {
        let api = api()?;

        let platforms = platform_ids(api)?;
        debug!(count = platforms.len(), "найдены платформы OpenCL");

        for platform in platforms {
            let mut device = ptr::null_mut();
            let mut num_devices = 0;
            let code = unsafe {
                (api.clGetDeviceIDs)(platform, CL_DEVICE_TYPE_GPU, 1, &mut device, &mut num_devices)
            };
            match code {
                CL_SUCCESS if num_devices > 0 && !device.is_null() => {
                    return Ok(Self { id: device, platform });
                }
                CL_SUCCESS | CL_DEVICE_NOT_FOUND => continue,
                code => return Err(ClError::Api { call: "clGetDeviceIDs", code }),
            }
        }

        Err(ClError::NoDevice)
    }

    pub fn id(&self) -> cl_device_id {
        self.id
    }

    /// Имя устройства (`CL_DEVICE_NAME`)
    pub fn name(&self) -> Result<String, ClError> {
        let api = api()?;
        query_string("clGetDeviceInfo", |size, value, size_ret| unsafe {
            (api.clGetDeviceInfo)(self.id, CL_DEVICE_NAME, size, value, size_ret)
        })
    }

    /// Имя платформы устройства (`CL_PLATFORM_NAME`)
    pub fn platform_name(&self) -> Result<String, ClError> {
        let api = api()?;
        query_string("clGetPlatformInfo", |size, value, size_ret| unsafe {
            (api.clGetPlatformInfo)(self.platform, CL_PLATFORM_NAME, size, value, size_ret)
        })
    }
}

fn platform_ids(api: &OpenCl) -> Result<Vec<cl_platform_id>, ClError> {
    let mut num_platforms = 0;
    match unsafe { (api.clGetPlatformIDs)(0, ptr::null_mut(), &mut num_platforms) } {
        CL_PLATFORM_NOT_FOUND_KHR => return Err(ClError::NoPlatform),
        code => ClError::check("clGetPlatformIDs", code)?,
    }
    if num_platforms == 0 {
        return Err(ClError::NoPlatform);
    }

    let mut platforms = vec![ptr::null_mut(); num_platforms as usize];
    cl_check!(api, clGetPlatformIDs(num_platforms, platforms.as_mut_ptr(), ptr::null_mut()))?;
    Ok(platforms)
}
