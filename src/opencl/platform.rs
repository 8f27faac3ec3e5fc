//! Обнаружение платформ и устройств OpenCL

use super::bindings::*;
use super::error::{ClError, ClResult};
use super::types::*;
use std::ptr;

/// Платформа OpenCL (рантайм одного вендора)
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    raw: cl_platform_id,
}

/// Вычислительное устройство (GPU, CPU и т.д.)
#[derive(Debug, Clone, Copy)]
pub struct Device {
    raw: cl_device_id,
}

impl Platform {
    /// Возвращает все доступные платформы
    ///
    /// Сначала запрашивается количество платформ, затем заполняется
    /// массив идентификаторов. Пустой список считается ошибкой.
    pub fn list() -> ClResult<Vec<Platform>> {
        let mut num_platforms: u32 = 0;
        let code = unsafe { clGetPlatformIDs(0, ptr::null_mut(), &mut num_platforms) };
        if code != CL_SUCCESS || num_platforms == 0 {
            return Err(ClError::Discovery);
        }

        let mut ids = vec![ptr::null_mut(); num_platforms as usize];
        let code = unsafe { clGetPlatformIDs(num_platforms, ids.as_mut_ptr(), ptr::null_mut()) };
        if code != CL_SUCCESS {
            return Err(ClError::Discovery);
        }

        Ok(ids.into_iter().map(|raw| Platform { raw }).collect())
    }

    /// Возвращает устройства платформы заданного типа
    pub fn devices(&self, device_type: cl_device_type) -> ClResult<Vec<Device>> {
        let mut num_devices: u32 = 0;
        let code = unsafe {
            clGetDeviceIDs(self.raw, device_type, 0, ptr::null_mut(), &mut num_devices)
        };
        if code != CL_SUCCESS || num_devices == 0 {
            return Err(ClError::Discovery);
        }

        let mut ids = vec![ptr::null_mut(); num_devices as usize];
        let code = unsafe {
            clGetDeviceIDs(self.raw, device_type, num_devices, ids.as_mut_ptr(), ptr::null_mut())
        };
        if code != CL_SUCCESS {
            return Err(ClError::Discovery);
        }

        Ok(ids.into_iter().map(|raw| Device { raw }).collect())
    }

    /// Имя платформы
    pub fn name(&self) -> ClResult<String> {
        let mut size: usize = 0;
        let code = unsafe {
            clGetPlatformInfo(self.raw, CL_PLATFORM_NAME, 0, ptr::null_mut(), &mut size)
        };
        if code != CL_SUCCESS {
            return Err(ClError::Discovery);
        }

        let mut buf = vec![0u8; size];
        let code = unsafe {
            clGetPlatformInfo(
                self.raw,
                CL_PLATFORM_NAME,
                size,
                buf.as_mut_ptr() as *mut std::ffi::c_void,
                ptr::null_mut(),
            )
        };
        if code != CL_SUCCESS {
            return Err(ClError::Discovery);
        }

        Ok(String::from_utf8_lossy(&buf).trim_end_matches('\0').to_string())
    }
}

impl Device {
    /// Имя устройства
    pub fn name(&self) -> ClResult<String> {
        let mut size: usize = 0;
        let code = unsafe {
            clGetDeviceInfo(self.raw, CL_DEVICE_NAME, 0, ptr::null_mut(), &mut size)
        };
        if code != CL_SUCCESS {
            return Err(ClError::Discovery);
        }

        let mut buf = vec![0u8; size];
        let code = unsafe {
            clGetDeviceInfo(
                self.raw,
                CL_DEVICE_NAME,
                size,
                buf.as_mut_ptr() as *mut std::ffi::c_void,
                ptr::null_mut(),
            )
        };
        if code != CL_SUCCESS {
            return Err(ClError::Discovery);
        }

        Ok(String::from_utf8_lossy(&buf).trim_end_matches('\0').to_string())
    }

    pub(crate) fn raw(&self) -> cl_device_id {
        self.raw
    }
}
