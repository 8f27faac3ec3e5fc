//! Компиляция программ и создание ядер
//!
//! Исходный текст ядра — отдельный артефакт со своим контрактом: именованной
//! точкой входа и фиксированным списком параметров. Аргументы привязываются
//! позиционно типизированными сеттерами.

use super::bindings::*;
use super::buffer::Buffer;
use super::context::Context;
use super::error::{ClError, ClResult};
use super::platform::Device;
use super::types::*;
use std::ptr;

/// Скомпилированная программа OpenCL
pub struct Program {
    raw: cl_program,
}

/// Ядро, привязанное к одной точке входа программы
pub struct Kernel {
    raw: cl_kernel,
}

impl Program {
    /// Компилирует исходный текст для набора устройств
    ///
    /// При ошибке сборки возвращает `ClError::Compile` с логом компилятора,
    /// полученным через `clGetProgramBuildInfo`.
    pub fn build(context: &Context, source: &str, devices: &[Device]) -> ClResult<Program> {
        let mut code: cl_int = CL_SUCCESS;
        let src_ptr = source.as_ptr() as *const i8;
        let src_len = source.len();
        let raw = unsafe {
            clCreateProgramWithSource(context.raw(), 1, &src_ptr, &src_len, &mut code)
        };
        if raw.is_null() || code != CL_SUCCESS {
            return Err(ClError::Compile {
                code,
                log: String::new(),
            });
        }
        // Владение установлено: при ошибке сборки объект освободит Drop
        let program = Program { raw };

        let ids: Vec<cl_device_id> = devices.iter().map(|d| d.raw()).collect();
        let code = unsafe {
            clBuildProgram(
                program.raw,
                ids.len() as u32,
                ids.as_ptr(),
                ptr::null(),
                None,
                ptr::null_mut(),
            )
        };
        if code != CL_SUCCESS {
            let log = devices
                .first()
                .map(|d| program.build_log(d))
                .unwrap_or_default();
            return Err(ClError::Compile { code, log });
        }

        Ok(program)
    }

    /// Лог сборки программы для указанного устройства
    fn build_log(&self, device: &Device) -> String {
        let mut size: usize = 0;
        let code = unsafe {
            clGetProgramBuildInfo(
                self.raw,
                device.raw(),
                CL_PROGRAM_BUILD_LOG,
                0,
                ptr::null_mut(),
                &mut size,
            )
        };
        if code != CL_SUCCESS || size == 0 {
            return String::new();
        }

        let mut buf = vec![0u8; size];
        let code = unsafe {
            clGetProgramBuildInfo(
                self.raw,
                device.raw(),
                CL_PROGRAM_BUILD_LOG,
                size,
                buf.as_mut_ptr() as *mut std::ffi::c_void,
                ptr::null_mut(),
            )
        };
        if code != CL_SUCCESS {
            return String::new();
        }

        String::from_utf8_lossy(&buf).trim_end_matches('\0').to_string()
    }

    /// Создает ядро по имени точки входа
    pub fn create_kernel(&self, entry_point: &str) -> ClResult<Kernel> {
        let name = super::utils::to_c_string(entry_point);
        let mut code: cl_int = CL_SUCCESS;
        let raw = unsafe { clCreateKernel(self.raw, name.as_ptr(), &mut code) };
        if raw.is_null() || code != CL_SUCCESS {
            return Err(ClError::KernelCreation {
                name: entry_point.to_string(),
                code,
            });
        }

        Ok(Kernel { raw })
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe {
            clReleaseProgram(self.raw);
        }
    }
}

impl Kernel {
    /// Привязывает буфер к позиционному аргументу ядра
    pub fn set_arg_buffer(&self, index: u32, buffer: &Buffer) -> ClResult<()> {
        let mem = buffer.raw();
        let code = unsafe {
            clSetKernelArg(
                self.raw,
                index,
                std::mem::size_of::<cl_mem>(),
                &mem as *const cl_mem as *const std::ffi::c_void,
            )
        };
        if code != CL_SUCCESS {
            return Err(ClError::ArgumentBinding { index, code });
        }
        Ok(())
    }

    /// Привязывает скалярный параметр i32 к позиционному аргументу ядра
    pub fn set_arg_i32(&self, index: u32, value: i32) -> ClResult<()> {
        let code = unsafe {
            clSetKernelArg(
                self.raw,
                index,
                std::mem::size_of::<i32>(),
                &value as *const i32 as *const std::ffi::c_void,
            )
        };
        if code != CL_SUCCESS {
            return Err(ClError::ArgumentBinding { index, code });
        }
        Ok(())
    }

    pub(crate) fn raw(&self) -> cl_kernel {
        self.raw
    }
}

impl Drop for Kernel {
    fn drop(&mut self) {
        unsafe {
            clReleaseKernel(self.raw);
        }
    }
}
