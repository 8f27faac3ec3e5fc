//! Контекст OpenCL и очередь команд
//!
//! Контекст владеет набором устройств, очередь принадлежит контексту и
//! выполняет операции строго в порядке постановки (in-order). Освобождение
//! ресурсов гарантируется через Drop на любом пути выхода.

use super::bindings::*;
use super::error::{ClError, ClResult};
use super::platform::Device;
use super::program::Kernel;
use super::types::*;
use std::ptr;

/// Контекст OpenCL поверх набора устройств
pub struct Context {
    raw: cl_context,
}

/// Очередь команд с in-order семантикой
pub struct CommandQueue {
    raw: cl_command_queue,
}

impl Context {
    /// Создает контекст над переданными устройствами
    pub fn new(devices: &[Device]) -> ClResult<Context> {
        if devices.is_empty() {
            return Err(ClError::ContextCreation { code: 0 });
        }

        let ids: Vec<cl_device_id> = devices.iter().map(|d| d.raw()).collect();
        let mut code: cl_int = CL_SUCCESS;
        let raw = unsafe {
            clCreateContext(
                ptr::null(),
                ids.len() as u32,
                ids.as_ptr(),
                None,
                ptr::null_mut(),
                &mut code,
            )
        };
        if raw.is_null() || code != CL_SUCCESS {
            return Err(ClError::ContextCreation { code });
        }

        Ok(Context { raw })
    }

    /// Создает очередь команд для одного устройства контекста
    pub fn create_queue(&self, device: &Device) -> ClResult<CommandQueue> {
        let mut code: cl_int = CL_SUCCESS;
        let raw = unsafe { clCreateCommandQueue(self.raw, device.raw(), 0, &mut code) };
        if raw.is_null() || code != CL_SUCCESS {
            return Err(ClError::ContextCreation { code });
        }

        Ok(CommandQueue { raw })
    }

    pub(crate) fn raw(&self) -> cl_context {
        self.raw
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        unsafe {
            clReleaseContext(self.raw);
        }
    }
}

impl CommandQueue {
    /// Ставит ядро в очередь на выполнение по двумерному индексному
    /// пространству `global_size` (одна work-item на элемент результата)
    ///
    /// Постановка неблокирующая; завершение гарантируется последующей
    /// блокирующей операцией на той же очереди либо вызовом [`finish`].
    ///
    /// [`finish`]: CommandQueue::finish
    pub fn enqueue_kernel(&self, kernel: &Kernel, global_size: &[usize]) -> ClResult<()> {
        if global_size.is_empty() || global_size.iter().any(|&dim| dim == 0) {
            return Err(ClError::Dispatch {
                reason: format!("пустое индексное пространство {:?}", global_size),
            });
        }

        let code = unsafe {
            clEnqueueNDRangeKernel(
                self.raw,
                kernel.raw(),
                global_size.len() as u32,
                ptr::null(),
                global_size.as_ptr(),
                ptr::null(),
                0,
                ptr::null(),
                ptr::null_mut(),
            )
        };
        if code != CL_SUCCESS {
            return Err(ClError::Dispatch {
                reason: format!("clEnqueueNDRangeKernel вернул код {}", code),
            });
        }

        Ok(())
    }

    /// Ожидает завершения всех операций в очереди
    pub fn finish(&self) -> ClResult<()> {
        let code = unsafe { clFinish(self.raw) };
        if code != CL_SUCCESS {
            return Err(ClError::Dispatch {
                reason: format!("clFinish вернул код {}", code),
            });
        }
        Ok(())
    }

    pub(crate) fn raw(&self) -> cl_command_queue {
        self.raw
    }
}

impl Drop for CommandQueue {
    fn drop(&mut self) {
        unsafe {
            clReleaseCommandQueue(self.raw);
        }
    }
}
