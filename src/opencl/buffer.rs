//! Буферы памяти устройства
//!
//! Буфер зеркалирует данные хоста в памяти устройства и помечен режимом
//! доступа. Входные буферы заполняются только передачей с хоста, выходной —
//! только выполнением ядра, поэтому гонок записи не возникает.

use super::bindings::*;
use super::context::{CommandQueue, Context};
use super::error::{ClError, ClResult};
use super::types::*;
use std::ptr;

/// Режим доступа буфера со стороны ядра
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Ядро только читает буфер (входные данные)
    ReadOnly,
    /// Ядро только пишет в буфер (результат)
    WriteOnly,
}

impl AccessMode {
    fn flags(self) -> cl_mem_flags {
        match self {
            AccessMode::ReadOnly => CL_MEM_READ_ONLY,
            AccessMode::WriteOnly => CL_MEM_WRITE_ONLY,
        }
    }
}

/// Буфер в памяти устройства
pub struct Buffer {
    raw: cl_mem,
    len: usize,
    mode: AccessMode,
}

impl Buffer {
    /// Выделяет буфер на `len` элементов f32
    pub fn new(context: &Context, len: usize, mode: AccessMode) -> ClResult<Buffer> {
        let mut code: cl_int = CL_SUCCESS;
        let raw = unsafe {
            clCreateBuffer(
                context.raw(),
                mode.flags(),
                len * std::mem::size_of::<f32>(),
                ptr::null_mut(),
                &mut code,
            )
        };
        if raw.is_null() || code != CL_SUCCESS {
            return Err(ClError::Allocation { code });
        }

        Ok(Buffer { raw, len, mode })
    }

    /// Количество элементов f32 в буфере
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Режим доступа, заданный при выделении
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    pub(crate) fn raw(&self) -> cl_mem {
        self.raw
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe {
            clReleaseMemObject(self.raw);
        }
    }
}

impl CommandQueue {
    /// Копирует данные хоста в буфер устройства
    ///
    /// Выходной (WriteOnly) буфер заполняется только ядром, передача в него
    /// с хоста отклоняется. Неблокирующая запись полагается на in-order
    /// семантику очереди: последующий запуск ядра увидит завершенную
    /// передачу без явного ожидания.
    pub fn write_buffer(&self, buffer: &Buffer, data: &[f32], blocking: bool) -> ClResult<()> {
        if buffer.mode() == AccessMode::WriteOnly {
            return Err(ClError::Transfer {
                direction: "запись",
                reason: "буфер результата заполняется только ядром".to_string(),
            });
        }
        if data.len() != buffer.len() {
            return Err(ClError::Transfer {
                direction: "запись",
                reason: format!(
                    "размер данных {} не совпадает с размером буфера {}",
                    data.len(),
                    buffer.len()
                ),
            });
        }

        let code = unsafe {
            clEnqueueWriteBuffer(
                self.raw(),
                buffer.raw(),
                if blocking { CL_TRUE } else { CL_FALSE },
                0,
                data.len() * std::mem::size_of::<f32>(),
                data.as_ptr() as *const std::ffi::c_void,
                0,
                ptr::null(),
                ptr::null_mut(),
            )
        };
        if code != CL_SUCCESS {
            return Err(ClError::Transfer {
                direction: "запись",
                reason: format!("clEnqueueWriteBuffer вернул код {}", code),
            });
        }

        Ok(())
    }

    /// Копирует буфер устройства в память хоста
    ///
    /// Блокирующее чтение — единственный явный барьер синхронизации
    /// конвейера: очередь сначала завершает все поставленные ранее
    /// операции (передачи и запуск ядра), затем копирует результат.
    pub fn read_buffer(&self, buffer: &Buffer, dest: &mut [f32], blocking: bool) -> ClResult<()> {
        if buffer.mode() == AccessMode::ReadOnly {
            return Err(ClError::Transfer {
                direction: "чтение",
                reason: "входной буфер не читается обратно на хост".to_string(),
            });
        }
        if dest.len() != buffer.len() {
            return Err(ClError::Transfer {
                direction: "чтение",
                reason: format!(
                    "размер приемника {} не совпадает с размером буфера {}",
                    dest.len(),
                    buffer.len()
                ),
            });
        }

        let code = unsafe {
            clEnqueueReadBuffer(
                self.raw(),
                buffer.raw(),
                if blocking { CL_TRUE } else { CL_FALSE },
                0,
                dest.len() * std::mem::size_of::<f32>(),
                dest.as_mut_ptr() as *mut std::ffi::c_void,
                0,
                ptr::null(),
                ptr::null_mut(),
            )
        };
        if code != CL_SUCCESS {
            return Err(ClError::Transfer {
                direction: "чтение",
                reason: format!("clEnqueueReadBuffer вернул код {}", code),
            });
        }

        Ok(())
    }
}
