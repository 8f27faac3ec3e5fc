//! Модуль для работы с OpenCL
//!
//! Содержит низкоуровневые привязки и безопасные обертки для OpenCL.
//! Порядок захвата ресурсов строгий: платформа → устройство → контекст →
//! очередь → буферы → программа → ядро; освобождение — зеркально, через Drop.

pub mod bindings;
pub mod buffer;
pub mod context;
pub mod error;
pub mod platform;
pub mod program;
pub mod types;
pub mod utils;

pub use buffer::{AccessMode, Buffer};
pub use context::{CommandQueue, Context};
pub use error::{ClError, ClResult};
pub use platform::{Device, Platform};
pub use program::{Kernel, Program};
pub use types::{CL_DEVICE_TYPE_ALL, CL_DEVICE_TYPE_CPU, CL_DEVICE_TYPE_GPU};
