//! OpenCL-ускоренное умножение матриц
//!
//! Библиотека реализует хостовый конвейер диспетчеризации: обнаружение
//! платформ и устройств, создание контекста и in-order очереди команд,
//! передачу данных хост ↔ устройство, компиляцию ядра и чтение результата.

pub mod matrix;
pub mod opencl;
pub mod utils;

// Реэкспорт основных типов для удобства
pub use matrix::{cpu_matrix_multiply, gpu_matrix_multiply, Matrix};
pub use opencl::{ClError, ClResult};
