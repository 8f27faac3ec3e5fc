//! Модуль для работы с матрицами
//!
//! Предоставляет:
//! - Тип матрицы
//! - Операции над матрицами
//! - GPU-ускоренную реализацию умножения

mod types;
pub mod kernels;
pub mod operations;

pub use kernels::{MATRIX_MULTIPLY_ENTRY, MATRIX_MULTIPLY_KERNEL};
pub use operations::{compare_results, cpu_matrix_multiply, gpu_matrix_multiply};
pub use types::Matrix;
