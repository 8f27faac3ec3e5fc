//! Типизированные ошибки OpenCL
//!
//! Каждый сбой нативного вызова сразу преобразуется в вариант `ClError`;
//! повторных попыток нет, ресурсы освобождаются через Drop.

use super::types::cl_int;

/// Ошибки конвейера OpenCL
#[derive(Debug, thiserror::Error)]
pub enum ClError {
    #[error("Не найдено ни одной платформы или устройства OpenCL")]
    Discovery,

    #[error("Ошибка при создании контекста (код {code})")]
    ContextCreation { code: cl_int },

    #[error("Ошибка при выделении памяти устройства (код {code})")]
    Allocation { code: cl_int },

    #[error("Ошибка передачи данных ({direction}): {reason}")]
    Transfer { direction: &'static str, reason: String },

    #[error("Ошибка компиляции программы (код {code}):\n{log}")]
    Compile { code: cl_int, log: String },

    #[error("Ошибка при создании ядра '{name}' (код {code})")]
    KernelCreation { name: String, code: cl_int },

    #[error("Ошибка при установке аргумента ядра {index} (код {code})")]
    ArgumentBinding { index: u32, code: cl_int },

    #[error("Ошибка при запуске ядра: {reason}")]
    Dispatch { reason: String },

    #[error("Несовместимые размеры матриц: width_a = {width_a}, height_b = {height_b}")]
    DimensionMismatch { width_a: usize, height_b: usize },

    #[error("Длина данных не соответствует размеру матрицы: ожидалось {expected}, получено {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

/// Результат операций OpenCL
pub type ClResult<T> = Result<T, ClError>;
