//! Тип матрицы и конструкторы

use crate::opencl::{ClError, ClResult};
use rand::Rng;

/// Матрица f32 в построчном (row-major) представлении
///
/// Инвариант: `data.len() == width * height`, проверяется при создании.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Создает матрицу из готового вектора значений
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> ClResult<Matrix> {
        if data.len() != width * height {
            return Err(ClError::ShapeMismatch {
                expected: width * height,
                actual: data.len(),
            });
        }
        Ok(Matrix { width, height, data })
    }

    /// Нулевая матрица заданного размера
    pub fn zeros(width: usize, height: usize) -> Matrix {
        Matrix {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Матрица, заполненная последовательными значениями `start, start+1, ...`
    pub fn sequential(width: usize, height: usize, start: f32) -> Matrix {
        Matrix {
            width,
            height,
            data: (0..width * height).map(|i| start + i as f32).collect(),
        }
    }

    /// Единичная матрица размера `size`
    pub fn identity(size: usize) -> Matrix {
        let mut m = Matrix::zeros(size, size);
        for i in 0..size {
            m.data[i * size + i] = 1.0;
        }
        m
    }

    /// Матрица со случайными значениями из [0, 1)
    pub fn random(width: usize, height: usize) -> Matrix {
        let mut rng = rand::thread_rng();
        Matrix {
            width,
            height,
            data: (0..width * height).map(|_| rng.gen_range(0.0..1.0)).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Элемент в строке `row`, столбце `col`
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.width + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row * self.width + col] = value;
    }

    /// Построчное содержимое матрицы
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_checks_storage_length() {
        let err = Matrix::from_vec(2, 3, vec![0.0; 5]).unwrap_err();
        match err {
            ClError::ShapeMismatch { expected, actual } => {
                assert_eq!(expected, 6);
                assert_eq!(actual, 5);
            }
            other => panic!("неожиданная ошибка: {other:?}"),
        }
    }

    #[test]
    fn sequential_fills_row_major() {
        let m = Matrix::sequential(4, 4, 0.0);
        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(0, 3), 3.0);
        assert_eq!(m.get(1, 0), 4.0);
        assert_eq!(m.get(3, 3), 15.0);
    }

    #[test]
    fn identity_has_unit_diagonal() {
        let m = Matrix::identity(3);
        for row in 0..3 {
            for col in 0..3 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_eq!(m.get(row, col), expected);
            }
        }
    }
}
