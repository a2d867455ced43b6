//! Типы матриц и связанные структуры

/// Способ заполнения входных матриц
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatrixType {
    /// A = 1, 2, ..., N², B = N², ..., 2, 1 (построчно)
    Sequential,
    /// Матрицы заполненные 1 и 2
    OnesAndTwos,
    /// Матрицы заполненные 3 и 4
    ThreesAndFours,
    /// Случайно заполненные матрицы
    Random,
}
