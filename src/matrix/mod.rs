//! Модуль для работы с матрицами
//!
//! Предоставляет:
//! - Типы матриц
//! - Операции над матрицами (CPU эталон, сравнение, вывод)
//! - Загрузку ядра и умножение на GPU

mod types;
pub mod gpu;
pub mod kernels;
pub mod operations;

pub use gpu::GpuMatrixMultiplier;
pub use kernels::{load_kernel_source, KERNEL_NAME, KERNEL_PATH};
pub use operations::{compare_results, cpu_matrix_multiply, format_matrix, initialize_matrices};
pub use types::MatrixType;

/// Размер квадратных матриц
pub const MATRIX_SIZE: usize = 4;
