//! Умножение матриц на GPU через OpenCL
//!
//! Библиотека OpenCL загружается во время выполнения; все дескрипторы
//! (контекст, очередь, программа, ядро, буферы) освобождаются в `Drop`.

#[macro_use]
mod macros;

pub mod matrix;
pub mod opencl;
pub mod utils;

// Реэкспорт основных типов для удобства
pub use matrix::{GpuMatrixMultiplier, MatrixType, MATRIX_SIZE};
pub use opencl::ClError;
