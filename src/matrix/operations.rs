//! Операции над матрицами

use super::types::MatrixType;
use rand::Rng;
use tracing::{debug, warn};

/// Допустимая относительная погрешность при сравнении f32 результатов
const EPSILON: f32 = 1e-4;

/// Инициализирует матрицы заданного типа и размера
pub fn initialize_matrices(matrix_type: MatrixType, size: usize) -> (Vec<f32>, Vec<f32>) {
    let matrix_elements = size * size;
    match matrix_type {
        MatrixType::Sequential => {
            let a = (1..=matrix_elements).map(|v| v as f32).collect();
            let b = (1..=matrix_elements).rev().map(|v| v as f32).collect();
            (a, b)
        }
        MatrixType::OnesAndTwos => (vec![1.0f32; matrix_elements], vec![2.0f32; matrix_elements]),
        MatrixType::ThreesAndFours => (vec![3.0f32; matrix_elements], vec![4.0f32; matrix_elements]),
        MatrixType::Random => {
            let mut rng = rand::thread_rng();
            let a = (0..matrix_elements).map(|_| rng.gen_range(0.0..1.0)).collect();
            let b = (0..matrix_elements).map(|_| rng.gen_range(0.0..1.0)).collect();
            (a, b)
        }
    }
}

/// CPU реализация матричного умножения
pub fn cpu_matrix_multiply(a: &[f32], b: &[f32], c: &mut [f32], size: usize) {
    debug!(size, "CPU умножение для верификации");
    for i in 0..size {
        for j in 0..size {
            let mut sum = 0.0f32;
            for k in 0..size {
                sum += a[i * size + k] * b[k * size + j];
            }
            c[i * size + j] = sum;
        }
    }
}

/// Сравнивает результаты GPU и CPU вычислений
pub fn compare_results(gpu_result: &[f32], cpu_result: &[f32], size: usize) -> bool {
    let mut max_diff = 0.0f32;
    let mut diff_count = 0;

    for idx in 0..size * size {
        let diff = (gpu_result[idx] - cpu_result[idx]).abs();
        // NaN в любом из результатов тоже считается расхождением
        if diff.is_nan() || diff > EPSILON * cpu_result[idx].abs().max(1.0) {
            diff_count += 1;
            max_diff = max_diff.max(diff);
        }
    }

    if diff_count > 0 {
        warn!(diff_count, max_diff, "результаты GPU и CPU различаются");
        false
    } else {
        debug!("результаты GPU и CPU совпадают");
        true
    }
}

/// Форматирует матрицу построчно, каждый элемент как `{:6.2} `
pub fn format_matrix(c: &[f32], size: usize) -> String {
    let mut out = String::new();
    if size == 0 {
        return out;
    }
    for row in c.chunks(size).take(size) {
        for value in row {
            out.push_str(&format!("{:6.2} ", value));
        }
        out.push('\n');
    }
    out
}
