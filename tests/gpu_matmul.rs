//! Интеграционные тесты умножения на GPU.
//! Тесты с пометкой `ignore` требуют установленного OpenCL драйвера с GPU:
//! `cargo test -- --ignored`

use approx::assert_relative_eq;
use opencl_matmul::matrix::{
    cpu_matrix_multiply, initialize_matrices, load_kernel_source, GpuMatrixMultiplier, MatrixType,
    KERNEL_PATH, MATRIX_SIZE,
};
use opencl_matmul::ClError;
use std::path::Path;

fn bundled_kernel() -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(KERNEL_PATH);
    load_kernel_source(path).unwrap()
}

#[test]
fn test_bundled_kernel_is_loadable() {
    let source = bundled_kernel();
    assert!(source.contains("__kernel void matrix_mult("));
}

#[test]
fn test_missing_runtime_or_device_is_an_error_not_a_panic() {
    // На машине без GPU должен вернуться Err с понятным сообщением
    if let Err(e) = GpuMatrixMultiplier::new() {
        assert!(!format!("{e:#}").is_empty());
        let cl_error = e.downcast_ref::<ClError>();
        assert!(cl_error.is_some(), "unexpected error: {e:#}");
    }
}

#[test]
#[ignore = "requires an OpenCL GPU device"]
fn test_gpu_multiply_sequential_4x4() {
    let multiplier = GpuMatrixMultiplier::new().unwrap();
    let (a, b) = initialize_matrices(MatrixType::Sequential, MATRIX_SIZE);

    let c = multiplier.multiply(&bundled_kernel(), &a, &b, MATRIX_SIZE).unwrap();

    let expected = [
        80.0f32, 70.0, 60.0, 50.0,
        240.0, 214.0, 188.0, 162.0,
        400.0, 358.0, 316.0, 274.0,
        560.0, 502.0, 444.0, 386.0,
    ];
    assert_eq!(c.len(), expected.len());
    for (actual, expected) in c.iter().zip(expected.iter()) {
        assert_relative_eq!(*actual, *expected);
    }
}

#[test]
#[ignore = "requires an OpenCL GPU device"]
fn test_gpu_matches_cpu_on_random_input() {
    let size = 32;
    let multiplier = GpuMatrixMultiplier::new().unwrap();
    let (a, b) = initialize_matrices(MatrixType::Random, size);

    let gpu = multiplier.multiply(&bundled_kernel(), &a, &b, size).unwrap();
    let mut cpu = vec![0.0f32; size * size];
    cpu_matrix_multiply(&a, &b, &mut cpu, size);

    for (g, c) in gpu.iter().zip(cpu.iter()) {
        assert_relative_eq!(*g, *c, max_relative = 1e-4);
    }
}

#[test]
#[ignore = "requires an OpenCL GPU device"]
fn test_gpu_build_error_returns_log() {
    let multiplier = GpuMatrixMultiplier::new().unwrap();
    let (a, b) = initialize_matrices(MatrixType::OnesAndTwos, MATRIX_SIZE);
    let broken = "__kernel void matrix_mult(__global float* a) { undeclared = 1; }";

    let err = multiplier.multiply(broken, &a, &b, MATRIX_SIZE).unwrap_err();
    match err.downcast_ref::<ClError>() {
        Some(ClError::Build { log, .. }) => assert!(!log.is_empty()),
        other => panic!("expected build error, got {other:?}"),
    }
}

#[test]
#[ignore = "requires an OpenCL GPU device"]
fn test_gpu_rejects_mismatched_input() {
    let multiplier = GpuMatrixMultiplier::new().unwrap();
    let (a, _) = initialize_matrices(MatrixType::OnesAndTwos, MATRIX_SIZE);
    let short = vec![1.0f32; 3];

    let err = multiplier.multiply(&bundled_kernel(), &a, &short, MATRIX_SIZE).unwrap_err();
    assert!(err.to_string().contains("expected 16 elements"));
}
