//! OpenCL ядра для матричных операций

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Путь к исходному коду ядра относительно рабочего каталога
pub const KERNEL_PATH: &str = "kernels/matrix_mult.cl";

/// Имя функции ядра в исходном коде
pub const KERNEL_NAME: &str = "matrix_mult";

/// Читает исходный код ядра из файла
pub fn load_kernel_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to open kernel file {}", path.display()))?;
    debug!(path = %path.display(), bytes = source.len(), "загружен исходный код ядра");
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BUNDLED_KERNEL: &str = include_str!("../../kernels/matrix_mult.cl");

    #[test]
    fn test_load_kernel_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BUNDLED_KERNEL.as_bytes()).unwrap();

        let source = load_kernel_source(file.path()).unwrap();
        assert_eq!(source, BUNDLED_KERNEL);
    }

    #[test]
    fn test_missing_kernel_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.cl");

        let err = load_kernel_source(&path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Failed to open kernel file"));
        assert!(message.contains("missing.cl"));
    }

    #[test]
    fn test_bundled_kernel_signature() {
        assert!(BUNDLED_KERNEL.contains(&format!("__kernel void {}(", KERNEL_NAME)));
        assert!(BUNDLED_KERNEL.contains("get_global_id(0)"));
        assert!(BUNDLED_KERNEL.contains("get_global_id(1)"));
        assert!(BUNDLED_KERNEL.contains("const unsigned int size"));
    }
}
