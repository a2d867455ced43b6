//! Модуль для работы с OpenCL
//!
//! Содержит загружаемые во время выполнения привязки и безопасные обертки
//! над дескрипторами: каждый дескриптор освобождается в `Drop`.

pub mod bindings;
pub mod buffer;
pub mod callbacks;
pub mod context;
pub mod device;
pub mod error;
pub mod program;
pub mod types;
pub mod utils;

pub use buffer::Buffer;
pub use context::{CommandQueue, Context};
pub use device::Device;
pub use error::{error_name, ClError};
pub use program::{Kernel, Program};
