//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the classification core and the
//! outside world. Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod shell;

pub use filesystem::FileSystem;
pub use shell::{ShellExecutor, ShellOutput};
