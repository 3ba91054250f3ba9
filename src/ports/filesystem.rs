//! Filesystem port for reading plan and config files.

use std::path::Path;

use crate::error::PortError;

/// Provides the filesystem access the commands need.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read(&self, path: &Path) -> Result<Vec<u8>, PortError>;

    /// Removes a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    fn remove_file(&self, path: &Path) -> Result<(), PortError>;

    /// Returns `true` if the path exists.
    fn exists(&self, path: &Path) -> bool;
}
