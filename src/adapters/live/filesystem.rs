//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::error::PortError;
use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>, PortError> {
        Ok(std::fs::read(path)?)
    }

    fn remove_file(&self, path: &Path) -> Result<(), PortError> {
        Ok(std::fs::remove_file(path)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
