//! Service context bundling the port trait objects.

use crate::adapters::live::{LiveFileSystem, LiveShellExecutor};
use crate::ports::filesystem::FileSystem;
use crate::ports::shell::ShellExecutor;

/// Bundles all port trait objects into a single context.
///
/// Commands receive the context by reference, so tests can substitute scripted
/// adapters without touching process-level state.
pub struct ServiceContext {
    /// Filesystem for reading plan and config files.
    pub fs: Box<dyn FileSystem>,
    /// Executor for the provisioning tool.
    pub shell: Box<dyn ShellExecutor>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, shell: Box<dyn ShellExecutor>) -> Self {
        Self { fs, shell }
    }

    /// Creates a live context backed by the real disk and real processes.
    #[must_use]
    pub fn live() -> Self {
        Self::new(Box::new(LiveFileSystem), Box::new(LiveShellExecutor))
    }
}
