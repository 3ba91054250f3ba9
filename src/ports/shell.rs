//! Process execution port for running the provisioning tool.

use crate::error::PortError;

/// The output of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    /// The exit code of the process, or `-1` if it was killed by a signal.
    pub exit_code: i32,
    /// The captured standard output, unmodified.
    pub stdout: Vec<u8>,
    /// The captured standard error, lossily decoded for messages.
    pub stderr: String,
}

impl ShellOutput {
    /// Returns `true` when the process exited with code 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs external programs.
///
/// Abstracting execution lets the scan pipeline run against a stubbed
/// provisioning tool in tests.
pub trait ShellExecutor: Send + Sync {
    /// Runs `program` with `args` and captures its output.
    ///
    /// A non-zero exit is reported through [`ShellOutput::exit_code`], not as
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn run(&self, program: &str, args: &[String]) -> Result<ShellOutput, PortError>;

    /// Returns `true` if `program` resolves to an executable on the search path.
    fn which(&self, program: &str) -> bool;
}
