//! Live shell executor using `std::process::Command`.

use std::env;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use crate::error::PortError;
use crate::ports::shell::{ShellExecutor, ShellOutput};

/// Live executor that spawns real processes.
pub struct LiveShellExecutor;

impl ShellExecutor for LiveShellExecutor {
    fn run(&self, program: &str, args: &[String]) -> Result<ShellOutput, PortError> {
        let output = Command::new(program).args(args).output()?;
        Ok(ShellOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn which(&self, program: &str) -> bool {
        env::current_dir().is_ok_and(|cwd| resolves_in(program, env::var_os("PATH"), &cwd))
    }
}

/// Returns `true` if `program` is an executable file on `search_path`.
fn resolves_in(program: &str, search_path: Option<impl AsRef<OsStr>>, cwd: &Path) -> bool {
    which::which_in(program, search_path, cwd).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_program_with_args() {
        let shell = LiveShellExecutor;
        let result = shell.run("sh", &["-c".to_string(), "echo hello".to_string()]).unwrap();

        assert!(result.success());
        assert_eq!(result.stdout, b"hello\n");
        assert!(result.stderr.is_empty());
    }

    #[test]
    fn captures_exit_code() {
        let shell = LiveShellExecutor;
        let result = shell.run("sh", &["-c".to_string(), "exit 42".to_string()]).unwrap();

        assert_eq!(result.exit_code, 42);
        assert!(!result.success());
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let shell = LiveShellExecutor;
        assert!(shell.run("drift-checker-no-such-binary", &[]).is_err());
    }

    #[test]
    fn which_finds_sh_but_not_missing_binary() {
        let shell = LiveShellExecutor;
        assert!(shell.which("sh"));
        assert!(!shell.which("drift-checker-no-such-binary"));
    }

    #[test]
    fn stdout_keeps_raw_bytes() {
        let shell = LiveShellExecutor;
        let result = shell.run("sh", &["-c".to_string(), r"printf 'a\377b'".to_string()]).unwrap();

        assert_eq!(result.stdout, b"a\xffb");
    }

    #[cfg(unix)]
    #[test]
    fn which_skips_non_executable_files() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drift-checker-plain-file");
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        assert!(!resolves_in("drift-checker-plain-file", Some(dir.path()), dir.path()));

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(resolves_in("drift-checker-plain-file", Some(dir.path()), dir.path()));
    }
}
