//! Provisioning tool selection and refresh-only plan generation.

use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use crate::context::ServiceContext;
use crate::error::Error;

/// Name of the temporary plan file written into the working directory.
pub const PLAN_FILE: &str = "drift-checker.plan";

/// Which provisioning binary produces the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerKind {
    /// OpenTofu (`tofu`).
    Tofu,
    /// Terraform (`terraform`).
    Terraform,
}

impl RunnerKind {
    /// Executable name.
    #[must_use]
    pub fn program(self) -> &'static str {
        match self {
            Self::Tofu => "tofu",
            Self::Terraform => "terraform",
        }
    }
}

impl fmt::Display for RunnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Picks `tofu` if available, otherwise `terraform`.
///
/// # Errors
///
/// Returns [`Error::RunnerNotFound`] when neither is on the search path.
pub fn select_runner(ctx: &ServiceContext) -> Result<RunnerKind, Error> {
    let runner = [RunnerKind::Tofu, RunnerKind::Terraform]
        .into_iter()
        .find(|kind| ctx.shell.which(kind.program()))
        .ok_or(Error::RunnerNotFound)?;
    debug!(%runner, "selected provisioning runner");
    Ok(runner)
}

/// Produces refresh-only plan JSON for the configuration in `dir`.
///
/// The bytes are returned as the runner wrote them; decoding is left to the
/// plan parser.
///
/// Runs two steps so it works across tool versions without streaming JSON:
///
/// ```text
/// <runner> -chdir=<dir> plan -refresh-only -out=drift-checker.plan
/// <runner> -chdir=<dir> show -json drift-checker.plan
/// ```
///
/// The plan file is removed once the first step has written it.
///
/// # Errors
///
/// Returns [`Error::Runner`] if either step cannot be spawned or exits non-zero.
pub fn refresh_only_plan_json(
    ctx: &ServiceContext,
    runner: RunnerKind,
    dir: &Path,
) -> Result<Vec<u8>, Error> {
    let chdir = format!("-chdir={}", dir.display());

    let plan_args =
        vec![chdir.clone(), "plan".into(), "-refresh-only".into(), format!("-out={PLAN_FILE}")];
    run_step(ctx, runner, "plan", &plan_args)?;

    let show_args = vec![chdir, "show".into(), "-json".into(), PLAN_FILE.into()];
    let shown = run_step(ctx, runner, "show -json", &show_args);

    let plan_path = dir.join(PLAN_FILE);
    if ctx.fs.exists(&plan_path) {
        if let Err(err) = ctx.fs.remove_file(&plan_path) {
            warn!(path = %plan_path.display(), %err, "failed to remove temporary plan file");
        }
    }

    shown
}

fn run_step(
    ctx: &ServiceContext,
    runner: RunnerKind,
    step: &'static str,
    args: &[String],
) -> Result<Vec<u8>, Error> {
    debug!(%runner, ?args, "running provisioning step");
    let output = ctx
        .shell
        .run(runner.program(), args)
        .map_err(|err| Error::Runner { runner, step, detail: err.to_string() })?;

    if !output.success() {
        warn!(%runner, step, exit_code = output.exit_code, "provisioning step failed");
        return Err(Error::Runner {
            runner,
            step,
            detail: format!("exit code {}\n{}", output.exit_code, output.stderr),
        });
    }
    Ok(output.stdout)
}
