//! `drift-checker scan` command.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, warn};

use crate::cli::ScanArgs;
use crate::config::FileConfig;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::plan::{classify, ClassifiedStats};
use crate::policy::{evaluate, Policy, Verdict};
use crate::report::{DriftSummary, ReportFormat};
use crate::runner::{refresh_only_plan_json, select_runner, RunnerKind};
use crate::Outcome;

/// Resolved `scan` options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Working directory handed to the runner via `-chdir`.
    pub path: PathBuf,
    /// Report format.
    pub format: ReportFormat,
    /// Fail on any drift.
    pub strict: bool,
}

impl ScanOptions {
    /// Merges command-line flags over config file values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for an unknown format.
    pub fn resolve(args: &ScanArgs, config: &FileConfig) -> Result<Self, Error> {
        Ok(Self {
            path: args.path.clone(),
            format: ReportFormat::resolve(args.format.as_deref(), config.format.as_deref())?,
            strict: args.strict || config.strict,
        })
    }

    fn policy(&self) -> Policy {
        Policy { strict: self.strict, fail_on_updates: true, ..Policy::default() }
    }
}

/// Everything a `scan` invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRun {
    /// The runner that produced the plan.
    pub runner: RunnerKind,
    /// Classification of the refresh-only plan.
    pub stats: ClassifiedStats,
    /// Verdict under the scan policy.
    pub verdict: Verdict,
    /// Rendered report.
    pub report: String,
}

/// Produces and classifies a refresh-only plan without printing anything.
///
/// # Errors
///
/// Returns an error if no runner is available, the runner fails, or its output
/// is not a valid plan.
pub fn execute(ctx: &ServiceContext, opts: &ScanOptions) -> Result<ScanRun, Error> {
    let runner = select_runner(ctx)?;
    let plan_json = refresh_only_plan_json(ctx, runner, &opts.path)?;
    let stats = classify(&plan_json)?;
    let report = DriftSummary::from_stats(&stats).render(opts.format, runner)?;
    let verdict = evaluate(&stats, &opts.policy());
    Ok(ScanRun { runner, stats, verdict, report })
}

/// Execute the `scan` command, printing the report to stdout.
///
/// # Errors
///
/// Returns an error if option resolution or [`execute`] fails.
pub fn run(ctx: &ServiceContext, args: &ScanArgs, config: &FileConfig) -> Result<Outcome, Error> {
    let opts = ScanOptions::resolve(args, config)?;
    info!(path = %opts.path.display(), strict = opts.strict, "scan parameters");

    let started = Instant::now();
    let result = execute(ctx, &opts)?;
    info!(
        runner = %result.runner,
        drifted = result.stats.drift_count(),
        duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "infrastructure scan completed"
    );
    println!("{}", result.report);

    let outcome = Outcome::from_verdict(&result.verdict);
    if let Outcome::PolicyFail(reason) = outcome {
        warn!(%reason, drifted = result.stats.drift_count(), "drift check failed");
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::{StubFileSystem, StubShell};
    use crate::policy::FailReason;
    use crate::ports::ShellOutput;

    const DRIFT_PLAN: &str = r#"{"resource_changes": [
        {"address": "aws_instance.web", "change": {"actions": ["update"]}},
        {"address": "aws_s3_bucket.logs", "change": {"actions": ["delete"]}},
        {"address": "aws_db_instance.main", "change": {"actions": ["create", "delete"]}}
    ]}"#;

    fn ctx_showing(plan_json: impl AsRef<[u8]>) -> ServiceContext {
        let shell = StubShell::default()
            .with_programs(&["tofu"])
            .respond(ShellOutput::default())
            .respond(ShellOutput { stdout: plan_json.as_ref().to_vec(), ..ShellOutput::default() });
        ServiceContext::new(Box::new(StubFileSystem::default()), Box::new(shell))
    }

    fn opts(strict: bool, format: ReportFormat) -> ScanOptions {
        ScanOptions { path: PathBuf::from("."), format, strict }
    }

    #[test]
    fn strict_scan_fails_on_drift() {
        let ctx = ctx_showing(DRIFT_PLAN);
        let result = execute(&ctx, &opts(true, ReportFormat::Markdown)).unwrap();

        assert_eq!(result.runner, RunnerKind::Tofu);
        assert_eq!(result.stats.drift_count(), 3);
        assert!(result.report.contains("## Drift Summary (tofu)"));
        assert_eq!(
            Outcome::from_verdict(&result.verdict),
            Outcome::PolicyFail(FailReason::DestructivePresent)
        );
    }

    #[test]
    fn strict_scan_fails_on_updates_alone() {
        let ctx = ctx_showing(
            r#"{"resource_changes": [{"address": "a.b", "change": {"actions": ["update"]}}]}"#,
        );
        let result = execute(&ctx, &opts(true, ReportFormat::Text)).unwrap();

        assert_eq!(
            Outcome::from_verdict(&result.verdict),
            Outcome::PolicyFail(FailReason::DriftPresent)
        );
    }

    #[test]
    fn clean_scan_passes() {
        let ctx = ctx_showing(r#"{"format_version": "1.2"}"#);
        let result = execute(&ctx, &opts(true, ReportFormat::Json)).unwrap();

        assert_eq!(Outcome::from_verdict(&result.verdict), Outcome::Pass);
        let summary: DriftSummary = serde_json::from_str(&result.report).unwrap();
        assert_eq!(summary, DriftSummary::default());
    }

    #[test]
    fn non_strict_scan_reports_but_passes() {
        let ctx = ctx_showing(DRIFT_PLAN);
        let result = execute(&ctx, &opts(false, ReportFormat::Markdown)).unwrap();

        assert!(result.verdict.drift_present);
        assert_eq!(Outcome::from_verdict(&result.verdict), Outcome::Pass);
    }

    #[test]
    fn runner_failure_is_an_error() {
        let shell = StubShell::default().with_programs(&["terraform"]).respond(ShellOutput {
            exit_code: 1,
            stderr: "Error: Backend initialization required".into(),
            ..ShellOutput::default()
        });
        let ctx = ServiceContext::new(Box::new(StubFileSystem::default()), Box::new(shell));

        let err = execute(&ctx, &opts(true, ReportFormat::Markdown)).unwrap_err();
        assert!(matches!(err, Error::Runner { runner: RunnerKind::Terraform, .. }));
    }

    #[test]
    fn missing_runner_is_an_error() {
        let ctx = ServiceContext::new(
            Box::new(StubFileSystem::default()),
            Box::new(StubShell::default()),
        );
        let err = execute(&ctx, &opts(false, ReportFormat::Markdown)).unwrap_err();
        assert!(matches!(err, Error::RunnerNotFound));
    }

    #[test]
    fn malformed_runner_output_is_an_error() {
        let ctx = ctx_showing("Error: not json");
        let err = execute(&ctx, &opts(false, ReportFormat::Markdown)).unwrap_err();
        assert!(matches!(err, Error::MalformedPlan(_)));
    }

    #[test]
    fn invalid_utf8_runner_output_is_an_error() {
        let mut plan = br#"{"resource_changes": [{"address": "a"#.to_vec();
        plan.push(0xff);
        plan.extend_from_slice(br#"", "change": {"actions": ["delete"]}}]}"#);
        let ctx = ctx_showing(plan);
        let err = execute(&ctx, &opts(true, ReportFormat::Markdown)).unwrap_err();
        assert!(matches!(err, Error::MalformedPlan(_)));
    }
}
