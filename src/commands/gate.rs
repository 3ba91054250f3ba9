//! `drift-checker gate` command.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::cli::GateArgs;
use crate::config::FileConfig;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::plan::{classify, ClassifiedStats};
use crate::policy::{evaluate, Policy, Verdict};
use crate::report::{GateSummary, ReportFormat};
use crate::Outcome;

/// Fully resolved `gate` options after merging flags and config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOptions {
    /// Plan JSON to read.
    pub input: PathBuf,
    /// Report format.
    pub format: ReportFormat,
    /// Include destructive addresses in the report.
    pub list: bool,
    /// Gate policy.
    pub policy: Policy,
}

impl GateOptions {
    /// Merges command-line flags over config file values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for an unknown format.
    pub fn resolve(args: &GateArgs, config: &FileConfig) -> Result<Self, Error> {
        let format = ReportFormat::resolve(args.format.as_deref(), config.format.as_deref())?;
        let ceiling = |flag: i64, file: Option<i64>| {
            if flag >= 0 {
                Policy::ceiling(flag)
            } else {
                file.and_then(Policy::ceiling)
            }
        };

        Ok(Self {
            input: args.input.clone(),
            format,
            list: args.list || config.list,
            policy: Policy {
                strict: args.strict || config.strict,
                max_deletes: ceiling(args.max_deletes, config.max_deletes),
                max_replaces: ceiling(args.max_replaces, config.max_replaces),
                fail_on_updates: false,
            },
        })
    }
}

/// Everything a `gate` invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateRun {
    /// Classification of the plan.
    pub stats: ClassifiedStats,
    /// Gate verdict.
    pub verdict: Verdict,
    /// Rendered report.
    pub report: String,
}

/// Reads, classifies and evaluates the plan without printing anything.
///
/// # Errors
///
/// Returns an error if the input cannot be read, is not a valid plan, or the
/// report cannot be rendered.
pub fn execute(ctx: &ServiceContext, opts: &GateOptions) -> Result<GateRun, Error> {
    let bytes =
        ctx.fs.read(&opts.input).map_err(|source| Error::Io { path: opts.input.clone(), source })?;
    let stats = classify(&bytes)?;
    let report = GateSummary::from_stats(&stats, opts.list).render(opts.format)?;
    let verdict = evaluate(&stats, &opts.policy);

    debug!(
        updates = stats.updates,
        replaces = stats.replaces,
        deletes = stats.deletes,
        destructive_total = stats.destructive_total(),
        max_deletes = ?opts.policy.max_deletes,
        max_replaces = ?opts.policy.max_replaces,
        strict = opts.policy.strict,
        should_fail = verdict.should_fail,
        "gate evaluation"
    );

    Ok(GateRun { stats, verdict, report })
}

/// Execute the `gate` command, printing the report to stdout.
///
/// # Errors
///
/// Returns an error if option resolution or [`execute`] fails.
pub fn run(ctx: &ServiceContext, args: &GateArgs, config: &FileConfig) -> Result<Outcome, Error> {
    let opts = GateOptions::resolve(args, config)?;
    let result = execute(ctx, &opts)?;
    println!("{}", result.report);

    let outcome = Outcome::from_verdict(&result.verdict);
    if let Outcome::PolicyFail(reason) = outcome {
        warn!(
            %reason,
            deletes = result.stats.deletes,
            replaces = result.stats.replaces,
            "destructive change gate failed"
        );
    }
    Ok(outcome)
}
