//! Binary entrypoint for the `drift-checker` CLI.

use std::process::ExitCode;

use drift_checker::{Error, Outcome};

/// Exit status for a failing strict gate.
const POLICY_FAIL: u8 = 2;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    drift_checker::logging::init();

    match drift_checker::run(std::env::args_os()) {
        Ok(Outcome::Pass) => ExitCode::SUCCESS,
        Ok(Outcome::PolicyFail(_)) => ExitCode::from(POLICY_FAIL),
        // clap's own usage exit code is 2, which would read as a policy failure.
        Err(Error::Usage(err)) => {
            let _ = err.print();
            if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
