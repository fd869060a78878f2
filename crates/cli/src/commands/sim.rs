use std::io::{self, Write};

use anyhow::{Context, Result};
use rtl_eval_core::pipelines::{run_simulation, SimRequest};
use rtl_eval_core::{ProcessRunner, ResultRecord, ToolConfig, ToolRunner};
use tracing::error;

use crate::canonicalize_or_current;

/// Run the simulation evaluator against the real toolchain.
///
/// Returns the process exit code: 0 on success, 1 when a failure record was
/// emitted.
pub fn sim_command(design: &str, resources: &str) -> Result<u8> {
    let request = SimRequest {
        design_dir: canonicalize_or_current(design)?,
        resources_dir: canonicalize_or_current(resources)?,
        tools: ToolConfig::from_env(),
    };
    let stdout = io::stdout();
    run_sim_eval(&request, &ProcessRunner, &mut stdout.lock())
}

/// Evaluate `request` with `runner` and print exactly one result record.
pub fn run_sim_eval(
    request: &SimRequest,
    runner: &dyn ToolRunner,
    stdout: &mut dyn Write,
) -> Result<u8> {
    let outcome = run_simulation(request, runner);
    if let Err(err) = &outcome {
        error!(error = %err, "simulation evaluation failed");
    }
    let record = ResultRecord::from(outcome);
    record.emit(None, stdout).context("Failed to emit simulation result")?;
    Ok(record.exit_code())
}
