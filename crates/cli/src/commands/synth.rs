use std::io::{self, Write};

use anyhow::{Context, Result};
use rtl_eval_core::pipelines::{run_synthesis, SynthRequest};
use rtl_eval_core::stager::Workspace;
use rtl_eval_core::{ProcessRunner, ResultRecord, ToolConfig, ToolRunner};
use tracing::error;

use crate::{canonicalize_or_current, executable_dir};

/// Run the synthesis/timing evaluator against the real toolchain.
///
/// Returns the process exit code: 0 on success, 1 when a failure record was
/// emitted.
pub fn synth_command(
    design: &str,
    out: &str,
    resources: Option<&str>,
    flow_root: &str,
) -> Result<u8> {
    let resources_dir = match resources {
        Some(dir) => canonicalize_or_current(dir)?,
        None => executable_dir()?,
    };
    let request = SynthRequest {
        design_dir: canonicalize_or_current(design)?,
        out_dir: canonicalize_or_current(out)?,
        resources_dir,
        workspace: Workspace::new(canonicalize_or_current(flow_root)?),
        tools: ToolConfig::from_env(),
    };
    let stdout = io::stdout();
    run_synth_eval(&request, &ProcessRunner, &mut stdout.lock())
}

/// Evaluate `request` with `runner` and emit exactly one result record.
///
/// The record goes to `stdout` and to `<out>/results.json`; the file is
/// skipped only when the output directory could not be created.
pub fn run_synth_eval(
    request: &SynthRequest,
    runner: &dyn ToolRunner,
    stdout: &mut dyn Write,
) -> Result<u8> {
    let outcome = run_synthesis(request, runner);
    if let Err(err) = &outcome {
        error!(error = %err, "synthesis evaluation failed");
    }
    let record = ResultRecord::from(outcome);

    let results_file = request.results_file();
    let target = request.out_dir.is_dir().then_some(results_file.as_path());
    record.emit(target, stdout).context("Failed to emit synthesis result")?;
    Ok(record.exit_code())
}
