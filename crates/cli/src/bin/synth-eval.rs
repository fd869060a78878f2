use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use rtl_eval::commands::synth_command;

/// Synthesis/timing evaluator.
///
/// Stages the design into the flow workspace, runs the flow, and reports
/// area, clock period, worst negative slack and achievable frequency as a
/// single JSON object on stdout and in `<out>/results.json`.
#[derive(Parser, Debug)]
#[command(
    name = "synth-eval",
    version,
    about = "Score a design's area and timing",
    long_about = None
)]
struct Cli {
    /// Path to the extracted design directory.
    #[arg(long)]
    design: String,

    /// Output directory for results.json and the copied reports (created if absent).
    #[arg(long)]
    out: String,

    /// Evaluator bundle holding flow.tcl, config.json and constraints.sdc.
    /// Defaults to the directory containing this executable.
    #[arg(long, env = "SYNTH_EVAL_RESOURCES")]
    resources: Option<String>,

    /// Root of the external flow installation.
    #[arg(long, env = "OPENLANE_ROOT", default_value = "/openlane")]
    flow_root: String,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    rtl_eval::init_tracing();

    let code = synth_command(&cli.design, &cli.out, cli.resources.as_deref(), &cli.flow_root)?;
    Ok(ExitCode::from(code))
}
