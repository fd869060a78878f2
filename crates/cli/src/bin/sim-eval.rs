use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use rtl_eval::commands::sim_command;

/// Simulation evaluator.
///
/// Compiles the design with its testbench, runs the simulation, and prints
/// the functionality score as a single JSON object on stdout.
#[derive(Parser, Debug)]
#[command(
    name = "sim-eval",
    version,
    about = "Score a design's functionality in simulation",
    long_about = None
)]
struct Cli {
    /// Path to the extracted design directory (must contain rtl.f).
    #[arg(long)]
    design: String,

    /// Evaluator bundle holding tb_files.f and top_module.txt.
    #[arg(long)]
    resources: String,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    rtl_eval::init_tracing();

    let code = sim_command(&cli.design, &cli.resources)?;
    Ok(ExitCode::from(code))
}
