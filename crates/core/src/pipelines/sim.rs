use std::path::{Path, PathBuf};

use tracing::info;

use crate::bundle::{SimBundle, TOP_MODULE};
use crate::config::ToolConfig;
use crate::driver::{run_stage, Invocation, Stage, ToolRunner};
use crate::error::EvalResult;
use crate::extract::parse_func_score;
use crate::locator::{simulation_executable, simulation_makefile_name};
use crate::manifest::{require_file, RTL_MANIFEST};
use crate::result::{SimDetails, SimReport};

const NOTE: &str = "Evaluator ran simple Verilator simulation";

/// Inputs for one simulation evaluation.
#[derive(Debug, Clone)]
pub struct SimRequest {
    pub design_dir: PathBuf,
    pub resources_dir: PathBuf,
    pub tools: ToolConfig,
}

/// HDL-to-native compile of the design plus testbench.
pub fn compile_invocation(
    tools: &ToolConfig,
    design_dir: &Path,
    rtl_manifest: &Path,
    bundle: &SimBundle,
) -> Invocation {
    Invocation::new(Stage::HdlCompile, &tools.verilator, design_dir)
        .args(["--timing", "--binary", "-Wall", "--Wno-fatal", "--top-module"])
        .arg(&bundle.top_module)
        .args(["--cc", "--exe", "-CFLAGS", "-std=c++17", "-f"])
        .arg(rtl_manifest)
        .args(&bundle.tb_files)
        .arg("--trace")
}

/// Native build of the generated simulator sources.
pub fn build_invocation(tools: &ToolConfig, design_dir: &Path, top: &str) -> Invocation {
    Invocation::new(Stage::NativeBuild, &tools.make, design_dir)
        .args(["-C", "obj_dir", "-j", "-f"])
        .arg(simulation_makefile_name(top))
}

/// Run the simulation evaluation end to end.
pub fn run_simulation(request: &SimRequest, runner: &dyn ToolRunner) -> EvalResult<SimReport> {
    let design_dir = &request.design_dir;
    require_file(&request.resources_dir, TOP_MODULE, "resources")?;
    let rtl_manifest = require_file(design_dir, RTL_MANIFEST, "design directory")?;
    let bundle = SimBundle::open(&request.resources_dir)?;

    run_stage(runner, &compile_invocation(&request.tools, design_dir, &rtl_manifest, &bundle))?;
    run_stage(runner, &build_invocation(&request.tools, design_dir, &bundle.top_module))?;

    let exe = simulation_executable(design_dir, &bundle.top_module)?;
    let outcome = run_stage(runner, &Invocation::new(Stage::Simulation, &exe, design_dir))?;
    let simulation_output = outcome.combined();

    let score = parse_func_score(&simulation_output);
    info!(?score, top = %bundle.top_module, "simulation finished");

    Ok(SimReport {
        functionality_score: score.unwrap_or(0.0),
        details: SimDetails {
            note: NOTE.to_string(),
            design: design_dir.clone(),
            top_module: bundle.top_module,
            tb_files: bundle.tb_files,
        },
        simulation_output,
    })
}
