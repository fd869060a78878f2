use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::bundle::SynthBundle;
use crate::config::ToolConfig;
use crate::driver::{run_stage, Invocation, Stage, ToolRunner};
use crate::error::{EvalError, EvalResult};
use crate::extract::{extract_from_file, parse_area, parse_period, parse_wns};
use crate::locator::latest_run_dir;
use crate::manifest::require_dir;
use crate::result::SynthMetrics;
use crate::stager::{replace_tree, stage_synthesis, StagedDesign, Workspace};

/// Statistics report holding the chip area, relative to a run directory.
pub const AREA_REPORT: &str = "reports/synthesis/1-synthesis.DELAY_3.stat.rpt";
/// Post-synthesis timing report holding the slack, relative to a run directory.
pub const TIMING_REPORT: &str = "reports/synthesis/2-syn_sta.max.rpt";

/// Inputs for one synthesis/timing evaluation.
#[derive(Debug, Clone)]
pub struct SynthRequest {
    pub design_dir: PathBuf,
    pub out_dir: PathBuf,
    pub resources_dir: PathBuf,
    pub workspace: Workspace,
    pub tools: ToolConfig,
}

impl SynthRequest {
    pub fn results_file(&self) -> PathBuf {
        self.out_dir.join("results.json")
    }
}

/// Build the flow-tool command line for a staged design.
pub fn flow_invocation(tools: &ToolConfig, staged: &StagedDesign) -> Invocation {
    Invocation::new(Stage::Flow, &tools.tclsh, &staged.dir)
        .arg(&staged.flow_script)
        .arg("-design")
        .arg(&staged.dir)
        .arg("-config")
        .arg(&staged.config)
}

/// Run the synthesis/timing evaluation end to end.
pub fn run_synthesis(request: &SynthRequest, runner: &dyn ToolRunner) -> EvalResult<SynthMetrics> {
    fs::create_dir_all(&request.out_dir).map_err(|e| {
        EvalError::io(format!("failed to create {}", request.out_dir.display()), e)
    })?;
    let design = request.design_dir.display().to_string();
    require_dir(&request.design_dir, "design directory", &design)?;
    let bundle = SynthBundle::open(&request.resources_dir)?;

    let staged = stage_synthesis(&request.workspace, &request.design_dir, &bundle)?;
    run_stage(runner, &flow_invocation(&request.tools, &staged))?;

    let run_dir = latest_run_dir(&staged.runs_dir())?;
    info!(run = %run_dir.display(), "using latest run");

    let area = extract_from_file(&run_dir.join(AREA_REPORT), parse_area);
    let period = extract_from_file(&staged.constraints, parse_period);
    let wns = extract_from_file(&run_dir.join(TIMING_REPORT), parse_wns);

    let reports_src = run_dir.join("reports");
    let reports_dir = if reports_src.is_dir() {
        let dst = request.out_dir.join("reports");
        replace_tree(&reports_src, &dst)?;
        Some(dst)
    } else {
        None
    };

    Ok(SynthMetrics::new(area, period, wns, run_dir, reports_dir))
}
