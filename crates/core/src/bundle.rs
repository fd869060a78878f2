//! Evaluator resource bundles.
//!
//! A bundle is a read-only directory shipped alongside an evaluator. Opening
//! one checks that every file the pipeline needs is present, so a missing
//! resource is reported before any external tool runs.

use std::path::{Path, PathBuf};

use crate::error::EvalResult;
use crate::manifest::{read_manifest, read_top_module, require_file, resolve_entries};

pub const FLOW_SCRIPT: &str = "flow.tcl";
pub const CONFIG_TEMPLATE: &str = "config.json";
pub const CONSTRAINTS: &str = "constraints.sdc";
pub const TB_MANIFEST: &str = "tb_files.f";
pub const TOP_MODULE: &str = "top_module.txt";

/// Resources for the synthesis/timing evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthBundle {
    pub flow_script: PathBuf,
    pub config_template: PathBuf,
    pub constraints: PathBuf,
}

impl SynthBundle {
    pub fn open(dir: impl AsRef<Path>) -> EvalResult<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            flow_script: require_file(dir, FLOW_SCRIPT, "resources")?,
            config_template: require_file(dir, CONFIG_TEMPLATE, "resources")?,
            constraints: require_file(dir, CONSTRAINTS, "resources")?,
        })
    }
}

/// Resources for the simulation evaluator, with the top module and
/// testbench list already read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimBundle {
    pub top_module: String,
    /// Testbench sources resolved against the bundle directory.
    pub tb_files: Vec<PathBuf>,
}

impl SimBundle {
    /// Open a simulation bundle. `top_module.txt` is checked first, then
    /// `tb_files.f`, matching the order the evaluator reports them.
    pub fn open(dir: impl AsRef<Path>) -> EvalResult<Self> {
        let dir = dir.as_ref();
        let top_file = require_file(dir, TOP_MODULE, "resources")?;
        let top_module = read_top_module(&top_file)?;
        let tb_manifest = require_file(dir, TB_MANIFEST, "resources")?;
        let tb_files = resolve_entries(&read_manifest(&tb_manifest), dir);
        Ok(Self { top_module, tb_files })
    }
}
