//! Input stager: builds the working copy the synthesis flow expects.
//!
//! The flow tool reads designs from `<flow_root>/designs/<name>`. Staging
//! resets that directory, copies the design in, drops the bundle's
//! configuration template and constraints next to it, and rewrites the
//! copied configuration. The bundle itself is never modified.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::bundle::{SynthBundle, CONFIG_TEMPLATE, CONSTRAINTS, FLOW_SCRIPT};
use crate::error::{EvalError, EvalResult};
use crate::manifest::{read_manifest, RTL_MANIFEST};

/// Prefix the flow tool resolves relative to the design directory.
pub const DIR_MARKER: &str = "dir::";

const VERILOG_FILES_KEY: &str = "VERILOG_FILES";
const SDC_KEY: &str = "BASE_SDC_FILE";

/// The external flow tool's root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn designs_dir(&self) -> PathBuf {
        self.root.join("designs")
    }

    pub fn flow_script(&self) -> PathBuf {
        self.root.join(FLOW_SCRIPT)
    }

    /// Remove any previous copy of the design and copy it in fresh.
    ///
    /// The target is named after the design directory's final component.
    pub fn reset_design(&self, design_dir: &Path) -> EvalResult<PathBuf> {
        let name = design_dir.file_name().ok_or_else(|| EvalError::MissingResource {
            name: "design directory name".to_string(),
            location: design_dir.display().to_string(),
            path: design_dir.to_path_buf(),
        })?;
        let target = self.designs_dir().join(name);
        if target.exists() {
            fs::remove_dir_all(&target).map_err(|e| {
                EvalError::io(format!("failed to remove stale design {}", target.display()), e)
            })?;
        }
        copy_tree(design_dir, &target)?;
        Ok(target)
    }
}

/// Paths inside a staged design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedDesign {
    pub dir: PathBuf,
    pub config: PathBuf,
    pub constraints: PathBuf,
    pub flow_script: PathBuf,
}

impl StagedDesign {
    pub fn runs_dir(&self) -> PathBuf {
        self.dir.join("runs")
    }
}

/// Stage a design and bundle into `workspace` for one flow invocation.
pub fn stage_synthesis(
    workspace: &Workspace,
    design_dir: &Path,
    bundle: &SynthBundle,
) -> EvalResult<StagedDesign> {
    let dir = workspace.reset_design(design_dir)?;

    let flow_script = workspace.flow_script();
    copy_file(&bundle.flow_script, &flow_script)?;
    let config = dir.join(CONFIG_TEMPLATE);
    copy_file(&bundle.config_template, &config)?;
    let constraints = dir.join(CONSTRAINTS);
    copy_file(&bundle.constraints, &constraints)?;

    let entries = read_manifest(&dir.join(RTL_MANIFEST));
    let rewritten = patch_config(&config, &entries, CONSTRAINTS)?;
    info!(design = %dir.display(), sources = rewritten, "staged design");

    Ok(StagedDesign { dir, config, constraints, flow_script })
}

/// Rewrite a flow configuration in place.
///
/// `VERILOG_FILES` is replaced by the manifest entries, each prefixed with
/// [`DIR_MARKER`]. An empty manifest keeps the template's list. The
/// constraints reference always points at `sdc_name`. Returns the number of
/// source entries written (0 when the template list was kept).
pub fn patch_config(config_path: &Path, entries: &[String], sdc_name: &str) -> EvalResult<usize> {
    let text = fs::read_to_string(config_path)
        .map_err(|e| EvalError::io(format!("failed to read {}", config_path.display()), e))?;
    let mut config: Value = serde_json::from_str(&text).map_err(|e| EvalError::InvalidConfig {
        path: config_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let object = config.as_object_mut().ok_or_else(|| EvalError::InvalidConfig {
        path: config_path.to_path_buf(),
        reason: "expected a JSON object".to_string(),
    })?;

    if entries.is_empty() {
        warn!("RTL manifest missing or empty; keeping template {VERILOG_FILES_KEY}");
    } else {
        let files = entries.iter().map(|e| Value::String(format!("{DIR_MARKER}{e}"))).collect();
        object.insert(VERILOG_FILES_KEY.to_string(), Value::Array(files));
    }
    object.insert(SDC_KEY.to_string(), Value::String(format!("{DIR_MARKER}{sdc_name}")));

    let body = serde_json::to_string_pretty(&config).map_err(|e| EvalError::InvalidConfig {
        path: config_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    fs::write(config_path, body)
        .map_err(|e| EvalError::io(format!("failed to write {}", config_path.display()), e))?;
    Ok(entries.len())
}

/// Recursively copy `src` into `dst`, creating `dst` and following symlinks.
pub fn copy_tree(src: &Path, dst: &Path) -> EvalResult<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry
            .map_err(|e| EvalError::io(format!("failed to walk {}", src.display()), e.into()))?;
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| EvalError::io(format!("failed to create {}", target.display()), e))?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Replace `dst` with a fresh copy of `src`.
pub fn replace_tree(src: &Path, dst: &Path) -> EvalResult<()> {
    if dst.exists() {
        fs::remove_dir_all(dst)
            .map_err(|e| EvalError::io(format!("failed to remove {}", dst.display()), e))?;
    }
    copy_tree(src, dst)
}

fn copy_file(src: &Path, dst: &Path) -> EvalResult<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| EvalError::io(format!("failed to create {}", parent.display()), e))?;
    }
    fs::copy(src, dst).map_err(|e| {
        EvalError::io(format!("failed to copy {} to {}", src.display(), dst.display()), e)
    })?;
    Ok(())
}
