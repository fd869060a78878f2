//! Artifact locator: finds what an external tool left behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{EvalError, EvalResult};

/// Return the immediate subdirectory of `runs_root` with the newest
/// modification time. Plain files are ignored.
///
/// A missing root or a root without subdirectories is
/// [`EvalError::NoArtifact`], even when the tool itself exited cleanly.
pub fn latest_run_dir(runs_root: &Path) -> EvalResult<PathBuf> {
    let no_runs = || EvalError::NoArtifact(format!("No runs found under {}", runs_root.display()));
    if !runs_root.is_dir() {
        return Err(no_runs());
    }

    let entries = fs::read_dir(runs_root)
        .map_err(|e| EvalError::io(format!("failed to read {}", runs_root.display()), e))?;
    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry =
            entry.map_err(|e| EvalError::io(format!("failed to read {}", runs_root.display()), e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let modified = fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .map_err(|e| EvalError::io(format!("failed to stat {}", path.display()), e))?;
        let newer = latest.as_ref().map_or(true, |(best, _)| modified > *best);
        if newer {
            latest = Some((modified, path));
        }
    }

    latest.map(|(_, path)| path).ok_or_else(no_runs)
}

/// Name of the simulator executable generated for `top_module`.
pub fn simulation_executable_name(top_module: &str) -> String {
    format!("V{top_module}")
}

/// Path of the build makefile generated for `top_module`.
pub fn simulation_makefile_name(top_module: &str) -> String {
    format!("V{top_module}.mk")
}

/// Deterministic location of the compiled simulator; checked, not searched.
pub fn simulation_executable(design_dir: &Path, top_module: &str) -> EvalResult<PathBuf> {
    let exe = design_dir.join("obj_dir").join(simulation_executable_name(top_module));
    if exe.is_file() {
        Ok(exe)
    } else {
        Err(EvalError::NoArtifact(format!("Simulation executable not found at {}", exe.display())))
    }
}
