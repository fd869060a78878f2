//! Line-oriented file manifests (`rtl.f`, `tb_files.f`) and `top_module.txt`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EvalError, EvalResult};

/// Design-side RTL manifest file name.
pub const RTL_MANIFEST: &str = "rtl.f";

/// Parse manifest text: one path per line, blank lines and `#` comments skipped.
pub fn parse_manifest(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read a manifest if it exists. A missing or unreadable file yields an
/// empty list; callers that require the file check for it first. Invalid
/// UTF-8 is decoded lossily so one bad byte never drops the other lines.
pub fn read_manifest(path: &Path) -> Vec<String> {
    fs::read(path)
        .map(|bytes| parse_manifest(&String::from_utf8_lossy(&bytes)))
        .unwrap_or_default()
}

/// Resolve manifest entries against `base`, canonicalizing where the file exists.
pub fn resolve_entries(entries: &[String], base: &Path) -> Vec<PathBuf> {
    entries
        .iter()
        .map(|entry| {
            let joined = base.join(entry);
            fs::canonicalize(&joined).unwrap_or(joined)
        })
        .collect()
}

/// Read the single-line top-module name, trimmed.
pub fn read_top_module(path: &Path) -> EvalResult<String> {
    let text = fs::read_to_string(path)
        .map_err(|e| EvalError::io(format!("failed to read {}", path.display()), e))?;
    Ok(text.trim().to_string())
}

/// Fail with [`EvalError::MissingResource`] unless `dir/name` is a file.
pub fn require_file(dir: &Path, name: &str, location: &str) -> EvalResult<PathBuf> {
    let path = dir.join(name);
    if path.is_file() {
        Ok(path)
    } else {
        Err(EvalError::MissingResource {
            name: name.to_string(),
            location: location.to_string(),
            path,
        })
    }
}

/// Fail with [`EvalError::MissingResource`] unless `path` is a directory.
pub fn require_dir(path: &Path, name: &str, location: &str) -> EvalResult<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(EvalError::MissingResource {
            name: name.to_string(),
            location: location.to_string(),
            path: path.to_path_buf(),
        })
    }
}
