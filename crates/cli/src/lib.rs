//! Frontend helpers shared by the `synth-eval` and `sim-eval` binaries.
//!
//! The binaries only parse flags; everything else lives in [`commands`] and
//! in `rtl-eval-core`.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub mod commands;

/// Canonicalize a user-supplied path if possible, falling back to the path
/// joined onto the current working directory (e.g. when it does not exist yet).
pub fn canonicalize_or_current(path: &str) -> Result<PathBuf> {
    let p = Path::new(path);
    if p == Path::new(".") {
        return env::current_dir().context("Failed to get current directory");
    }
    match p.canonicalize() {
        Ok(canon) => Ok(canon),
        Err(_) if p.is_absolute() => Ok(p.to_path_buf()),
        Err(_) => {
            let cwd = env::current_dir().context("Failed to get current directory")?;
            Ok(cwd.join(p))
        }
    }
}

/// Directory holding the running executable; the default synthesis bundle.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("Failed to locate current executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("Executable has no parent directory: {}", exe.display()))
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout stays reserved for the JSON result record.
/// `RUST_LOG` overrides the default `info` level. Only the first call takes
/// effect.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .ok();
}
