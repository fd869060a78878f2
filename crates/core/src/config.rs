use std::path::PathBuf;

/// Environment variable naming the synthesis flow interpreter.
pub const TCLSH_ENV: &str = "TCLSH_BIN";
/// Environment variable naming the HDL-to-native compiler.
pub const VERILATOR_ENV: &str = "VERILATOR_BIN";
/// Environment variable naming the native build tool.
pub const MAKE_ENV: &str = "MAKE_BIN";

/// Paths of the external programs the evaluators shell out to.
///
/// Defaults are bare program names resolved through `PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub tclsh: PathBuf,
    pub verilator: PathBuf,
    pub make: PathBuf,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tclsh: PathBuf::from("tclsh"),
            verilator: PathBuf::from("verilator"),
            make: PathBuf::from("make"),
        }
    }
}

impl ToolConfig {
    /// Resolve tool paths from `TCLSH_BIN`, `VERILATOR_BIN` and `MAKE_BIN`,
    /// falling back to the defaults for any variable that is unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tclsh: env_path(TCLSH_ENV).unwrap_or(defaults.tclsh),
            verilator: env_path(VERILATOR_ENV).unwrap_or(defaults.verilator),
            make: env_path(MAKE_ENV).unwrap_or(defaults.make),
        }
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key).filter(|v| !v.is_empty()).map(PathBuf::from)
}
