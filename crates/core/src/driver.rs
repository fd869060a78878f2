//! Stage driver: runs external tools as blocking subprocesses.
//!
//! The [`ToolRunner`] trait is the seam between the pipelines and the
//! operating system. [`ProcessRunner`] is the real implementation; tests
//! substitute a recording fake so no toolchain has to be installed.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;

use tracing::info;

use crate::error::{EvalError, EvalResult};

/// External-tool steps known to the evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Synthesis + static timing flow (`flow.tcl`).
    Flow,
    /// HDL-to-native compilation (verilator).
    HdlCompile,
    /// Native build of the generated simulator (make).
    NativeBuild,
    /// Execution of the compiled simulation binary.
    Simulation,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Flow => "flow",
            Stage::HdlCompile => "hdl_compile",
            Stage::NativeBuild => "native_build",
            Stage::Simulation => "simulation",
        }
    }

    /// Human-readable message placed in the failure record.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Stage::Flow => "flow.tcl failed",
            Stage::HdlCompile => "Verilator compile failed",
            Stage::NativeBuild => "Make failed when building simulation",
            Stage::Simulation => "Simulation failed",
        }
    }

    /// Key under which the captured log is attached to a failure record.
    pub fn log_key(&self) -> &'static str {
        match self {
            Stage::Flow => "flow_log",
            Stage::HdlCompile | Stage::NativeBuild | Stage::Simulation => "verilator_log",
        }
    }
}

/// A fully resolved command line for one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub stage: Stage,
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(stage: Stage, program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self { stage, program: program.into(), args: Vec::new(), cwd: cwd.into() }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Space-joined rendering for logs.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().to_string()));
        parts.join(" ")
    }
}

/// Captured result of a finished subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
    pub stage: Stage,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl StageOutcome {
    pub fn passed(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// stdout followed by stderr.
    pub fn combined(&self) -> String {
        let mut log = String::with_capacity(self.stdout.len() + self.stderr.len());
        log.push_str(&self.stdout);
        log.push_str(&self.stderr);
        log
    }
}

/// Executes invocations. Implementations must not treat a non-zero exit as
/// an error; that decision belongs to [`run_stage`].
pub trait ToolRunner {
    fn run(&self, invocation: &Invocation) -> EvalResult<StageOutcome>;
}

/// Runs invocations with `std::process::Command`, blocking until exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> EvalResult<StageOutcome> {
        let start = Instant::now();
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .output()
            .map_err(|source| EvalError::Spawn {
                program: invocation.program.display().to_string(),
                source,
            })?;

        Ok(StageOutcome {
            stage: invocation.stage,
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// Run one stage with the fail-fast policy: a non-zero exit becomes
/// [`EvalError::StageFailed`] carrying the captured log verbatim.
pub fn run_stage(runner: &dyn ToolRunner, invocation: &Invocation) -> EvalResult<StageOutcome> {
    info!(stage = invocation.stage.name(), command = %invocation.display(), "starting stage");
    let outcome = runner.run(invocation)?;
    info!(
        stage = invocation.stage.name(),
        exit_code = ?outcome.exit_code,
        duration_ms = outcome.duration_ms,
        "stage finished"
    );
    if !outcome.passed() {
        return Err(EvalError::StageFailed {
            stage: invocation.stage,
            exit_code: outcome.exit_code,
            log: outcome.combined(),
        });
    }
    Ok(outcome)
}
