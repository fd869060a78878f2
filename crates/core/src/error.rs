use std::path::PathBuf;

use thiserror::Error;

use crate::driver::Stage;

/// Error type for evaluator pipelines.
///
/// Every variant is a hard failure that ends the invocation. Metrics that
/// could not be scraped from a report are not errors; they surface as
/// `None` in the result record instead.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A required input file is missing. No external tool has been started.
    #[error("{name} not found in {location}")]
    MissingResource { name: String, location: String, path: PathBuf },

    /// An external tool exited non-zero (or was killed by a signal).
    #[error("{}", .stage.failure_message())]
    StageFailed { stage: Stage, exit_code: Option<i32>, log: String },

    /// The tool reported success but left nothing we can read.
    #[error("{0}")]
    NoArtifact(String),

    /// The external program could not be started at all.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem failure while staging inputs or persisting outputs.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration template could not be read as a JSON object.
    #[error("invalid configuration template {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },
}

impl EvalError {
    /// Wrap an I/O error with a short description of what was being attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        EvalError::Io { context: context.into(), source }
    }

    /// Captured tool output for stage failures, if any.
    pub fn tool_log(&self) -> Option<&str> {
        match self {
            EvalError::StageFailed { log, .. } => Some(log),
            _ => None,
        }
    }

    /// Stage that produced this error, if it came from an external tool.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            EvalError::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Convenience result type for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
