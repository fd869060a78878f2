//! rtl-eval-core
//!
//! Core library for scoring hardware designs with external toolchains.
//!
//! Both evaluators follow the same shape: the input stager prepares what the
//! tool expects, the stage driver runs it, the locator finds its output, the
//! extractors scrape numbers out of free-text reports, and the result
//! assembler emits exactly one JSON record.
//!
//! All substantive logic lives here so it is testable without a CLI and
//! without the real tools installed.

pub mod bundle;
pub mod config;
pub mod driver;
pub mod error;
pub mod extract;
pub mod locator;
pub mod manifest;
pub mod pipelines;
pub mod result;
pub mod stager;

pub use config::ToolConfig;
pub use driver::{Invocation, ProcessRunner, Stage, StageOutcome, ToolRunner};
pub use error::{EvalError, EvalResult};
pub use result::ResultRecord;

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
