//! The two evaluator pipelines: stage, drive, locate, extract, assemble.

pub mod sim;
pub mod synth;

pub use sim::{run_simulation, SimRequest};
pub use synth::{run_synthesis, SynthRequest};
