pub mod sim;
pub mod synth;

pub use sim::*;
pub use synth::*;
