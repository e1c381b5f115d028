//! CLI library components for the shot transpiler.

pub mod logging;
pub mod pipeline;
pub mod prompt;
