//! CLI library components for the agility points tool.

pub mod logging;
pub mod pipeline;
