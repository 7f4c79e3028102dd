//! CLI library components for the dq data-quality tool.

pub mod logging;
