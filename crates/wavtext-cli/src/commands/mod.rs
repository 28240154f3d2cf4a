//! CLI command implementations

pub mod chunks;
pub mod export;
pub mod info;
pub mod json_output;
