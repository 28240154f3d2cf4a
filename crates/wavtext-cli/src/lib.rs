//! wavtext CLI library.
//!
//! Command implementations and logging setup for the `wavtext` binary:
//! header inspection, chunk listing and text export of WAV sample data.

pub mod commands;
pub mod logging;
