//! Driver crate for the parity reconciliation tool.
//!
//! Everything here is plumbing around the engine: argument parsing, logging
//! setup, the per-workbook pipeline, and the batch runner that isolates one
//! workbook's structural failure from the rest of the batch.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod summary;
