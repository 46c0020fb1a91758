//! Layerlint core library.
//!
//! This crate exposes programmatic APIs for validating a directory of
//! layered CSS stylesheets.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `scan`: Brace, comment and layer-marker counting.
//! - `grammar`: Parser seam and the `lightningcss` backend.
//! - `lint`: Enumerates stylesheets and folds per-file verdicts into a report.
//! - `models`: Findings, outcomes, verdicts and the run report.
//! - `output`: Human/JSON printers.
//! - `error`: Fatal setup errors.
//! - `logging`: Tracing subscriber setup.
pub mod cli;
pub mod config;
pub mod error;
pub mod grammar;
pub mod lint;
pub mod logging;
pub mod models;
pub mod output;
pub mod scan;

pub use error::{Error, Result};
