//! Command-line interface module.
//!
//! This module handles:
//! - Argument parsing via clap
//! - Payload output formatting (hex lines, length-prefixed raw, summary)

mod args;
mod output;

pub use args::{Args, TransportArg};
pub use output::{OutputFormat, PayloadWriter};
