//! feedcap - extract feed payloads from packet captures for replay.
//!
//! The binary is a thin driver over [`feedcap_core`]: it maps command-line
//! flags onto an [`ExtractConfig`](feedcap_core::ExtractConfig) and writes each
//! payload to stdout.

pub mod cli;

pub use feedcap_core::{Error, Result};
