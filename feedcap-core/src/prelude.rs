//! Convenient re-exports for common usage.
//!
//! ```rust,no_run
//! use feedcap_core::prelude::*;
//!
//! let payloads = extract_payloads("capture.pcap", DEFAULT_MAX_PAYLOADS)?;
//! # Ok::<(), feedcap_core::Error>(())
//! ```

// Extraction
pub use crate::config::{ExtractConfig, DEFAULT_MAX_PAYLOADS};
pub use crate::extract::{
    extract_payloads, ExtractState, ExtractStats, Payload, PayloadExtractor, Payloads,
    Termination,
};

// Decoding
pub use crate::protocol::{FeedFilter, Transport};

// I/O types
pub use crate::io::{PacketReader, RawPacket};
pub use crate::pcap::PcapReader;

// Error types
pub use crate::error::{Error, Result};
