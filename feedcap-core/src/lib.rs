//! # feedcap-core
//!
//! Bounded, lazy extraction of transport payloads from packet captures.
//!
//! Given a pcap or pcapng file of market-data traffic, this crate yields the
//! UDP (or TCP) payload of each feed frame in capture order, up to a
//! configured bound, for replay into a feed handler.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use feedcap_core::prelude::*;
//!
//! let extractor = PayloadExtractor::new(
//!     ExtractConfig::default()
//!         .with_max_payloads(100)
//!         .with_filter(FeedFilter::udp().dst_port(45000)),
//! );
//!
//! for payload in extractor.open("opra.pcap.gz")? {
//!     let payload = payload?;
//!     println!("{} {} {}", payload.frame_number, payload.dst, payload.len());
//! }
//! # Ok::<(), feedcap_core::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                        feedcap-core                                 |
//! +---------------------------------------------------------------------+
//! |  io/         - PacketReader, pcap/pcapng reading, decompression     |
//! |  pcap/       - PcapReader: open a capture file by path              |
//! |  protocol/   - Frame decoding down to the transport payload         |
//! |  extract/    - Bounded payload sequence and its lifecycle           |
//! |  config/     - ExtractConfig                                        |
//! |  error/      - Error types                                          |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Crate Features
//!
//! - `default` - Zstd decompression enabled (gzip is always available)
//! - `compress-zstd` - Zstd decompression support

pub mod config;
pub mod error;
pub mod extract;
pub mod io;
pub mod pcap;
pub mod prelude;
pub mod protocol;

pub use config::{ExtractConfig, DEFAULT_MAX_PAYLOADS};
pub use error::{CaptureOpenError, Error, ProtocolError, Result};
pub use extract::{
    extract_payloads, ExtractState, ExtractStats, Payload, PayloadExtractor, Payloads,
    Termination,
};
pub use io::{PacketReader, RawPacket};
pub use pcap::PcapReader;
pub use protocol::{decode_frame, FeedFilter, FrameDecode, Mismatch, Transport};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
