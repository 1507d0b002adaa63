//! Error types for feedcap-core.
//!
//! - [`enum@Error`] - Main error enum returned by extraction
//! - [`CaptureOpenError`] - The capture could not be opened or recognized
//! - [`ProtocolError`] - A frame claimed a layer whose header is corrupt
//!
//! Frames that simply are not feed traffic are not errors at all; see
//! [`crate::protocol::Mismatch`].

use thiserror::Error;

/// Main error type for feedcap-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The capture could not be opened. No sequence is produced.
    #[error("Cannot open capture: {0}")]
    CaptureOpen(#[from] CaptureOpenError),

    /// The capture reader failed part-way through the file.
    #[error("Capture read error after frame {frame}: {reason}")]
    CaptureRead { frame: u64, reason: String },

    /// A frame was corrupt and strict decoding was requested.
    #[error("Malformed frame {frame}: {source}")]
    MalformedFrame {
        frame: u64,
        #[source]
        source: ProtocolError,
    },
}

/// Errors raised while opening a capture file.
#[derive(Error, Debug)]
pub enum CaptureOpenError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// File exists but could not be read
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Not a pcap or pcapng capture (after decompression)
    #[error("Invalid capture format: {reason}")]
    InvalidFormat { reason: String },
}

/// Errors describing a corrupt protocol header inside a frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Packet too short for protocol header
    #[error("{protocol}: packet too short (need {needed} bytes, have {have})")]
    PacketTooShort {
        protocol: &'static str,
        needed: usize,
        have: usize,
    },

    /// Invalid header field value
    #[error("{protocol}: invalid {field}: {reason}")]
    InvalidField {
        protocol: &'static str,
        field: &'static str,
        reason: String,
    },

    /// A length field disagrees with the bytes actually captured
    #[error("{protocol}: {field} says {claimed} bytes, {available} available")]
    LengthMismatch {
        protocol: &'static str,
        field: &'static str,
        claimed: usize,
        available: usize,
    },
}

impl Error {
    /// Whether this error was raised before any frame was read.
    pub fn is_open_error(&self) -> bool {
        matches!(self, Error::CaptureOpen(_))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
