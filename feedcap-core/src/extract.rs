//! Bounded payload extraction.
//!
//! [`Payloads`] pulls frames from a [`PacketReader`] one at a time, decodes
//! each, and yields the transport payload of every frame that belongs to the
//! feed. Nothing is buffered beyond the frame being decoded.
//!
//! The reader is dropped, closing the capture, as soon as the sequence
//! reaches a terminal state:
//!
//! ```text
//! Opened ──next()──▶ Scanning ──┬─ max_payloads emitted ──▶ Closed(Bounded)
//!                               ├─ end of capture ────────▶ Closed(Exhausted)
//!                               └─ read error / strict ───▶ Closed(Failed)
//! ```
//!
//! Dropping a `Payloads` in any state also drops its reader.

use std::fmt;
use std::iter::FusedIterator;
use std::net::SocketAddr;
use std::path::Path;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::config::ExtractConfig;
use crate::error::{Error, Result};
use crate::io::{PacketReader, RawPacket};
use crate::pcap::PcapReader;
use crate::protocol::{decode_frame, FrameDecode, Transport, TransportPayload};

/// Transport payload of one feed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// Frame number within the capture (1-indexed)
    pub frame_number: u64,
    /// Capture timestamp in microseconds since Unix epoch
    pub timestamp_us: i64,
    pub transport: Transport,
    pub src: SocketAddr,
    pub dst: SocketAddr,
    /// Innermost 802.1Q VLAN id, if tagged
    pub vlan_id: Option<u16>,
    /// Payload bytes; shares the frame's buffer
    pub data: Bytes,
}

impl Payload {
    fn new(raw: &RawPacket, located: &TransportPayload<'_>) -> Self {
        Self {
            frame_number: raw.frame_number,
            timestamp_us: raw.timestamp_us,
            transport: located.transport,
            src: located.src,
            dst: located.dst,
            vlan_id: located.vlan_id,
            data: raw.data.slice_ref(located.data),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Take the payload bytes, discarding the metadata.
    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

impl AsRef<[u8]> for Payload {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// How a payload sequence ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// `max_payloads` payloads were emitted
    Bounded,
    /// The capture ran out of frames first
    Exhausted,
    /// A read error, or a malformed frame in strict mode
    Failed,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Bounded => write!(f, "bound reached"),
            Termination::Exhausted => write!(f, "end of capture"),
            Termination::Failed => write!(f, "failed"),
        }
    }
}

/// Lifecycle of a payload sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractState {
    /// Capture open, no frame read yet
    Opened,
    /// At least one frame read
    Scanning,
    /// Reader dropped; the sequence yields nothing more
    Closed(Termination),
}

/// Running counters for one extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub frames_read: u64,
    pub payloads_emitted: usize,
    /// Well-formed frames that are not feed traffic
    pub mismatched: u64,
    /// Corrupt frames skipped (or, in strict mode, the one that failed)
    pub malformed: u64,
}

/// Builds payload sequences from a fixed configuration.
///
/// Each call to [`open`](Self::open) or [`from_reader`](Self::from_reader)
/// starts a fresh, independent pass.
#[derive(Debug, Clone, Default)]
pub struct PayloadExtractor {
    config: ExtractConfig,
}

impl PayloadExtractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Open a capture file and extract from it.
    ///
    /// Fails with [`Error::CaptureOpen`] if the file is missing, unreadable or
    /// not a capture; no sequence is produced in that case.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<Payloads<PcapReader>> {
        let reader = PcapReader::open(path)?;
        Ok(self.from_reader(reader))
    }

    /// Extract from an already open reader.
    pub fn from_reader<R: PacketReader>(&self, reader: R) -> Payloads<R> {
        let mut payloads = Payloads {
            reader: Some(reader),
            config: self.config.clone(),
            state: ExtractState::Opened,
            stats: ExtractStats::default(),
        };
        if payloads.config.max_payloads == 0 {
            payloads.close(Termination::Bounded);
        }
        payloads
    }
}

/// Open `path` and yield at most `max_payloads` UDP payloads in capture order.
///
/// ```rust,no_run
/// for payload in feedcap_core::extract_payloads("feed.pcap", 10)? {
///     let payload = payload?;
///     println!("{} bytes from {}", payload.len(), payload.src);
/// }
/// # Ok::<(), feedcap_core::Error>(())
/// ```
pub fn extract_payloads<P: AsRef<Path>>(
    path: P,
    max_payloads: usize,
) -> Result<Payloads<PcapReader>> {
    PayloadExtractor::new(ExtractConfig::default().with_max_payloads(max_payloads)).open(path)
}

/// Lazy, single-use sequence of feed payloads.
pub struct Payloads<R: PacketReader> {
    /// `None` once closed
    reader: Option<R>,
    config: ExtractConfig,
    state: ExtractState,
    stats: ExtractStats,
}

impl<R: PacketReader> Payloads<R> {
    pub fn state(&self) -> ExtractState {
        self.state
    }

    pub fn stats(&self) -> ExtractStats {
        self.stats
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, ExtractState::Closed(_))
    }

    /// Payloads that may still be emitted before the bound is hit.
    pub fn remaining(&self) -> usize {
        if self.is_closed() {
            return 0;
        }
        self.config.max_payloads - self.stats.payloads_emitted
    }

    fn close(&mut self, termination: Termination) {
        self.reader = None;
        self.state = ExtractState::Closed(termination);
        debug!(
            %termination,
            frames_read = self.stats.frames_read,
            payloads = self.stats.payloads_emitted,
            mismatched = self.stats.mismatched,
            malformed = self.stats.malformed,
            "payload extraction closed"
        );
    }
}

impl<R: PacketReader> Iterator for Payloads<R> {
    type Item = Result<Payload>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = match self.reader.as_mut()?.next_packet() {
                Ok(Some(raw)) => raw,
                Ok(None) => {
                    self.close(Termination::Exhausted);
                    return None;
                }
                Err(e) => {
                    self.close(Termination::Failed);
                    return Some(Err(e));
                }
            };
            self.state = ExtractState::Scanning;
            self.stats.frames_read += 1;

            match decode_frame(raw.link_type, &raw.data, &self.config.filter) {
                FrameDecode::Payload(located) => {
                    let payload = Payload::new(&raw, &located);
                    self.stats.payloads_emitted += 1;
                    if self.stats.payloads_emitted >= self.config.max_payloads {
                        self.close(Termination::Bounded);
                    }
                    return Some(Ok(payload));
                }
                FrameDecode::Mismatch(reason) => {
                    self.stats.mismatched += 1;
                    trace!(frame = raw.frame_number, %reason, "skipping frame");
                }
                FrameDecode::Malformed(source) => {
                    self.stats.malformed += 1;
                    if self.config.strict {
                        self.close(Termination::Failed);
                        return Some(Err(Error::MalformedFrame {
                            frame: raw.frame_number,
                            source,
                        }));
                    }
                    debug!(frame = raw.frame_number, error = %source, "skipping malformed frame");
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

impl<R: PacketReader> FusedIterator for Payloads<R> {}

impl<R: PacketReader> fmt::Debug for Payloads<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payloads")
            .field("state", &self.state)
            .field("stats", &self.stats)
            .field("max_payloads", &self.config.max_payloads)
            .finish_non_exhaustive()
    }
}
