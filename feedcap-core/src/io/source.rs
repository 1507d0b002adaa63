//! Raw frame type and the sequential reader abstraction.
//!
//! The payload emitter is generic over [`PacketReader`] so it runs the same
//! way over a capture file on disk or over an in-memory capture.

use bytes::Bytes;

use crate::error::Error;

/// Link types the frame decoder understands.
pub mod link_type {
    /// Ethernet II (DLT_EN10MB)
    pub const ETHERNET: u16 = 1;
    /// Raw IP, version taken from the first nibble
    pub const RAW: u16 = 101;
    /// Linux cooked capture v1
    pub const LINUX_SLL: u16 = 113;
    /// Raw IPv4
    pub const IPV4: u16 = 228;
    /// Raw IPv6
    pub const IPV6: u16 = 229;
}

/// One captured frame, exactly as recorded.
#[derive(Clone, Debug)]
pub struct RawPacket {
    /// Frame number (1-indexed, matching Wireshark)
    pub frame_number: u64,
    /// Timestamp in microseconds since Unix epoch
    pub timestamp_us: i64,
    /// Captured length (may be less than original)
    pub captured_length: u32,
    /// Original packet length on the wire
    pub original_length: u32,
    /// Link type of the interface this frame was captured on
    pub link_type: u16,
    /// Frame bytes starting at the link-layer header
    pub data: Bytes,
}

impl RawPacket {
    /// Whether the capture snap length cut this frame short.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.captured_length < self.original_length
    }
}

/// Sequential, forward-only reader of frames.
///
/// Implementations own whatever resource backs them; dropping the reader
/// releases it.
pub trait PacketReader {
    /// Read the next frame.
    ///
    /// Returns `Ok(None)` at end of capture.
    fn next_packet(&mut self) -> Result<Option<RawPacket>, Error>;

    /// Number of frames read so far.
    fn frame_count(&self) -> u64;
}

impl<R: PacketReader + ?Sized> PacketReader for Box<R> {
    fn next_packet(&mut self) -> Result<Option<RawPacket>, Error> {
        (**self).next_packet()
    }

    fn frame_count(&self) -> u64 {
        (**self).frame_count()
    }
}
