//! TCP transport layer.
//!
//! Segments are taken one at a time; there is no stream reassembly, so a
//! message split across segments arrives as two payloads.

use etherparse::TcpHeaderSlice;

use super::{header_error, Segment, Skip};

/// Strip the TCP header (options included).
pub(crate) fn parse(data: &[u8]) -> Result<Segment<'_>, Skip> {
    let tcp = TcpHeaderSlice::from_slice(data).map_err(|e| header_error("tcp", e))?;

    Ok(Segment {
        src_port: tcp.source_port(),
        dst_port: tcp.destination_port(),
        payload: &data[tcp.slice().len()..],
    })
}
