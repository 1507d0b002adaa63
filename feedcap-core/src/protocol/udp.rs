//! UDP transport layer.

use etherparse::UdpHeaderSlice;

use super::{header_error, Segment, Skip};
use crate::error::ProtocolError;

/// UDP header is always 8 bytes.
pub const UDP_HEADER_LEN: usize = 8;

/// Strip the UDP header. The payload ends where the UDP length field says.
pub(crate) fn parse(data: &[u8]) -> Result<Segment<'_>, Skip> {
    if data.len() < UDP_HEADER_LEN {
        return Err(ProtocolError::PacketTooShort {
            protocol: "udp",
            needed: UDP_HEADER_LEN,
            have: data.len(),
        }
        .into());
    }
    let udp = UdpHeaderSlice::from_slice(data).map_err(|e| header_error("udp", e))?;

    let length = udp.length() as usize;
    if length < UDP_HEADER_LEN || length > data.len() {
        return Err(ProtocolError::LengthMismatch {
            protocol: "udp",
            field: "length",
            claimed: length,
            available: data.len(),
        }
        .into());
    }

    Ok(Segment {
        src_port: udp.source_port(),
        dst_port: udp.destination_port(),
        payload: &data[UDP_HEADER_LEN..length],
    })
}
