//! IPv4 network layer.

use std::net::IpAddr;

use etherparse::Ipv4HeaderSlice;

use super::{header_error, IpPacket, Mismatch, Skip};
use crate::error::ProtocolError;

/// Strip the IPv4 header (options included).
///
/// The payload ends at `total_length`, so link-layer trailer padding is not
/// part of it.
pub(crate) fn parse(data: &[u8]) -> Result<IpPacket<'_>, Skip> {
    let ipv4 = Ipv4HeaderSlice::from_slice(data).map_err(|e| header_error("ipv4", e))?;

    if ipv4.more_fragments() || ipv4.fragments_offset().value() != 0 {
        return Err(Mismatch::Fragmented.into());
    }

    let header_len = ipv4.slice().len();
    let total_len = ipv4.total_len() as usize;
    if total_len < header_len || total_len > data.len() {
        return Err(ProtocolError::LengthMismatch {
            protocol: "ipv4",
            field: "total_length",
            claimed: total_len,
            available: data.len(),
        }
        .into());
    }

    Ok(IpPacket {
        src: IpAddr::V4(ipv4.source_addr()),
        dst: IpAddr::V4(ipv4.destination_addr()),
        protocol: ipv4.protocol().0,
        payload: &data[header_len..total_len],
    })
}
