//! IPv6 network layer with extension header skipping.

use std::net::IpAddr;

use etherparse::Ipv6HeaderSlice;

use super::{header_error, IpPacket, Mismatch, Skip};
use crate::error::ProtocolError;

/// Fixed IPv6 header length.
pub const IPV6_HEADER_LEN: usize = 40;

/// IPv6 Next Header values.
pub mod next_header {
    pub const HOP_BY_HOP: u8 = 0;
    pub const TCP: u8 = 6;
    pub const UDP: u8 = 17;
    pub const ROUTING: u8 = 43;
    pub const FRAGMENT: u8 = 44;
    pub const DESTINATION: u8 = 60;
}

/// Strip the IPv6 header and any hop-by-hop, routing or destination-options
/// extension headers in front of the transport.
pub(crate) fn parse(data: &[u8]) -> Result<IpPacket<'_>, Skip> {
    let ipv6 = Ipv6HeaderSlice::from_slice(data).map_err(|e| header_error("ipv6", e))?;

    let payload_len = ipv6.payload_length() as usize;
    let available = data.len() - IPV6_HEADER_LEN;
    if payload_len > available {
        return Err(ProtocolError::LengthMismatch {
            protocol: "ipv6",
            field: "payload_length",
            claimed: payload_len,
            available,
        }
        .into());
    }

    let mut payload = &data[IPV6_HEADER_LEN..IPV6_HEADER_LEN + payload_len];
    let mut protocol = ipv6.next_header().0;

    loop {
        match protocol {
            next_header::FRAGMENT => return Err(Mismatch::Fragmented.into()),
            next_header::HOP_BY_HOP | next_header::ROUTING | next_header::DESTINATION => {
                let [next, ext_len, ..] = *payload else {
                    return Err(too_short(8, payload.len()));
                };
                let len = (ext_len as usize + 1) * 8;
                if len > payload.len() {
                    return Err(too_short(len, payload.len()));
                }
                protocol = next;
                payload = &payload[len..];
            }
            _ => break,
        }
    }

    Ok(IpPacket {
        src: IpAddr::V6(ipv6.source_addr()),
        dst: IpAddr::V6(ipv6.destination_addr()),
        protocol,
        payload,
    })
}

fn too_short(needed: usize, have: usize) -> Skip {
    ProtocolError::PacketTooShort {
        protocol: "ipv6",
        needed,
        have,
    }
    .into()
}
