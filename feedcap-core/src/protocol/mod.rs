//! Frame decoding.
//!
//! Walks a raw frame link → network → transport just far enough to find the
//! transport payload. Each layer lives in its own module and either hands the
//! next layer its bytes or stops the walk with a [`Skip`].
//!
//! A stop is one of two kinds:
//! - [`Mismatch`]: the frame is well-formed but not feed traffic (ARP, ICMP,
//!   another port, a fragment). Expected and silent.
//! - [`ProtocolError`]: the frame announced a layer whose header is corrupt or
//!   truncated. Still skipped by default, but reported distinctly.
//!
//! | Layer | Protocols |
//! |-------|-----------|
//! | Link | Ethernet II, 802.1Q/QinQ, Linux SLL, raw IP |
//! | Network | IPv4, IPv6 (+ hop-by-hop/routing/dest-opts extensions) |
//! | Transport | UDP, TCP |
//!
//! ## Example
//!
//! ```rust
//! use feedcap_core::protocol::{decode_frame, FeedFilter, FrameDecode, Mismatch};
//!
//! // Ethernet frame carrying ARP
//! let frame: &[u8] = &[
//!     0xff, 0xff, 0xff, 0xff, 0xff, 0xff, // dst mac
//!     0x00, 0x11, 0x22, 0x33, 0x44, 0x55, // src mac
//!     0x08, 0x06,                         // ethertype (ARP)
//!     0x00, 0x01,
//! ];
//!
//! let decoded = decode_frame(1, frame, &FeedFilter::udp());
//! assert!(matches!(decoded, FrameDecode::Mismatch(Mismatch::NotIp { ethertype: 0x0806 })));
//! ```

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::error::ProtocolError;
use crate::io::link_type;

mod ethernet;
mod filter;
mod ipv4;
mod ipv6;
mod linux_sll;
mod tcp;
mod udp;
mod vlan;

#[cfg(test)]
pub mod test_utils;

pub use ethernet::ethertype;
pub use filter::{FeedFilter, Transport};
pub use ipv6::next_header;
pub use vlan::VlanTag;

/// Why a well-formed frame is not part of the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// Frame shorter than its link-layer header
    Runt { link_type: u16, len: usize },
    /// Link type the decoder does not walk
    UnsupportedLinkType(u16),
    /// Link layer carries something other than IPv4/IPv6
    NotIp { ethertype: u16 },
    /// IP packet carries a different transport
    WrongTransport { protocol: u8 },
    /// IP fragment; no transport header to locate without reassembly
    Fragmented,
    /// Transport segment outside the feed filter
    NotFeed,
    /// Transport header with no payload behind it
    EmptyPayload,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Runt { link_type, len } => {
                write!(f, "{len}-byte frame too short for link type {link_type}")
            }
            Mismatch::UnsupportedLinkType(lt) => write!(f, "unsupported link type {lt}"),
            Mismatch::NotIp { ethertype } => write!(f, "not IP (ethertype 0x{ethertype:04x})"),
            Mismatch::WrongTransport { protocol } => write!(f, "IP protocol {protocol}"),
            Mismatch::Fragmented => write!(f, "IP fragment"),
            Mismatch::NotFeed => write!(f, "outside feed filter"),
            Mismatch::EmptyPayload => write!(f, "empty transport payload"),
        }
    }
}

/// Why the layer walk stopped before reaching a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    Mismatch(Mismatch),
    Malformed(ProtocolError),
}

impl From<Mismatch> for Skip {
    fn from(m: Mismatch) -> Self {
        Skip::Mismatch(m)
    }
}

impl From<ProtocolError> for Skip {
    fn from(e: ProtocolError) -> Self {
        Skip::Malformed(e)
    }
}

/// Link layer stripped off, network layer next.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LinkLayer<'a> {
    pub ethertype: u16,
    pub vlan_id: Option<u16>,
    pub payload: &'a [u8],
}

/// Network layer stripped off, transport layer next.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IpPacket<'a> {
    pub src: IpAddr,
    pub dst: IpAddr,
    pub protocol: u8,
    pub payload: &'a [u8],
}

/// Transport header stripped off.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Segment<'a> {
    pub src_port: u16,
    pub dst_port: u16,
    pub payload: &'a [u8],
}

/// A located transport payload, borrowed from the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportPayload<'a> {
    pub transport: Transport,
    pub src: SocketAddr,
    pub dst: SocketAddr,
    /// Innermost 802.1Q VLAN id, if the frame was tagged
    pub vlan_id: Option<u16>,
    pub data: &'a [u8],
}

/// Outcome of decoding one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameDecode<'a> {
    Payload(TransportPayload<'a>),
    Mismatch(Mismatch),
    Malformed(ProtocolError),
}

impl<'a> FrameDecode<'a> {
    pub fn is_payload(&self) -> bool {
        matches!(self, FrameDecode::Payload(_))
    }

    pub fn payload(&self) -> Option<&TransportPayload<'a>> {
        match self {
            FrameDecode::Payload(p) => Some(p),
            _ => None,
        }
    }
}

/// Decode one frame captured on an interface of the given link type.
pub fn decode_frame<'a>(link_type: u16, data: &'a [u8], filter: &FeedFilter) -> FrameDecode<'a> {
    match walk_layers(link_type, data, filter) {
        Ok(payload) => FrameDecode::Payload(payload),
        Err(Skip::Mismatch(m)) => FrameDecode::Mismatch(m),
        Err(Skip::Malformed(e)) => FrameDecode::Malformed(e),
    }
}

fn walk_layers<'a>(
    link_type: u16,
    data: &'a [u8],
    filter: &FeedFilter,
) -> Result<TransportPayload<'a>, Skip> {
    let link = parse_link(link_type, data)?;

    let ip = match link.ethertype {
        ethertype::IPV4 => ipv4::parse(link.payload)?,
        ethertype::IPV6 => ipv6::parse(link.payload)?,
        other => return Err(Mismatch::NotIp { ethertype: other }.into()),
    };

    let transport = filter.transport();
    if ip.protocol != transport.ip_protocol() {
        return Err(Mismatch::WrongTransport {
            protocol: ip.protocol,
        }
        .into());
    }

    let segment = match transport {
        Transport::Udp => udp::parse(ip.payload)?,
        Transport::Tcp => tcp::parse(ip.payload)?,
    };

    let src = SocketAddr::new(ip.src, segment.src_port);
    let dst = SocketAddr::new(ip.dst, segment.dst_port);
    if !filter.matches(&src, &dst) {
        return Err(Mismatch::NotFeed.into());
    }
    if segment.payload.is_empty() {
        return Err(Mismatch::EmptyPayload.into());
    }

    Ok(TransportPayload {
        transport,
        src,
        dst,
        vlan_id: link.vlan_id,
        data: segment.payload,
    })
}

fn parse_link(link_type: u16, data: &[u8]) -> Result<LinkLayer<'_>, Skip> {
    match link_type {
        link_type::ETHERNET => ethernet::parse(data),
        link_type::LINUX_SLL => linux_sll::parse(data),
        link_type::RAW => raw_ip(data),
        link_type::IPV4 => Ok(bare(ethertype::IPV4, data)),
        link_type::IPV6 => Ok(bare(ethertype::IPV6, data)),
        other => Err(Mismatch::UnsupportedLinkType(other).into()),
    }
}

/// Raw IP: the version nibble decides the network protocol.
fn raw_ip(data: &[u8]) -> Result<LinkLayer<'_>, Skip> {
    let Some(first) = data.first() else {
        return Err(Mismatch::Runt {
            link_type: link_type::RAW,
            len: 0,
        }
        .into());
    };
    match first >> 4 {
        4 => Ok(bare(ethertype::IPV4, data)),
        6 => Ok(bare(ethertype::IPV6, data)),
        v => Err(ProtocolError::InvalidField {
            protocol: "raw_ip",
            field: "version",
            reason: format!("{v} is not 4 or 6"),
        }
        .into()),
    }
}

#[inline]
fn bare(ethertype: u16, payload: &[u8]) -> LinkLayer<'_> {
    LinkLayer {
        ethertype,
        vlan_id: None,
        payload,
    }
}

/// Wrap an etherparse header error for `protocol`.
pub(crate) fn header_error(protocol: &'static str, e: impl fmt::Display) -> ProtocolError {
    ProtocolError::InvalidField {
        protocol,
        field: "header",
        reason: e.to_string(),
    }
}
