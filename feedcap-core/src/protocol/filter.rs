//! Feed selection criteria.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Transport layer carrying the feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Transport {
    /// UDP datagrams (multicast market data feeds)
    #[default]
    Udp,
    /// TCP segments, taken one segment at a time without reassembly
    Tcp,
}

impl Transport {
    /// IP protocol number identifying this transport.
    pub const fn ip_protocol(self) -> u8 {
        match self {
            Transport::Udp => 17,
            Transport::Tcp => 6,
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Udp => write!(f, "udp"),
            Transport::Tcp => write!(f, "tcp"),
        }
    }
}

/// Selects which transport payloads belong to the feed.
///
/// Every criterion left empty matches everything, so the default filter
/// accepts every UDP payload in the capture.
///
/// ```
/// use feedcap_core::protocol::FeedFilter;
///
/// let filter = FeedFilter::udp()
///     .dst_port(45000)
///     .dst_addr("233.43.202.1".parse().unwrap());
/// assert_eq!(filter.dst_ports(), &[45000]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilter {
    transport: Transport,
    dst_ports: Vec<u16>,
    src_ports: Vec<u16>,
    src_addr: Option<IpAddr>,
    dst_addr: Option<IpAddr>,
}

impl FeedFilter {
    /// Accept every UDP payload.
    pub fn udp() -> Self {
        Self::default()
    }

    /// Accept every TCP payload.
    pub fn tcp() -> Self {
        Self::default().with_transport(Transport::Tcp)
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// Add an accepted destination port.
    pub fn dst_port(mut self, port: u16) -> Self {
        self.dst_ports.push(port);
        self
    }

    /// Add an accepted source port.
    pub fn src_port(mut self, port: u16) -> Self {
        self.src_ports.push(port);
        self
    }

    /// Only accept packets from this address.
    pub fn src_addr(mut self, addr: IpAddr) -> Self {
        self.src_addr = Some(addr);
        self
    }

    /// Only accept packets sent to this address (e.g. a multicast group).
    pub fn dst_addr(mut self, addr: IpAddr) -> Self {
        self.dst_addr = Some(addr);
        self
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn dst_ports(&self) -> &[u16] {
        &self.dst_ports
    }

    pub fn src_ports(&self) -> &[u16] {
        &self.src_ports
    }

    /// Whether a segment between these endpoints belongs to the feed.
    pub fn matches(&self, src: &SocketAddr, dst: &SocketAddr) -> bool {
        port_allowed(&self.dst_ports, dst.port())
            && port_allowed(&self.src_ports, src.port())
            && self.src_addr.map_or(true, |a| a == src.ip())
            && self.dst_addr.map_or(true, |a| a == dst.ip())
    }
}

#[inline]
fn port_allowed(ports: &[u16], port: u16) -> bool {
    ports.is_empty() || ports.contains(&port)
}
