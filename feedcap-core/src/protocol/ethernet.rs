//! Ethernet II link layer.

use etherparse::Ethernet2HeaderSlice;

use super::{vlan, LinkLayer, Mismatch, Skip};
use crate::io::link_type;

/// EtherType values the decoder acts on.
pub mod ethertype {
    pub const IPV4: u16 = 0x0800;
    pub const ARP: u16 = 0x0806;
    pub const VLAN: u16 = 0x8100;
    pub const IPV6: u16 = 0x86DD;
    pub const QINQ: u16 = 0x88A8;
    /// Pre-standard QinQ outer tag still seen on older switches
    pub const QINQ_OLD: u16 = 0x9100;

    /// Whether this EtherType introduces an 802.1Q tag.
    pub fn is_vlan(ethertype: u16) -> bool {
        matches!(ethertype, VLAN | QINQ | QINQ_OLD)
    }
}

/// Strip the Ethernet header and any stacked VLAN tags.
pub(crate) fn parse(data: &[u8]) -> Result<LinkLayer<'_>, Skip> {
    let eth = Ethernet2HeaderSlice::from_slice(data).map_err(|_| Mismatch::Runt {
        link_type: link_type::ETHERNET,
        len: data.len(),
    })?;

    let mut ethertype = eth.ether_type().0;
    let mut payload = &data[eth.slice().len()..];
    let mut vlan_id = None;

    while ethertype::is_vlan(ethertype) {
        let tag = vlan::parse_tag(payload)?;
        vlan_id = Some(tag.vlan_id);
        ethertype = tag.inner_ethertype;
        payload = &payload[vlan::TAG_LEN..];
    }

    Ok(LinkLayer {
        ethertype,
        vlan_id,
        payload,
    })
}
