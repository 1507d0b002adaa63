//! Linux cooked capture (SLL) link layer.
//!
//! Captures taken on the "any" interface carry this 16-byte pseudo header
//! instead of an Ethernet header:
//!
//! ```text
//! packet type (2) | ARPHRD type (2) | addr len (2) | addr (8) | protocol (2)
//! ```

use super::{LinkLayer, Mismatch, Skip};
use crate::io::link_type;

/// Linux SLL header length in bytes.
pub const LINUX_SLL_HEADER_LEN: usize = 16;

pub(crate) fn parse(data: &[u8]) -> Result<LinkLayer<'_>, Skip> {
    if data.len() < LINUX_SLL_HEADER_LEN {
        return Err(Mismatch::Runt {
            link_type: link_type::LINUX_SLL,
            len: data.len(),
        }
        .into());
    }

    Ok(LinkLayer {
        ethertype: u16::from_be_bytes([data[14], data[15]]),
        vlan_id: None,
        payload: &data[LINUX_SLL_HEADER_LEN..],
    })
}
