//! IEEE 802.1Q VLAN tag.

use crate::error::ProtocolError;

/// Bytes following the TPID: TCI (2) + inner EtherType (2).
pub const TAG_LEN: usize = 4;

/// A decoded 802.1Q tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VlanTag {
    pub priority: u8,
    pub dei: bool,
    pub vlan_id: u16,
    pub inner_ethertype: u16,
}

/// Parse the tag that follows a VLAN TPID.
///
/// The TPID itself was consumed as the enclosing EtherType.
pub fn parse_tag(data: &[u8]) -> Result<VlanTag, ProtocolError> {
    let [tci_hi, tci_lo, et_hi, et_lo, ..] = *data else {
        return Err(ProtocolError::PacketTooShort {
            protocol: "vlan",
            needed: TAG_LEN,
            have: data.len(),
        });
    };

    let tci = u16::from_be_bytes([tci_hi, tci_lo]);
    Ok(VlanTag {
        priority: ((tci >> 13) & 0x07) as u8,
        dei: (tci >> 12) & 0x01 != 0,
        vlan_id: tci & 0x0FFF,
        inner_ethertype: u16::from_be_bytes([et_hi, et_lo]),
    })
}
