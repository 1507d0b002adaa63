//! Shared helpers for integration tests: frame builders and capture writers.

#![allow(dead_code)]

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::NamedTempFile;

pub const ETHERNET: u32 = 1;
pub const LINUX_SLL: u32 = 113;

/// Base timestamp for generated captures: 2023-11-14T22:13:20Z.
pub const BASE_TS_US: i64 = 1_700_000_000_000_000;

/// Feed port used by the generated market-data frames.
pub const FEED_PORT: u16 = 45000;

/// Ethernet/IPv4/UDP frame from 10.1.1.1:30001 to 233.43.202.1:`dst_port`.
pub fn udp_frame(dst_port: u16, payload: &[u8]) -> Vec<u8> {
    ethernet(&[], 0x0800, &ipv4_udp(dst_port, payload))
}

/// Same datagram as [`udp_frame`] behind the given 802.1Q tags.
pub fn vlan_udp_frame(vlans: &[u16], dst_port: u16, payload: &[u8]) -> Vec<u8> {
    ethernet(vlans, 0x0800, &ipv4_udp(dst_port, payload))
}

/// Same datagram as [`udp_frame`] behind a Linux cooked capture header.
pub fn sll_udp_frame(dst_port: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::new();
    frame.extend_from_slice(&0u16.to_be_bytes()); // Packet type: HOST
    frame.extend_from_slice(&1u16.to_be_bytes()); // ARPHRD_ETHER
    frame.extend_from_slice(&6u16.to_be_bytes()); // Address length
    frame.extend_from_slice(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x00, 0x00]);
    frame.extend_from_slice(&0x0800u16.to_be_bytes());
    frame.extend_from_slice(&ipv4_udp(dst_port, payload));
    frame
}

/// ARP request; never feed traffic.
pub fn arp_frame() -> Vec<u8> {
    let mut arp = vec![0x00, 0x01, 0x08, 0x00, 0x06, 0x04, 0x00, 0x01];
    arp.extend_from_slice(&[0u8; 20]);
    ethernet(&[], 0x0806, &arp)
}

/// Ethernet/IPv4/TCP segment with PSH|ACK set.
pub fn tcp_frame(dst_port: u16, payload: &[u8]) -> Vec<u8> {
    let mut tcp = Vec::new();
    tcp.extend_from_slice(&40000u16.to_be_bytes());
    tcp.extend_from_slice(&dst_port.to_be_bytes());
    tcp.extend_from_slice(&1u32.to_be_bytes()); // Seq
    tcp.extend_from_slice(&1u32.to_be_bytes()); // Ack
    tcp.push(0x50); // Data offset 5
    tcp.push(0x18); // PSH|ACK
    tcp.extend_from_slice(&65535u16.to_be_bytes());
    tcp.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // Checksum + urgent
    tcp.extend_from_slice(payload);
    ethernet(&[], 0x0800, &ipv4(6, &tcp))
}

/// The market-data payload carried by the `i`th generated feed frame.
pub fn feed_message(i: usize) -> Vec<u8> {
    format!("MSG{i:05}").into_bytes()
}

/// `n` feed frames carrying [`feed_message`] 0..n.
pub fn feed_frames(n: usize) -> Vec<Vec<u8>> {
    (0..n).map(|i| udp_frame(FEED_PORT, &feed_message(i))).collect()
}

fn ethernet(vlans: &[u16], ethertype: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::new();
    frame.extend_from_slice(&[0x01, 0x00, 0x5e, 0x2b, 0xca, 0x01]); // Multicast dst
    frame.extend_from_slice(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
    for vlan in vlans {
        frame.extend_from_slice(&0x8100u16.to_be_bytes());
        frame.extend_from_slice(&vlan.to_be_bytes());
    }
    frame.extend_from_slice(&ethertype.to_be_bytes());
    frame.extend_from_slice(payload);
    // Pad to the 60-byte Ethernet minimum like a NIC would.
    if frame.len() < 60 {
        frame.resize(60, 0);
    }
    frame
}

fn ipv4_udp(dst_port: u16, payload: &[u8]) -> Vec<u8> {
    let mut udp = Vec::new();
    udp.extend_from_slice(&30001u16.to_be_bytes());
    udp.extend_from_slice(&dst_port.to_be_bytes());
    udp.extend_from_slice(&(8 + payload.len() as u16).to_be_bytes());
    udp.extend_from_slice(&[0x00, 0x00]);
    udp.extend_from_slice(payload);
    ipv4(17, &udp)
}

fn ipv4(protocol: u8, payload: &[u8]) -> Vec<u8> {
    let mut packet = Vec::new();
    packet.push(0x45);
    packet.push(0x00);
    packet.extend_from_slice(&(20 + payload.len() as u16).to_be_bytes());
    packet.extend_from_slice(&[0x00, 0x01, 0x40, 0x00]); // Id, DF
    packet.push(64);
    packet.push(protocol);
    packet.extend_from_slice(&[0x00, 0x00]);
    packet.extend_from_slice(&[10, 1, 1, 1]);
    packet.extend_from_slice(&[233, 43, 202, 1]);
    packet.extend_from_slice(payload);
    packet
}

/// Classic little-endian microsecond pcap with one frame per 1 ms.
pub fn pcap_bytes(link_type: u32, frames: &[Vec<u8>]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&[0xd4, 0xc3, 0xb2, 0xa1]);
    data.extend_from_slice(&2u16.to_le_bytes());
    data.extend_from_slice(&4u16.to_le_bytes());
    data.extend_from_slice(&[0u8; 8]); // Thiszone + sigfigs
    data.extend_from_slice(&65535u32.to_le_bytes());
    data.extend_from_slice(&link_type.to_le_bytes());

    for (i, frame) in frames.iter().enumerate() {
        let ts = BASE_TS_US + 1_000 * i as i64;
        data.extend_from_slice(&((ts / 1_000_000) as u32).to_le_bytes());
        data.extend_from_slice(&((ts % 1_000_000) as u32).to_le_bytes());
        data.extend_from_slice(&(frame.len() as u32).to_le_bytes());
        data.extend_from_slice(&(frame.len() as u32).to_le_bytes());
        data.extend_from_slice(frame);
    }
    data
}

/// Classic little-endian nanosecond pcap with the same timestamps as
/// [`pcap_bytes`] plus 789 ns.
pub fn pcap_nanos_bytes(link_type: u32, frames: &[Vec<u8>]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&[0x4d, 0x3c, 0xb2, 0xa1]);
    data.extend_from_slice(&2u16.to_le_bytes());
    data.extend_from_slice(&4u16.to_le_bytes());
    data.extend_from_slice(&[0u8; 8]);
    data.extend_from_slice(&65535u32.to_le_bytes());
    data.extend_from_slice(&link_type.to_le_bytes());

    for (i, frame) in frames.iter().enumerate() {
        let ts = BASE_TS_US + 1_000 * i as i64;
        let nanos = (ts % 1_000_000) * 1_000 + 789;
        data.extend_from_slice(&((ts / 1_000_000) as u32).to_le_bytes());
        data.extend_from_slice(&(nanos as u32).to_le_bytes());
        data.extend_from_slice(&(frame.len() as u32).to_le_bytes());
        data.extend_from_slice(&(frame.len() as u32).to_le_bytes());
        data.extend_from_slice(frame);
    }
    data
}

/// Classic big-endian microsecond pcap, as written on SPARC and other
/// big-endian capture hosts. Same timestamps as [`pcap_bytes`].
pub fn pcap_be_bytes(link_type: u32, frames: &[Vec<u8>]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&[0xa1, 0xb2, 0xc3, 0xd4]);
    data.extend_from_slice(&2u16.to_be_bytes());
    data.extend_from_slice(&4u16.to_be_bytes());
    data.extend_from_slice(&[0u8; 8]);
    data.extend_from_slice(&65535u32.to_be_bytes());
    data.extend_from_slice(&link_type.to_be_bytes());

    for (i, frame) in frames.iter().enumerate() {
        let ts = BASE_TS_US + 1_000 * i as i64;
        data.extend_from_slice(&((ts / 1_000_000) as u32).to_be_bytes());
        data.extend_from_slice(&((ts % 1_000_000) as u32).to_be_bytes());
        data.extend_from_slice(&(frame.len() as u32).to_be_bytes());
        data.extend_from_slice(&(frame.len() as u32).to_be_bytes());
        data.extend_from_slice(frame);
    }
    data
}

/// Little-endian pcapng: one section, one interface, enhanced packet blocks
/// with the same timestamps as [`pcap_bytes`].
pub fn pcapng_bytes(link_type: u16, frames: &[Vec<u8>]) -> Vec<u8> {
    let mut data = Vec::new();

    // Section Header Block
    data.extend_from_slice(&0x0A0D_0D0Au32.to_le_bytes());
    data.extend_from_slice(&28u32.to_le_bytes());
    data.extend_from_slice(&0x1A2B_3C4Du32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&(-1i64).to_le_bytes()); // Section length unknown
    data.extend_from_slice(&28u32.to_le_bytes());

    // Interface Description Block
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(&20u32.to_le_bytes());
    data.extend_from_slice(&link_type.to_le_bytes());
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&65535u32.to_le_bytes());
    data.extend_from_slice(&20u32.to_le_bytes());

    for (i, frame) in frames.iter().enumerate() {
        let ts = (BASE_TS_US + 1_000 * i as i64) as u64;
        let padded = frame.len().div_ceil(4) * 4;
        let block_len = (32 + padded) as u32;

        data.extend_from_slice(&6u32.to_le_bytes());
        data.extend_from_slice(&block_len.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes()); // Interface id
        data.extend_from_slice(&((ts >> 32) as u32).to_le_bytes());
        data.extend_from_slice(&(ts as u32).to_le_bytes());
        data.extend_from_slice(&(frame.len() as u32).to_le_bytes());
        data.extend_from_slice(&(frame.len() as u32).to_le_bytes());
        data.extend_from_slice(frame);
        data.resize(data.len() + padded - frame.len(), 0);
        data.extend_from_slice(&block_len.to_le_bytes());
    }
    data
}

pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

pub fn write_temp(suffix: &str, bytes: &[u8]) -> NamedTempFile {
    let mut temp = NamedTempFile::with_suffix(suffix).unwrap();
    temp.write_all(bytes).unwrap();
    temp.flush().unwrap();
    temp
}

/// Write `frames` as a plain Ethernet pcap.
pub fn write_pcap(frames: &[Vec<u8>]) -> NamedTempFile {
    write_temp(".pcap", &pcap_bytes(ETHERNET, frames))
}
