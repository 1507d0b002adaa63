//! Capture I/O.
//!
//! - [`PacketReader`] - sequential frame reader trait
//! - [`GenericPcapReader`] - pcap/pcapng reader over any `Read` source
//! - [`DecompressReader`] - transparent gzip/zstd decompression

mod decompress;
mod pcap_stream;
mod source;

pub use decompress::{Compression, DecompressReader, FileDecoder};
pub use pcap_stream::{GenericPcapReader, PcapFormat};
pub use source::{link_type, PacketReader, RawPacket};
