//! Generic pcap/pcapng reader over any `Read` source.
//!
//! Block parsing is delegated to `pcap_parser`; this module only turns packet
//! blocks into [`RawPacket`]s, tracks link types and normalizes timestamps.
//!
//! ```ignore
//! let file = File::open("capture.pcap")?;
//! let mut reader = GenericPcapReader::with_format(file, PcapFormat::LegacyLeMicro)?;
//! while let Some(frame) = reader.next_packet()? {
//!     println!("{} bytes", frame.data.len());
//! }
//! ```

use std::io::{BufReader, Read};

use bytes::Bytes;
use pcap_parser::traits::PcapReaderIterator;
use pcap_parser::{LegacyPcapReader, PcapBlockOwned, PcapError as ParserError, PcapNGReader};

use crate::error::{CaptureOpenError, Error};
use crate::io::{link_type, PacketReader, RawPacket};

/// Buffer size for pcap_parser readers (256KB).
///
/// A record that does not fit surfaces as [`Error::CaptureRead`].
const BUFFER_SIZE: usize = 262144;

/// Format of the capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PcapFormat {
    /// Classic pcap (little-endian, microseconds)
    LegacyLeMicro,
    /// Classic pcap (big-endian, microseconds)
    LegacyBeMicro,
    /// Classic pcap (little-endian, nanoseconds)
    LegacyLeNano,
    /// Classic pcap (big-endian, nanoseconds)
    LegacyBeNano,
    /// pcapng
    PcapNg,
}

impl PcapFormat {
    /// Detect the capture format from the first four bytes of the stream.
    pub fn detect(data: &[u8]) -> Result<Self, CaptureOpenError> {
        match data {
            [0xd4, 0xc3, 0xb2, 0xa1, ..] => Ok(PcapFormat::LegacyLeMicro),
            [0xa1, 0xb2, 0xc3, 0xd4, ..] => Ok(PcapFormat::LegacyBeMicro),
            [0x4d, 0x3c, 0xb2, 0xa1, ..] => Ok(PcapFormat::LegacyLeNano),
            [0xa1, 0xb2, 0x3c, 0x4d, ..] => Ok(PcapFormat::LegacyBeNano),
            [0x0a, 0x0d, 0x0d, 0x0a, ..] => Ok(PcapFormat::PcapNg),
            [a, b, c, d, ..] => Err(CaptureOpenError::InvalidFormat {
                reason: format!("Unknown capture magic: {a:02x}{b:02x}{c:02x}{d:02x}"),
            }),
            _ => Err(CaptureOpenError::InvalidFormat {
                reason: "Data too small for capture magic".into(),
            }),
        }
    }

    /// Whether this is pcapng.
    pub fn is_pcapng(&self) -> bool {
        matches!(self, PcapFormat::PcapNg)
    }

    /// Whether record timestamps carry nanoseconds instead of microseconds.
    pub fn is_nanosecond(&self) -> bool {
        matches!(self, PcapFormat::LegacyLeNano | PcapFormat::LegacyBeNano)
    }
}

/// Generic pcap/pcapng reader over any `Read` source.
pub struct GenericPcapReader<R: Read> {
    inner: ReaderInner<R>,
    format: PcapFormat,
    frame_number: u64,
    /// Link type per interface; classic pcap has exactly one.
    interfaces: Vec<u16>,
}

enum ReaderInner<R: Read> {
    Legacy(LegacyPcapReader<BufReader<R>>),
    Ng(PcapNGReader<BufReader<R>>),
}

impl<R: Read> GenericPcapReader<R> {
    /// Create a reader for a stream whose format is already known.
    ///
    /// Use [`PcapFormat::detect`] on the leading bytes first. The file header
    /// is validated here, so an unparseable header fails at construction.
    pub fn with_format(source: R, format: PcapFormat) -> Result<Self, CaptureOpenError> {
        let buf_reader = BufReader::with_capacity(BUFFER_SIZE, source);

        let inner = if format.is_pcapng() {
            let reader = PcapNGReader::new(BUFFER_SIZE, buf_reader).map_err(|e| {
                CaptureOpenError::InvalidFormat {
                    reason: format!("Failed to parse pcapng: {e}"),
                }
            })?;
            ReaderInner::Ng(reader)
        } else {
            let reader = LegacyPcapReader::new(BUFFER_SIZE, buf_reader).map_err(|e| {
                CaptureOpenError::InvalidFormat {
                    reason: format!("Failed to parse pcap: {e}"),
                }
            })?;
            ReaderInner::Legacy(reader)
        };

        Ok(GenericPcapReader {
            inner,
            format,
            frame_number: 0,
            interfaces: Vec::new(),
        })
    }

    /// Format this reader was opened with.
    pub fn format(&self) -> PcapFormat {
        self.format
    }

    /// Link type of the most recently described interface.
    ///
    /// Defaults to Ethernet until a header block has been read.
    pub fn link_type(&self) -> u16 {
        self.interfaces.last().copied().unwrap_or(link_type::ETHERNET)
    }

    /// Number of frames read so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_number
    }

    /// Read the next frame.
    ///
    /// Returns `Ok(None)` at end of capture.
    pub fn next_packet(&mut self) -> Result<Option<RawPacket>, Error> {
        match &mut self.inner {
            ReaderInner::Legacy(reader) => read_legacy_packet(
                reader,
                self.format.is_nanosecond(),
                &mut self.frame_number,
                &mut self.interfaces,
            ),
            ReaderInner::Ng(reader) => {
                read_pcapng_packet(reader, &mut self.frame_number, &mut self.interfaces)
            }
        }
    }
}

impl<R: Read> PacketReader for GenericPcapReader<R> {
    fn next_packet(&mut self) -> Result<Option<RawPacket>, Error> {
        GenericPcapReader::next_packet(self)
    }

    fn frame_count(&self) -> u64 {
        self.frame_number
    }
}

fn read_error(frame: u64, what: &str, e: impl std::fmt::Display) -> Error {
    Error::CaptureRead {
        frame,
        reason: format!("{what}: {e}"),
    }
}

/// pcapng packet data is padded to 32 bits; cut it back to the stated length.
#[inline]
fn trim(data: &[u8], len: u32) -> &[u8] {
    &data[..data.len().min(len as usize)]
}

fn read_legacy_packet<S: Read>(
    reader: &mut LegacyPcapReader<S>,
    nanosecond: bool,
    frame_number: &mut u64,
    interfaces: &mut Vec<u16>,
) -> Result<Option<RawPacket>, Error> {
    loop {
        match reader.next() {
            Ok((offset, block)) => match block {
                PcapBlockOwned::Legacy(packet) => {
                    *frame_number += 1;

                    let fraction_us = if nanosecond {
                        (packet.ts_usec / 1_000) as i64
                    } else {
                        packet.ts_usec as i64
                    };

                    let raw = RawPacket {
                        frame_number: *frame_number,
                        timestamp_us: (packet.ts_sec as i64) * 1_000_000 + fraction_us,
                        captured_length: packet.caplen,
                        original_length: packet.origlen,
                        link_type: interfaces.first().copied().unwrap_or(link_type::ETHERNET),
                        data: Bytes::copy_from_slice(packet.data),
                    };

                    reader.consume(offset);
                    return Ok(Some(raw));
                }
                PcapBlockOwned::LegacyHeader(header) => {
                    interfaces.clear();
                    interfaces.push(header.network.0 as u16);
                    reader.consume(offset);
                }
                _ => reader.consume(offset),
            },
            Err(ParserError::Eof) => return Ok(None),
            Err(ParserError::Incomplete(_)) => {
                reader
                    .refill()
                    .map_err(|e| read_error(*frame_number, "pcap refill error", e))?;
            }
            Err(e) => return Err(read_error(*frame_number, "pcap parse error", e)),
        }
    }
}

fn read_pcapng_packet<S: Read>(
    reader: &mut PcapNGReader<S>,
    frame_number: &mut u64,
    interfaces: &mut Vec<u16>,
) -> Result<Option<RawPacket>, Error> {
    use pcap_parser::pcapng::Block;

    loop {
        match reader.next() {
            Ok((offset, block)) => {
                let packet = match block {
                    PcapBlockOwned::NG(Block::SectionHeader(_)) => {
                        // Interface ids are scoped to a section.
                        interfaces.clear();
                        None
                    }
                    PcapBlockOwned::NG(Block::InterfaceDescription(idb)) => {
                        interfaces.push(idb.linktype.0 as u16);
                        None
                    }
                    PcapBlockOwned::NG(Block::EnhancedPacket(epb)) => {
                        *frame_number += 1;
                        Some(RawPacket {
                            frame_number: *frame_number,
                            // Default if_tsresol is microseconds.
                            timestamp_us: ((epb.ts_high as i64) << 32) | (epb.ts_low as i64),
                            captured_length: epb.caplen,
                            original_length: epb.origlen,
                            link_type: interfaces
                                .get(epb.if_id as usize)
                                .copied()
                                .unwrap_or(link_type::ETHERNET),
                            data: Bytes::copy_from_slice(trim(epb.data, epb.caplen)),
                        })
                    }
                    PcapBlockOwned::NG(Block::SimplePacket(spb)) => {
                        *frame_number += 1;
                        Some(RawPacket {
                            frame_number: *frame_number,
                            timestamp_us: 0,
                            captured_length: trim(spb.data, spb.origlen).len() as u32,
                            original_length: spb.origlen,
                            link_type: interfaces.first().copied().unwrap_or(link_type::ETHERNET),
                            data: Bytes::copy_from_slice(trim(spb.data, spb.origlen)),
                        })
                    }
                    _ => None,
                };

                reader.consume(offset);
                if packet.is_some() {
                    return Ok(packet);
                }
            }
            Err(ParserError::Eof) => return Ok(None),
            Err(ParserError::Incomplete(_)) => {
                reader
                    .refill()
                    .map_err(|e| read_error(*frame_number, "pcapng refill error", e))?;
            }
            Err(e) => return Err(read_error(*frame_number, "pcapng parse error", e)),
        }
    }
}
