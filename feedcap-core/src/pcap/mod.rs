//! Capture file reading.
//!
//! [`PcapReader`] opens a capture on disk, sniffs compression and container
//! format, and yields [`crate::io::RawPacket`]s in file order.

mod reader;

pub use reader::PcapReader;
