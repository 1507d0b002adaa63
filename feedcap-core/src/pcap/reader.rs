//! Capture file reader with automatic compression handling.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::{CaptureOpenError, Error};
use crate::io::{Compression, FileDecoder, GenericPcapReader, PacketReader, PcapFormat, RawPacket};

/// Reader for pcap and pcapng files, with optional decompression.
///
/// Holds exactly one open file handle, released when the reader is dropped.
///
/// # Example
///
/// ```ignore
/// use feedcap_core::pcap::PcapReader;
///
/// let mut reader = PcapReader::open("capture.pcap.gz")?;
/// while let Some(packet) = reader.next_packet()? {
///     println!("Frame {}: {} bytes", packet.frame_number, packet.data.len());
/// }
/// ```
pub struct PcapReader {
    inner: GenericPcapReader<FileDecoder>,
    path: PathBuf,
    compression: Compression,
}

impl PcapReader {
    /// Open a capture file for reading.
    ///
    /// Fails if the file is missing or unreadable, or if its (decompressed)
    /// contents do not start with a pcap or pcapng header.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CaptureOpenError> {
        let path = path.as_ref();
        let display = || path.display().to_string();

        let mut file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CaptureOpenError::FileNotFound { path: display() },
            _ => CaptureOpenError::Unreadable {
                path: display(),
                source: e,
            },
        })?;
        let unreadable = |e| CaptureOpenError::Unreadable {
            path: display(),
            source: e,
        };

        let mut sniff = Vec::with_capacity(Compression::SNIFF_LEN);
        (&mut file)
            .take(Compression::SNIFF_LEN as u64)
            .read_to_end(&mut sniff)
            .map_err(unreadable)?;
        let compression = Compression::detect(&sniff);
        file.seek(SeekFrom::Start(0)).map_err(unreadable)?;

        let mut decoder = open_decoder(file, compression)?;

        // Format detection needs the decompressed magic.
        let mut magic = [0u8; 4];
        decoder
            .read_exact(&mut magic)
            .map_err(|e| CaptureOpenError::InvalidFormat {
                reason: format!("File too short to read capture magic: {e}"),
            })?;
        let format = PcapFormat::detect(&magic)?;

        // The parser must see the whole header on its first read: rewind the
        // same handle and decode afresh.
        let mut file = decoder.into_inner();
        file.seek(SeekFrom::Start(0)).map_err(unreadable)?;
        let inner = GenericPcapReader::with_format(open_decoder(file, compression)?, format)?;

        tracing::debug!(
            path = %path.display(),
            %compression,
            ?format,
            "opened capture"
        );

        Ok(Self {
            inner,
            path: path.to_path_buf(),
            compression,
        })
    }

    /// Path this reader was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compression detected on the file.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Container format detected after decompression.
    pub fn format(&self) -> PcapFormat {
        self.inner.format()
    }

    /// Get the link type of the capture (e.g., 1 = Ethernet).
    #[inline]
    pub fn link_type(&self) -> u16 {
        self.inner.link_type()
    }

    /// Get the current frame count.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.inner.frame_count()
    }

    /// Read the next packet.
    ///
    /// Returns `Ok(None)` at end of file.
    #[inline]
    pub fn next_packet(&mut self) -> Result<Option<RawPacket>, Error> {
        self.inner.next_packet()
    }
}

fn open_decoder(file: File, compression: Compression) -> Result<FileDecoder, CaptureOpenError> {
    FileDecoder::new(file, compression).map_err(|e| CaptureOpenError::InvalidFormat {
        reason: format!("Failed to create {compression} decoder: {e}"),
    })
}

impl PacketReader for PcapReader {
    #[inline]
    fn next_packet(&mut self) -> Result<Option<RawPacket>, Error> {
        self.inner.next_packet()
    }

    #[inline]
    fn frame_count(&self) -> u64 {
        self.inner.frame_count()
    }
}

/// Iterator adapter for PcapReader.
impl Iterator for PcapReader {
    type Item = Result<RawPacket, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_packet().transpose()
    }
}
