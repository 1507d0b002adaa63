//! Compression detection and transparent decompression.
//!
//! Captures are frequently archived compressed. [`DecompressReader`] wraps the
//! raw file so the pcap parser only ever sees the decompressed byte stream.

use std::fs::File;
#[cfg(feature = "compress-zstd")]
use std::io::BufReader;
use std::io::{self, Read};

use flate2::read::MultiGzDecoder;

/// Detected compression format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// No compression
    None,
    /// Gzip (.gz)
    Gzip,
    /// Zstandard (.zst)
    #[cfg(feature = "compress-zstd")]
    Zstd,
}

impl Compression {
    /// Number of leading bytes needed by [`Compression::detect`].
    pub const SNIFF_LEN: usize = 4;

    /// Detect compression format from magic bytes.
    pub fn detect(data: &[u8]) -> Self {
        match data {
            // Gzip: 1f 8b
            [0x1f, 0x8b, ..] => Compression::Gzip,

            // Zstd: 28 b5 2f fd
            #[cfg(feature = "compress-zstd")]
            [0x28, 0xb5, 0x2f, 0xfd, ..] => Compression::Zstd,

            _ => Compression::None,
        }
    }

    /// Check if this represents compressed data.
    pub fn is_compressed(&self) -> bool {
        !matches!(self, Compression::None)
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compression::None => write!(f, "none"),
            Compression::Gzip => write!(f, "gzip"),
            #[cfg(feature = "compress-zstd")]
            Compression::Zstd => write!(f, "zstd"),
        }
    }
}

/// Decompression reader over any `R: Read`.
pub enum DecompressReader<R: Read> {
    /// No compression - pass-through
    None(R),

    /// Gzip decompression (multi-member streams included)
    Gzip(MultiGzDecoder<R>),

    /// Zstandard decompression
    #[cfg(feature = "compress-zstd")]
    Zstd(zstd::Decoder<'static, BufReader<R>>),
}

/// Decompressing reader over a capture file on disk.
pub type FileDecoder = DecompressReader<File>;

impl<R: Read> DecompressReader<R> {
    /// Create a decompression reader with explicit compression format.
    pub fn new(source: R, compression: Compression) -> io::Result<Self> {
        match compression {
            Compression::None => Ok(DecompressReader::None(source)),
            Compression::Gzip => Ok(DecompressReader::Gzip(MultiGzDecoder::new(source))),
            #[cfg(feature = "compress-zstd")]
            Compression::Zstd => Ok(DecompressReader::Zstd(zstd::Decoder::new(source)?)),
        }
    }

    /// Get the compression format this reader handles.
    pub fn compression(&self) -> Compression {
        match self {
            DecompressReader::None(_) => Compression::None,
            DecompressReader::Gzip(_) => Compression::Gzip,
            #[cfg(feature = "compress-zstd")]
            DecompressReader::Zstd(_) => Compression::Zstd,
        }
    }

    /// Unwrap the underlying source.
    ///
    /// Any bytes the decoder buffered ahead are lost; seek the source before
    /// reading it again.
    pub fn into_inner(self) -> R {
        match self {
            DecompressReader::None(r) => r,
            DecompressReader::Gzip(r) => r.into_inner(),
            #[cfg(feature = "compress-zstd")]
            DecompressReader::Zstd(r) => r.finish().into_inner(),
        }
    }
}

impl<R: Read> Read for DecompressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            DecompressReader::None(r) => r.read(buf),
            DecompressReader::Gzip(r) => r.read(buf),
            #[cfg(feature = "compress-zstd")]
            DecompressReader::Zstd(r) => r.read(buf),
        }
    }
}
