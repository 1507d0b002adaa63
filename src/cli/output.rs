//! Payload output formatting.
//!
//! - `hex`: one line per payload, `<frame> <timestamp_us> <hex bytes>`
//! - `raw`: payloads back-to-back, each prefixed with its length as a
//!   big-endian u32, for piping straight into a replay tool
//! - `summary`: one human-readable line per payload, no bytes

use std::io::{self, Write};

use clap::ValueEnum;
use feedcap_core::Payload;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Frame number, timestamp and hex payload per line (default)
    Hex,
    /// Length-prefixed binary payloads
    Raw,
    /// Addresses and length per line
    Summary,
}

/// Writes payloads to a sink in one [`OutputFormat`].
pub struct PayloadWriter<W: Write> {
    format: OutputFormat,
    writer: W,
    written: usize,
}

impl<W: Write> PayloadWriter<W> {
    pub fn new(format: OutputFormat, writer: W) -> Self {
        Self {
            format,
            writer,
            written: 0,
        }
    }

    pub fn write(&mut self, payload: &Payload) -> io::Result<()> {
        match self.format {
            OutputFormat::Hex => writeln!(
                self.writer,
                "{} {} {}",
                payload.frame_number,
                payload.timestamp_us,
                hex::encode(&payload.data)
            )?,
            OutputFormat::Raw => {
                let len = u32::try_from(payload.len())
                    .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "payload over 4 GiB"))?;
                self.writer.write_all(&len.to_be_bytes())?;
                self.writer.write_all(&payload.data)?;
            }
            OutputFormat::Summary => {
                write!(
                    self.writer,
                    "#{} {} {} {} -> {} {} bytes",
                    payload.frame_number,
                    payload.timestamp_us,
                    payload.transport,
                    payload.src,
                    payload.dst,
                    payload.len()
                )?;
                if let Some(vlan) = payload.vlan_id {
                    write!(self.writer, " vlan {vlan}")?;
                }
                writeln!(self.writer)?;
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Payloads written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
