//! Command-line argument definitions.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use feedcap_core::{ExtractConfig, FeedFilter, Transport, DEFAULT_MAX_PAYLOADS};

use super::OutputFormat;

/// Transport carrying the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportArg {
    /// UDP datagrams
    Udp,
    /// TCP segments (no reassembly)
    Tcp,
}

impl From<TransportArg> for Transport {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::Udp => Transport::Udp,
            TransportArg::Tcp => Transport::Tcp,
        }
    }
}

/// Extract transport payloads from a packet capture for feed replay.
#[derive(Parser, Debug)]
#[command(name = "feedcap")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Capture file (pcap or pcapng, optionally gzip or zstd compressed)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Stop after this many payloads
    #[arg(short = 'n', long = "max-payloads", default_value_t = DEFAULT_MAX_PAYLOADS)]
    pub max_payloads: usize,

    /// Transport carrying the feed
    #[arg(long = "transport", value_enum, default_value = "udp")]
    pub transport: TransportArg,

    /// Only take payloads sent to this port (repeatable)
    #[arg(short = 'p', long = "port", value_name = "PORT")]
    pub ports: Vec<u16>,

    /// Only take payloads sent from this port (repeatable)
    #[arg(long = "src-port", value_name = "PORT")]
    pub src_ports: Vec<u16>,

    /// Only take payloads sent from this address
    #[arg(long = "src", value_name = "IP")]
    pub src: Option<IpAddr>,

    /// Only take payloads sent to this address (e.g. a multicast group)
    #[arg(long = "dst", value_name = "IP")]
    pub dst: Option<IpAddr>,

    /// Fail on the first malformed frame instead of skipping it
    #[arg(long = "strict")]
    pub strict: bool,

    /// Output format for stdout
    #[arg(long = "format", value_enum, default_value = "hex")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Feed filter described by the selection flags.
    pub fn filter(&self) -> FeedFilter {
        let mut filter = FeedFilter::default().with_transport(self.transport.into());
        for &port in &self.ports {
            filter = filter.dst_port(port);
        }
        for &port in &self.src_ports {
            filter = filter.src_port(port);
        }
        if let Some(src) = self.src {
            filter = filter.src_addr(src);
        }
        if let Some(dst) = self.dst {
            filter = filter.dst_addr(dst);
        }
        filter
    }

    pub fn extract_config(&self) -> ExtractConfig {
        ExtractConfig::default()
            .with_max_payloads(self.max_payloads)
            .with_filter(self.filter())
            .strict(self.strict)
    }

    /// Default log level for the `-v` count; `RUST_LOG` takes precedence.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
