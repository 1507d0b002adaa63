//! feedcap CLI entry point.

use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use feedcap::cli::{Args, PayloadWriter};
use feedcap_core::PayloadExtractor;

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so raw output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_level().into()),
        )
        .with_writer(io::stderr)
        .init();

    let extractor = PayloadExtractor::new(args.extract_config());
    let mut payloads = extractor
        .open(&args.file)
        .with_context(|| format!("Failed to open capture: {}", args.file.display()))?;

    let stdout = io::stdout().lock();
    let mut writer = PayloadWriter::new(args.format, BufWriter::new(stdout));

    for payload in payloads.by_ref() {
        let payload = payload
            .with_context(|| format!("Failed to read capture: {}", args.file.display()))?;
        match writer.write(&payload) {
            Ok(()) => {}
            // Downstream closed early (e.g. `| head`); nothing left to do.
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
            Err(e) => return Err(e).context("Failed to write payload"),
        }
    }
    writer.finish().context("Failed to flush output")?;

    let stats = payloads.stats();
    info!(
        payloads = stats.payloads_emitted,
        frames_read = stats.frames_read,
        mismatched = stats.mismatched,
        malformed = stats.malformed,
        state = ?payloads.state(),
        "done"
    );
    Ok(())
}
