//! Fuzz target for capture parsing through the payload sequence.
//!
//! Covers magic detection, pcap/pcapng header and record parsing, and the
//! extractor's handling of reader errors and arbitrary frame bytes.

#![no_main]

use feedcap_core::io::{GenericPcapReader, PcapFormat};
use feedcap_core::{ExtractConfig, PayloadExtractor};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let Ok(format) = PcapFormat::detect(data) else {
        return;
    };
    let Ok(reader) = GenericPcapReader::with_format(Cursor::new(data), format) else {
        return;
    };

    let extractor = PayloadExtractor::new(ExtractConfig::default().with_max_payloads(64));
    let mut payloads = extractor.from_reader(reader);
    let emitted = payloads.by_ref().filter(|p| p.is_ok()).count();

    assert!(emitted <= 64);
    assert!(payloads.is_closed());
});
