//! Fuzz target for opening capture files from disk.
//!
//! Exercises the path-based entry point end to end: compression sniffing,
//! decompressed magic detection, rewinding the handle and header parsing.

#![no_main]

use std::io::Write;

use feedcap_core::{extract_payloads, Error};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(mut file) = tempfile::NamedTempFile::new() else {
        return;
    };
    if file.write_all(data).and_then(|_| file.flush()).is_err() {
        return;
    }

    match extract_payloads(file.path(), 64) {
        Ok(mut payloads) => {
            let emitted = payloads.by_ref().filter(|p| p.is_ok()).count();
            assert!(emitted <= 64);
            assert!(payloads.is_closed());
        }
        Err(err) => assert!(matches!(err, Error::CaptureOpen(_))),
    }
});
