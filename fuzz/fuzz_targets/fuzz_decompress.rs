//! Fuzz target for compression detection and decompression.

#![no_main]

use feedcap_core::io::{Compression, DecompressReader};
use libfuzzer_sys::fuzz_target;
use std::io::{Cursor, Read};

/// Cap on decompressed bytes read per input.
const MAX_DECOMPRESS_SIZE: u64 = 1024 * 1024;

fuzz_target!(|data: &[u8]| {
    let compression = Compression::detect(data);

    if let Ok(reader) = DecompressReader::new(Cursor::new(data), compression) {
        let mut sink = Vec::new();
        let _ = reader.take(MAX_DECOMPRESS_SIZE).read_to_end(&mut sink);
    }
});
