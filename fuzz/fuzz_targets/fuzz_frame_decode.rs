//! Fuzz target for the frame decoder.
//!
//! Every supported link type walks the same bytes; a located payload must
//! always lie inside the frame.

#![no_main]

use feedcap_core::io::link_type;
use feedcap_core::{decode_frame, FeedFilter, FrameDecode};
use libfuzzer_sys::fuzz_target;

const LINK_TYPES: [u16; 5] = [
    link_type::ETHERNET,
    link_type::LINUX_SLL,
    link_type::RAW,
    link_type::IPV4,
    link_type::IPV6,
];

fuzz_target!(|data: &[u8]| {
    for lt in LINK_TYPES {
        for filter in [FeedFilter::udp(), FeedFilter::tcp()] {
            if let FrameDecode::Payload(p) = decode_frame(lt, data, &filter) {
                assert!(!p.data.is_empty());
                assert!(p.data.len() <= data.len());
            }
        }
    }
});
