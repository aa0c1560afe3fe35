#![no_main]

use beve::decode_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = decode_slice(data);
});
