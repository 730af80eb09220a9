#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    structdiff_fuzz::fuzz_parsed(data);
    structdiff_fuzz::fuzz_diff(data);
});
