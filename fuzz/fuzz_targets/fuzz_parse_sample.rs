#![no_main]

use libfuzzer_sys::fuzz_target;

use speedup_core::sample::parse_sample;

fuzz_target!(|data: &[u8]| {
    // Arbitrary program output must never panic and never yield an unusable time
    if let Ok(seconds) = parse_sample(data) {
        assert!(seconds.is_finite());
        assert!(seconds >= 0.0);
    }
});
