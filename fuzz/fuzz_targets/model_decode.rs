#![no_main]

use bytefreq::persistence::{decode_model, MAX_TOTAL};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary model files must decode or fail without panicking, and a decoded
    // histogram must be internally consistent.
    if let Ok(model) = decode_model(data) {
        let histogram = model.histogram;
        let sum: u128 = histogram.counts().iter().map(|&c| u128::from(c)).sum();
        assert_eq!(u128::from(histogram.total()), sum);
        assert!(histogram.total() <= MAX_TOTAL);
    }
});
