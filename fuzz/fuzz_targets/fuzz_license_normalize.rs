#![no_main]
use libfuzzer_sys::fuzz_target;
use make_sbom::license::normalize;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let once = normalize(s);
        assert_eq!(normalize(&once.to_string()), once);
    }
});
