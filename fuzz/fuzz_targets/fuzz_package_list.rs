#![no_main]
use libfuzzer_sys::fuzz_target;
use make_sbom::sources::parse_package_list;

/// Fuzz both package-list dialects and the license resolution behind them.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for record in parse_package_list(s) {
            let _ = record.to_package();
        }

        let dpkg = format!("\"St\",\"Name\",\"Version\",\"Arch\",\"Description\",\"Licenses\"\n{s}");
        for record in parse_package_list(&dpkg) {
            let _ = record.to_package();
        }
    }
});
