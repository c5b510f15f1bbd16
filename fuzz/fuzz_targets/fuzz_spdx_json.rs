#![no_main]
use libfuzzer_sys::fuzz_target;
use make_sbom::codec::{DocumentCodec, SpdxJsonCodec};

/// Fuzz the SPDX JSON reader.
///
/// Wraps input in an SPDX JSON envelope to reach the package conversion
/// rather than failing at format detection. Anything that parses must
/// also serialize.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let codec = SpdxJsonCodec::new();

        if let Ok(doc) = codec.parse_str(s) {
            let _ = codec.to_string(&doc);
        }

        if s.len() < 10_000 {
            let wrapped = format!(
                r#"{{"spdxVersion":"SPDX-2.2","SPDXID":"SPDXRef-DOCUMENT","name":"fuzz","documentNamespace":"https://example.com/fuzz","creationInfo":{{"created":"2024-01-01T00:00:00Z","creators":["Tool: fuzz"]}},"packages":[{s}]}}"#,
            );
            if let Ok(doc) = codec.parse_str(&wrapped) {
                let _ = codec.to_string(&doc);
            }
        }
    }
});
