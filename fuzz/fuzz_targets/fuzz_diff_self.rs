#![no_main]
use libfuzzer_sys::fuzz_target;
use openapi_diff::diff::DiffEngine;

/// Fuzz the comparator and rule catalog on arbitrary reference graphs.
///
/// The input is loaded twice and compared with the byte-identity shortcut
/// disabled, so every path and schema is walked.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (Ok(base), Ok(mut revision)) = (
        openapi_diff::parsers::parse_spec_str(s, "base"),
        openapi_diff::parsers::parse_spec_str(s, "revision"),
    ) else {
        return;
    };
    revision.content_hash = 0;
    let _ = DiffEngine::new().diff(&base, &revision);
});
