#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the document loading entry point.
///
/// Feeds arbitrary UTF-8 strings to `parse_spec_str`, which sniffs JSON or
/// YAML and then resolves every `$ref` in the document.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = openapi_diff::parsers::parse_spec_str(s, "fuzz");
    }
});
