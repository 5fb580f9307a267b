#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz schema-definition file parsing and resolution.
///
/// Feeds arbitrary UTF-8 strings through the YAML parser and the
/// topological resolver, exercising unknown-reference, cycle, and
/// primary-key validation paths.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(file) = schema_delta::SchemaFile::from_yaml_str(s) {
            let _ = file.resolve();
        }
    }
});
