#![no_main]
use libfuzzer_sys::fuzz_target;
use schema_delta::{DiffEngine, TypeDescriptor};
use std::sync::Arc;

/// Fuzz the diff engine with arbitrary JSON pairs.
///
/// The input is split at the first NUL byte into `from` and `to` documents;
/// both are diffed under a small fixed schema. The engine must never panic:
/// malformed shapes surface as errors, not crashes.
fuzz_target!(|data: &[u8]| {
    let Some(split) = data.iter().position(|b| *b == 0) else {
        return;
    };
    let (from_bytes, to_bytes) = data.split_at(split);
    let (Ok(from), Ok(to)) = (
        std::str::from_utf8(from_bytes),
        std::str::from_utf8(&to_bytes[1..]),
    ) else {
        return;
    };
    let (Ok(from), Ok(to)) = (
        serde_json::from_str::<serde_json::Value>(from),
        serde_json::from_str::<serde_json::Value>(to),
    ) else {
        return;
    };

    let _ = DiffEngine::new().diff(&from, &to, &descriptor());
});

fn descriptor() -> Arc<TypeDescriptor> {
    let item = TypeDescriptor::builder("Item")
        .string("id")
        .number("count")
        .boolean("active")
        .primary_key(["id"])
        .build()
        .expect("valid descriptor");
    TypeDescriptor::builder("Root")
        .string("title")
        .string("tags")
        .complex("items", item)
        .build()
        .expect("valid descriptor")
}
