//! Identity-based array reconciliation.
//!
//! Elements of a complex array are matched across versions by a canonical
//! key derived from the element type's primary key, not by position. The
//! key is case-insensitive: two elements whose key values differ only in
//! letter case are the same identity.

use crate::error::{DeltaError, DiffErrorKind, Result};
use crate::utils::{field, key_fragment};
use indexmap::IndexMap;
use serde_json::Value;

/// Compute the canonical identity key of an element.
///
/// Primary-key names are sorted lexicographically and concatenated as
/// `name:normalized;` fragments, with values string-coerced and lowercased.
pub(crate) fn canonical_key(element: &Value, primary_key: &[String]) -> String {
    let mut names: Vec<&String> = primary_key.iter().collect();
    names.sort();
    let mut key = String::new();
    for name in names {
        key.push_str(name);
        key.push(':');
        key.push_str(&key_fragment(field(element, name)));
        key.push(';');
    }
    key
}

/// Index one side of an array by canonical key, preserving input order.
///
/// Duplicate canonical keys within a single array are a fatal data error:
/// identity-based matching would otherwise silently pick an arbitrary
/// occurrence.
pub(crate) fn index_elements<'a>(
    items: &'a [Value],
    primary_key: &[String],
    path: &str,
) -> Result<IndexMap<String, &'a Value>> {
    let mut index = IndexMap::with_capacity(items.len());
    for item in items {
        let key = canonical_key(item, primary_key);
        if index.insert(key.clone(), item).is_some() {
            return Err(DeltaError::diff(
                format!("reconciling array at '{path}'"),
                DiffErrorKind::DuplicateKey {
                    path: path.to_string(),
                    key,
                },
            ));
        }
    }
    Ok(index)
}
