//! Schema-driven diff engine implementation.

use super::reconcile::index_elements;
use super::snapshot::project_snapshot;
use super::{ChangeRecord, ElementChange, ElementDelta, PropertyChange, ScalarChange, SetChange};
use crate::error::{DeltaError, DiffErrorKind, Result};
use crate::logging::{DiffLogger, TracingLogger};
use crate::model::{PropertyKind, TypeDescriptor};
use crate::utils::{canonical_string, defined, field, kind_label, values_equal};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Schema-driven diff engine for nested data graphs.
///
/// The engine is a pure function of its inputs plus the configured logger
/// side-channel; it holds no state across calls, and descriptors are
/// immutable, so independent calls may run concurrently.
pub struct DiffEngine {
    logger: Arc<dyn DiffLogger>,
    max_depth: Option<usize>,
}

impl DiffEngine {
    /// Create a new diff engine with the default `tracing`-backed logger.
    pub fn new() -> Self {
        Self {
            logger: Arc::new(TracingLogger),
            max_depth: None,
        }
    }

    /// Route engine diagnostics to a custom logger.
    pub fn with_logger(mut self, logger: Arc<dyn DiffLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Guard recursion with a maximum element-nesting depth.
    ///
    /// Schemas are expected to be acyclic; the guard bounds the walk when
    /// that assumption cannot be trusted.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Compare two versions of a data graph under the given descriptor.
    ///
    /// Returns a sparse [`ChangeRecord`] containing only properties that
    /// differ. Configuration faults in the descriptor are logged and skip
    /// the offending property; data-shape faults and internal invariant
    /// violations abort the call with an error.
    pub fn diff(
        &self,
        from: &Value,
        to: &Value,
        descriptor: &TypeDescriptor,
    ) -> Result<ChangeRecord> {
        // Structurally identical inputs cannot produce changes
        if from == to {
            return Ok(ChangeRecord::new());
        }
        self.diff_object(from, to, descriptor, descriptor.name(), 0)
    }

    fn diff_object(
        &self,
        from: &Value,
        to: &Value,
        descriptor: &TypeDescriptor,
        path: &str,
        depth: usize,
    ) -> Result<ChangeRecord> {
        if let Some(limit) = self.max_depth {
            if depth > limit {
                return Err(DeltaError::diff(
                    format!("walking '{path}'"),
                    DiffErrorKind::DepthExceeded { limit },
                ));
            }
        }

        let mut record = ChangeRecord::new();
        for property in descriptor.properties() {
            let name = property.name();
            let prop_path = format!("{path}.{name}");
            let from_value = field(from, name);
            let to_value = field(to, name);

            match property.kind() {
                PropertyKind::Complex(nested) => {
                    if nested.primary_key().is_empty() {
                        self.logger.error(&format!(
                            "skipping property '{prop_path}': element type '{}' declares \
                             no primary key for reconciliation",
                            nested.name()
                        ));
                        continue;
                    }

                    let (from_items, to_items): (&[Value], &[Value]) =
                        match (defined(from_value), defined(to_value)) {
                            (None, None) => continue,
                            (Some(Value::Array(f)), Some(Value::Array(t))) => (f, t),
                            (f, t) => {
                                return Err(DeltaError::diff(
                                    format!("walking '{prop_path}'"),
                                    DiffErrorKind::UnsupportedShape {
                                        path: prop_path.clone(),
                                        detail: format!(
                                            "from is {}, to is {}",
                                            kind_label(f),
                                            kind_label(t)
                                        ),
                                    },
                                ));
                            }
                        };

                    let entries =
                        self.reconcile_elements(from_items, to_items, nested, &prop_path, depth)?;
                    if !entries.is_empty() {
                        record.insert(name, PropertyChange::Elements(entries));
                    }
                }
                _ => match (defined(from_value), defined(to_value)) {
                    (Some(Value::Array(f)), Some(Value::Array(t))) => {
                        if let Some(set) = diff_primitive_sets(f, t) {
                            record.insert(name, PropertyChange::Set(set));
                        }
                    }
                    _ => {
                        if !values_equal(from_value, to_value) {
                            record.insert(
                                name,
                                PropertyChange::Scalar(ScalarChange {
                                    removed: defined(from_value).cloned(),
                                    added: defined(to_value).cloned(),
                                }),
                            );
                        }
                    }
                },
            }
        }
        Ok(record)
    }

    /// Reconcile two arrays of complex elements by primary key.
    ///
    /// Emits removed entries in `from` order, added entries in `to` order,
    /// then modified entries in `from` order.
    fn reconcile_elements(
        &self,
        from_items: &[Value],
        to_items: &[Value],
        element: &TypeDescriptor,
        path: &str,
        depth: usize,
    ) -> Result<Vec<ElementChange>> {
        let from_index = index_elements(from_items, element.primary_key(), path)?;
        let to_index = index_elements(to_items, element.primary_key(), path)?;

        let mut entries = Vec::new();
        let mut matched = Vec::new();

        for (key, from_element) in &from_index {
            if to_index.contains_key(key) {
                matched.push(key.clone());
            } else {
                entries.push(ElementChange::Removed(project_snapshot(
                    from_element,
                    element,
                    path,
                )?));
            }
        }

        for (key, to_element) in &to_index {
            if !from_index.contains_key(key) {
                entries.push(ElementChange::Added(project_snapshot(
                    to_element,
                    element,
                    path,
                )?));
            }
        }

        for key in matched {
            let (Some(from_element), Some(to_element)) =
                (from_index.get(&key), to_index.get(&key))
            else {
                return Err(DeltaError::diff(
                    format!("reconciling array at '{path}'"),
                    DiffErrorKind::MatchLookupFailed {
                        path: path.to_string(),
                        key,
                    },
                ));
            };

            let element_path = format!("{path}[{key}]");
            let changes =
                self.diff_object(from_element, to_element, element, &element_path, depth + 1)?;
            if changes.is_empty() {
                continue;
            }

            let mut key_fields = BTreeMap::new();
            for name in element.primary_key() {
                if let Some(value) = defined(field(to_element, name)) {
                    key_fields.insert(name.clone(), value.clone());
                }
            }
            entries.push(ElementChange::Modified(ElementDelta {
                key: key_fields,
                changes,
            }));
        }

        Ok(entries)
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Diff two primitive arrays as unordered sets.
///
/// Membership uses structural equality under canonical rendering, so object
/// key order is irrelevant. Each emitted side is sorted by canonical string.
fn diff_primitive_sets(from_items: &[Value], to_items: &[Value]) -> Option<SetChange> {
    let from_keys: BTreeMap<String, &Value> = from_items
        .iter()
        .map(|item| (canonical_string(item), item))
        .collect();
    let to_keys: BTreeMap<String, &Value> = to_items
        .iter()
        .map(|item| (canonical_string(item), item))
        .collect();

    let removed: Vec<Value> = from_keys
        .iter()
        .filter(|(key, _)| !to_keys.contains_key(*key))
        .map(|(_, item)| (*item).clone())
        .collect();
    let added: Vec<Value> = to_keys
        .iter()
        .filter(|(key, _)| !from_keys.contains_key(*key))
        .map(|(_, item)| (*item).clone())
        .collect();

    if removed.is_empty() && added.is_empty() {
        None
    } else {
        Some(SetChange { removed, added })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::CollectingLogger;
    use crate::model::TypeDescriptor;
    use serde_json::json;

    fn tag_descriptor() -> Arc<TypeDescriptor> {
        TypeDescriptor::builder("Tag")
            .string("name")
            .boolean("pinned")
            .primary_key(["name"])
            .build()
            .expect("valid")
    }

    fn board_descriptor() -> Arc<TypeDescriptor> {
        TypeDescriptor::builder("Board")
            .string("title")
            .string("labels")
            .complex("tags", tag_descriptor())
            .build()
            .expect("valid")
    }

    #[test]
    fn test_identity_is_empty() {
        let board = json!({"title": "x", "tags": [{"name": "a", "pinned": true}]});
        let engine = DiffEngine::new();
        let record = engine
            .diff(&board, &board, &board_descriptor())
            .expect("diff");
        assert!(record.is_empty());
    }

    #[test]
    fn test_scalar_change() {
        let engine = DiffEngine::new();
        let record = engine
            .diff(
                &json!({"title": "old"}),
                &json!({"title": "new"}),
                &board_descriptor(),
            )
            .expect("diff");
        assert_eq!(
            record.get("title"),
            Some(&PropertyChange::Scalar(ScalarChange {
                removed: Some(json!("old")),
                added: Some(json!("new")),
            }))
        );
    }

    #[test]
    fn test_primitive_set_change_sorted() {
        let engine = DiffEngine::new();
        let record = engine
            .diff(
                &json!({"labels": ["zeta", "alpha"]}),
                &json!({"labels": ["alpha", "beta", "gamma"]}),
                &board_descriptor(),
            )
            .expect("diff");
        let Some(PropertyChange::Set(set)) = record.get("labels") else {
            panic!("expected set change");
        };
        assert_eq!(set.removed, vec![json!("zeta")]);
        assert_eq!(set.added, vec![json!("beta"), json!("gamma")]);
    }

    #[test]
    fn test_primitive_array_reorder_is_no_change() {
        let engine = DiffEngine::new();
        let record = engine
            .diff(
                &json!({"labels": ["a", "b"]}),
                &json!({"labels": ["b", "a"]}),
                &board_descriptor(),
            )
            .expect("diff");
        assert!(record.is_empty());
    }

    #[test]
    fn test_element_reorder_is_no_change() {
        let engine = DiffEngine::new();
        let record = engine
            .diff(
                &json!({"tags": [{"name": "a"}, {"name": "b"}]}),
                &json!({"tags": [{"name": "b"}, {"name": "a"}]}),
                &board_descriptor(),
            )
            .expect("diff");
        assert!(record.is_empty());
    }

    #[test]
    fn test_case_insensitive_element_identity() {
        let engine = DiffEngine::new();
        let record = engine
            .diff(
                &json!({"tags": [{"name": "Alpha", "pinned": false}]}),
                &json!({"tags": [{"name": "alpha", "pinned": false}]}),
                &board_descriptor(),
            )
            .expect("diff");
        let Some(PropertyChange::Elements(entries)) = record.get("tags") else {
            panic!("expected element changes");
        };
        // Same identity: matched, with the name change reported, not
        // remove-and-add.
        assert_eq!(entries.len(), 1);
        assert!(matches!(entries[0], ElementChange::Modified(_)));
    }

    #[test]
    fn test_mismatched_complex_shape_is_fatal() {
        let engine = DiffEngine::new();
        let err = engine
            .diff(
                &json!({"tags": [{"name": "a"}]}),
                &json!({"tags": {"name": "a"}}),
                &board_descriptor(),
            )
            .expect_err("must reject");
        assert!(err.is_data_error());
    }

    #[test]
    fn test_one_sided_nil_complex_is_fatal() {
        let engine = DiffEngine::new();
        let err = engine
            .diff(
                &json!({}),
                &json!({"tags": [{"name": "a"}]}),
                &board_descriptor(),
            )
            .expect_err("must reject");
        assert!(err.is_data_error());
    }

    #[test]
    fn test_missing_primary_key_logs_and_skips_property() {
        let keyless = TypeDescriptor::builder("Item")
            .string("name")
            .build()
            .expect("valid");
        let root = TypeDescriptor::builder("Root")
            .string("title")
            .complex("items", keyless)
            .build()
            .expect("valid");

        let logger = Arc::new(CollectingLogger::new());
        let engine = DiffEngine::new().with_logger(logger.clone());
        let record = engine
            .diff(
                &json!({"title": "old", "items": [{"name": "a"}]}),
                &json!({"title": "new", "items": []}),
                &root,
            )
            .expect("partial result");

        // Sibling property still diffed; offending property skipped
        assert!(record.get("title").is_some());
        assert!(record.get("items").is_none());
        let errors = logger.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Root.items"));
    }

    #[test]
    fn test_depth_guard() {
        let engine = DiffEngine::new().with_max_depth(0);
        let err = engine
            .diff(
                &json!({"tags": [{"name": "a", "pinned": false}]}),
                &json!({"tags": [{"name": "a", "pinned": true}]}),
                &board_descriptor(),
            )
            .expect_err("must reject");
        assert!(matches!(
            err,
            DeltaError::Diff {
                source: DiffErrorKind::DepthExceeded { limit: 0 },
                ..
            }
        ));
    }

    #[test]
    fn test_null_and_absent_are_equal() {
        let engine = DiffEngine::new();
        let record = engine
            .diff(
                &json!({"title": null}),
                &json!({}),
                &board_descriptor(),
            )
            .expect("diff");
        assert!(record.is_empty());
    }
}
