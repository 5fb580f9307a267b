//! Change record structures.
//!
//! A [`ChangeRecord`] is the sparse output of a diff: it maps property
//! names to changes and contains an entry only for properties that actually
//! differ, at every nesting level. Serialization uses the reserved marker
//! tokens [`REMOVED_MARKER`] and [`ADDED_MARKER`]; descriptor construction
//! rejects property names equal to either token, so markers cannot collide
//! with real properties.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Reserved key marking the removed side of a change.
pub const REMOVED_MARKER: &str = "-";

/// Reserved key marking the added side of a change.
pub const ADDED_MARKER: &str = "+";

/// Sparse mapping from property name to the change observed on it.
///
/// Iteration and serialization order is lexicographic by property name, so
/// re-running a diff on identical inputs produces byte-identical output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeRecord {
    entries: BTreeMap<String, PropertyChange>,
}

/// Change observed on a single property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyChange {
    /// A scalar value changed; nil sides are omitted when serialized.
    Scalar(ScalarChange),
    /// An unordered set of primitives gained and/or lost elements.
    Set(SetChange),
    /// Elements of a complex array were removed, added, or modified.
    Elements(Vec<ElementChange>),
}

/// Two-sided marker for a changed scalar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarChange {
    /// Previous value, `None` when the property was nil before.
    pub removed: Option<Value>,
    /// Current value, `None` when the property is nil now.
    pub added: Option<Value>,
}

/// Difference between two primitive arrays treated as unordered sets.
///
/// Each side is sorted by canonical rendering and omitted when empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetChange {
    pub removed: Vec<Value>,
    pub added: Vec<Value>,
}

/// Change to one element of a complex array.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementChange {
    /// Element present only on the `from` side; carries its full snapshot.
    Removed(Value),
    /// Element present only on the `to` side; carries its full snapshot.
    Added(Value),
    /// Matched element whose recursive diff is non-empty.
    Modified(ElementDelta),
}

/// Partial change record for a matched element: the primary-key fields that
/// identify it, followed by only the changed sub-properties - never the
/// full object.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDelta {
    /// Primary-key fields, taken from the `to` side of the match.
    pub key: BTreeMap<String, Value>,
    /// Changed sub-properties.
    pub changes: ChangeRecord,
}

/// Recursive change counts for a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub scalars_changed: usize,
    pub sets_changed: usize,
    pub elements_added: usize,
    pub elements_removed: usize,
    pub elements_modified: usize,
    pub total_changes: usize,
}

impl ChangeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, name: &str) -> Option<&PropertyChange> {
        self.entries.get(name)
    }

    /// Entries in lexicographic property order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyChange)> {
        self.entries.iter().map(|(name, change)| (name.as_str(), change))
    }

    pub(crate) fn insert(&mut self, name: &str, change: PropertyChange) {
        self.entries.insert(name.to_string(), change);
    }

    /// Render the record as a JSON value with the reserved marker shape.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (name, change) in &self.entries {
            map.insert(name.clone(), change.to_value());
        }
        Value::Object(map)
    }

    /// Recursive change counts.
    #[must_use]
    pub fn summarize(&self) -> DiffSummary {
        let mut summary = DiffSummary::default();
        self.accumulate(&mut summary);
        summary.total_changes = summary.scalars_changed
            + summary.sets_changed
            + summary.elements_added
            + summary.elements_removed
            + summary.elements_modified;
        summary
    }

    fn accumulate(&self, summary: &mut DiffSummary) {
        for change in self.entries.values() {
            match change {
                PropertyChange::Scalar(_) => summary.scalars_changed += 1,
                PropertyChange::Set(_) => summary.sets_changed += 1,
                PropertyChange::Elements(entries) => {
                    for entry in entries {
                        match entry {
                            ElementChange::Removed(_) => summary.elements_removed += 1,
                            ElementChange::Added(_) => summary.elements_added += 1,
                            ElementChange::Modified(delta) => {
                                summary.elements_modified += 1;
                                delta.changes.accumulate(summary);
                            }
                        }
                    }
                }
            }
        }
    }
}

impl PropertyChange {
    fn to_value(&self) -> Value {
        match self {
            Self::Scalar(scalar) => {
                let mut map = serde_json::Map::new();
                if let Some(removed) = &scalar.removed {
                    map.insert(REMOVED_MARKER.to_string(), removed.clone());
                }
                if let Some(added) = &scalar.added {
                    map.insert(ADDED_MARKER.to_string(), added.clone());
                }
                Value::Object(map)
            }
            Self::Set(set) => {
                let mut map = serde_json::Map::new();
                if !set.removed.is_empty() {
                    map.insert(REMOVED_MARKER.to_string(), Value::Array(set.removed.clone()));
                }
                if !set.added.is_empty() {
                    map.insert(ADDED_MARKER.to_string(), Value::Array(set.added.clone()));
                }
                Value::Object(map)
            }
            Self::Elements(entries) => {
                Value::Array(entries.iter().map(ElementChange::to_value).collect())
            }
        }
    }
}

impl ElementChange {
    fn to_value(&self) -> Value {
        match self {
            Self::Removed(snapshot) => {
                let mut map = serde_json::Map::new();
                map.insert(REMOVED_MARKER.to_string(), snapshot.clone());
                Value::Object(map)
            }
            Self::Added(snapshot) => {
                let mut map = serde_json::Map::new();
                map.insert(ADDED_MARKER.to_string(), snapshot.clone());
                Value::Object(map)
            }
            Self::Modified(delta) => delta.to_value(),
        }
    }
}

impl ElementDelta {
    /// Primary-key fields first, then the changed sub-properties.
    ///
    /// A changed sub-property that is itself a primary-key field is emitted
    /// once, as its change marker.
    fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (name, value) in &self.key {
            if self.changes.get(name).is_none() {
                map.insert(name.clone(), value.clone());
            }
        }
        if let Value::Object(changes) = self.changes.to_value() {
            for (name, value) in changes {
                map.insert(name, value);
            }
        }
        Value::Object(map)
    }
}

impl Serialize for ChangeRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl Serialize for PropertyChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl Serialize for ElementChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_string(record: &ChangeRecord) -> String {
        serde_json::to_string(record).expect("serializable")
    }

    #[test]
    fn test_scalar_marker_order() {
        let mut record = ChangeRecord::new();
        record.insert(
            "msrp",
            PropertyChange::Scalar(ScalarChange {
                removed: Some(json!(15000)),
                added: Some(json!(16000)),
            }),
        );
        assert_eq!(to_string(&record), r#"{"msrp":{"-":15000,"+":16000}}"#);
    }

    #[test]
    fn test_scalar_nil_side_omitted() {
        let mut record = ChangeRecord::new();
        record.insert(
            "salePrice",
            PropertyChange::Scalar(ScalarChange {
                removed: None,
                added: Some(json!(14000)),
            }),
        );
        assert_eq!(to_string(&record), r#"{"salePrice":{"+":14000}}"#);
    }

    #[test]
    fn test_set_empty_side_omitted() {
        let mut record = ChangeRecord::new();
        record.insert(
            "tags",
            PropertyChange::Set(SetChange {
                removed: vec![],
                added: vec![json!("alpha"), json!("beta")],
            }),
        );
        assert_eq!(to_string(&record), r#"{"tags":{"+":["alpha","beta"]}}"#);
    }

    #[test]
    fn test_modified_element_key_first() {
        let mut changes = ChangeRecord::new();
        changes.insert(
            "msrp",
            PropertyChange::Scalar(ScalarChange {
                removed: Some(json!(15000)),
                added: Some(json!(16000)),
            }),
        );
        let mut record = ChangeRecord::new();
        record.insert(
            "cars",
            PropertyChange::Elements(vec![ElementChange::Modified(ElementDelta {
                key: BTreeMap::from([("id".to_string(), json!("car-3"))]),
                changes,
            })]),
        );
        assert_eq!(
            to_string(&record),
            r#"{"cars":[{"id":"car-3","msrp":{"-":15000,"+":16000}}]}"#
        );
    }

    #[test]
    fn test_changed_primary_key_not_echoed_twice() {
        let mut changes = ChangeRecord::new();
        changes.insert(
            "id",
            PropertyChange::Scalar(ScalarChange {
                removed: Some(json!("CAR-3")),
                added: Some(json!("car-3")),
            }),
        );
        let delta = ElementDelta {
            key: BTreeMap::from([("id".to_string(), json!("car-3"))]),
            changes,
        };
        let mut record = ChangeRecord::new();
        record.insert("cars", PropertyChange::Elements(vec![ElementChange::Modified(delta)]));
        assert_eq!(
            to_string(&record),
            r#"{"cars":[{"id":{"-":"CAR-3","+":"car-3"}}]}"#
        );
    }

    #[test]
    fn test_summary_counts_recursively() {
        let mut nested = ChangeRecord::new();
        nested.insert(
            "label",
            PropertyChange::Scalar(ScalarChange {
                removed: Some(json!("a")),
                added: Some(json!("b")),
            }),
        );
        let mut record = ChangeRecord::new();
        record.insert(
            "cars",
            PropertyChange::Elements(vec![
                ElementChange::Removed(json!({"id": "x"})),
                ElementChange::Added(json!({"id": "y"})),
                ElementChange::Modified(ElementDelta {
                    key: BTreeMap::from([("id".to_string(), json!("z"))]),
                    changes: nested,
                }),
            ]),
        );
        record.insert(
            "name",
            PropertyChange::Scalar(ScalarChange {
                removed: Some(json!("old")),
                added: Some(json!("new")),
            }),
        );

        let summary = record.summarize();
        assert_eq!(summary.elements_removed, 1);
        assert_eq!(summary.elements_added, 1);
        assert_eq!(summary.elements_modified, 1);
        assert_eq!(summary.scalars_changed, 2);
        assert_eq!(summary.total_changes, 5);
    }

    #[test]
    fn test_empty_record() {
        let record = ChangeRecord::new();
        assert!(record.is_empty());
        assert_eq!(record.len(), 0);
        assert_eq!(to_string(&record), "{}");
        assert_eq!(record.summarize(), DiffSummary::default());
    }
}
