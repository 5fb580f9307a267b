//! Human-readable summary report generator.

use crate::diff::{ChangeRecord, ElementChange, PropertyChange};
use crate::utils::canonical_string;
use serde_json::Value;

/// Brief terminal-oriented rendering of a change record.
///
/// Scalar changes print as `~ name: old -> new`, one-sided elements as
/// `-`/`+` lines with their snapshots, and modified elements as a
/// primary-key header followed by their nested changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryReporter;

impl SummaryReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the change record as plain text.
    #[must_use]
    pub fn generate(&self, record: &ChangeRecord) -> String {
        if record.is_empty() {
            return "No changes detected.\n".to_string();
        }

        let mut out = String::new();
        write_record(&mut out, record, 0);

        let summary = record.summarize();
        out.push('\n');
        out.push_str(&format!(
            "{} change(s): {} added, {} removed, {} modified, {} value(s), {} set(s)\n",
            summary.total_changes,
            summary.elements_added,
            summary.elements_removed,
            summary.elements_modified,
            summary.scalars_changed,
            summary.sets_changed,
        ));
        out
    }
}

fn write_record(out: &mut String, record: &ChangeRecord, indent: usize) {
    let pad = "  ".repeat(indent);
    for (name, change) in record.iter() {
        match change {
            PropertyChange::Scalar(scalar) => {
                out.push_str(&format!(
                    "{pad}~ {name}: {} -> {}\n",
                    render_side(scalar.removed.as_ref()),
                    render_side(scalar.added.as_ref()),
                ));
            }
            PropertyChange::Set(set) => {
                out.push_str(&format!("{pad}~ {name}:"));
                if !set.removed.is_empty() {
                    out.push_str(&format!(
                        " -{}",
                        canonical_string(&Value::Array(set.removed.clone()))
                    ));
                }
                if !set.added.is_empty() {
                    out.push_str(&format!(
                        " +{}",
                        canonical_string(&Value::Array(set.added.clone()))
                    ));
                }
                out.push('\n');
            }
            PropertyChange::Elements(entries) => {
                out.push_str(&format!("{pad}{name}:\n"));
                for entry in entries {
                    match entry {
                        ElementChange::Removed(snapshot) => {
                            out.push_str(&format!("{pad}  - {}\n", canonical_string(snapshot)));
                        }
                        ElementChange::Added(snapshot) => {
                            out.push_str(&format!("{pad}  + {}\n", canonical_string(snapshot)));
                        }
                        ElementChange::Modified(delta) => {
                            let key: Vec<String> = delta
                                .key
                                .iter()
                                .map(|(k, v)| format!("{k}={}", canonical_string(v)))
                                .collect();
                            out.push_str(&format!("{pad}  ~ [{}]\n", key.join(", ")));
                            write_record(out, &delta.changes, indent + 2);
                        }
                    }
                }
            }
        }
    }
}

fn render_side(value: Option<&Value>) -> String {
    value.map_or_else(|| "(none)".to_string(), canonical_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{ElementDelta, ScalarChange, SetChange};
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_empty_record() {
        let output = SummaryReporter::new().generate(&ChangeRecord::new());
        assert_eq!(output, "No changes detected.\n");
    }

    #[test]
    fn test_nested_rendering() {
        let mut nested = ChangeRecord::new();
        nested.insert(
            "msrp",
            PropertyChange::Scalar(ScalarChange {
                removed: Some(json!(15000)),
                added: Some(json!(16000)),
            }),
        );
        nested.insert(
            "salePrice",
            PropertyChange::Scalar(ScalarChange {
                removed: None,
                added: Some(json!(14000)),
            }),
        );

        let mut record = ChangeRecord::new();
        record.insert(
            "cars",
            PropertyChange::Elements(vec![
                ElementChange::Removed(json!({"id": "car-1"})),
                ElementChange::Modified(ElementDelta {
                    key: BTreeMap::from([("id".to_string(), json!("car-3"))]),
                    changes: nested,
                }),
            ]),
        );
        record.insert(
            "labels",
            PropertyChange::Set(SetChange {
                removed: vec![json!("zeta")],
                added: vec![],
            }),
        );

        let output = SummaryReporter::new().generate(&record);
        let expected = concat!(
            "cars:\n",
            "  - {\"id\":\"car-1\"}\n",
            "  ~ [id=\"car-3\"]\n",
            "    ~ msrp: 15000 -> 16000\n",
            "    ~ salePrice: (none) -> 14000\n",
            "~ labels: -[\"zeta\"]\n",
            "\n",
            "5 change(s): 0 added, 1 removed, 1 modified, 2 value(s), 1 set(s)\n",
        );
        assert_eq!(output, expected);
    }
}
