//! Snapshot projection for one-sided array elements.
//!
//! Elements present on exactly one side of a diff are rendered as full
//! nested snapshots under their own descriptor, giving the audit record
//! enough context to understand what was removed or added without the
//! original dataset. Snapshots are sparse: nil properties are omitted
//! entirely, and complex sub-collections appear only when non-empty.

use crate::error::{DeltaError, DiffErrorKind, Result};
use crate::model::{PropertyKind, TypeDescriptor};
use crate::utils::{field, is_nil, kind_label};
use serde_json::Value;

/// Render a full, sparse snapshot of `element` under `descriptor`.
///
/// Properties are emitted in lexicographic order. A complex property whose
/// value is present but not an array is a data-shape error.
pub(crate) fn project_snapshot(
    element: &Value,
    descriptor: &TypeDescriptor,
    path: &str,
) -> Result<Value> {
    let mut out = serde_json::Map::new();
    for property in descriptor.properties() {
        let name = property.name();
        let value = field(element, name);
        match property.kind() {
            PropertyKind::Complex(nested) => {
                if is_nil(value) {
                    continue;
                }
                let Some(Value::Array(items)) = value else {
                    return Err(DeltaError::diff(
                        format!("projecting snapshot of '{}'", descriptor.name()),
                        DiffErrorKind::UnsupportedShape {
                            path: format!("{path}.{name}"),
                            detail: format!(
                                "value is {}, expected an array of '{}'",
                                kind_label(value),
                                nested.name()
                            ),
                        },
                    ));
                };
                let rendered = items
                    .iter()
                    .map(|item| project_snapshot(item, nested, &format!("{path}.{name}")))
                    .collect::<Result<Vec<Value>>>()?;
                if !rendered.is_empty() {
                    out.insert(name.to_string(), Value::Array(rendered));
                }
            }
            _ => {
                if let Some(value) = value {
                    if !value.is_null() {
                        out.insert(name.to_string(), value.clone());
                    }
                }
            }
        }
    }
    Ok(Value::Object(out))
}
