//! Declarative schema-definition files.
//!
//! Descriptors can be hand-built through [`TypeDescriptor::builder`], or
//! loaded from a YAML/JSON document:
//!
//! ```yaml
//! root: VehicleCollection
//! types:
//!   VehicleCollection:
//!     properties:
//!       cars: { element: Car }
//!   Car:
//!     primary_key: [id]
//!     properties:
//!       id: string
//!       msrp: number
//! ```
//!
//! Resolution is topological and rejects unknown references, cyclic type
//! graphs, and element types without a primary key up front - a malformed
//! schema never reaches the engine.

use super::{DescriptorRegistry, TypeDescriptor};
use crate::error::{DeltaError, Result, SchemaErrorKind};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Serde model of a schema-definition document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    /// Default root type for diff operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    /// Type definitions, keyed by type name.
    pub types: IndexMap<String, TypeDef>,
}

/// Definition of a single type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TypeDef {
    /// Property names identifying an element within a collection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primary_key: Vec<String>,
    /// Properties of the type. Must cover every property of the described
    /// data, including ones absent at runtime.
    #[serde(default)]
    pub properties: IndexMap<String, PropertyDef>,
}

/// Definition of a single property: a bare scalar kind, or a complex
/// reference to the element type of a nested array.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PropertyDef {
    Scalar(ScalarKind),
    Complex(ComplexDef),
}

/// Primitive property kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Boolean,
    Number,
    String,
}

/// Complex property definition: the element type of the nested array.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ComplexDef {
    /// Name of the element type.
    pub element: String,
}

impl SchemaFile {
    /// Load a schema file, selecting the parser by file extension
    /// (`.json` parses as JSON, everything else as YAML).
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DeltaError::io(path, e))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Resolve all type definitions into an immutable descriptor registry.
    pub fn resolve(&self) -> Result<DescriptorRegistry> {
        if let Some(root) = &self.root {
            if !self.types.contains_key(root) {
                return Err(DeltaError::schema(
                    "resolving schema root",
                    SchemaErrorKind::UnknownType {
                        name: root.clone(),
                        referrer: "root".to_string(),
                    },
                ));
            }
        }

        let mut resolved: HashMap<String, Arc<TypeDescriptor>> = HashMap::new();
        while resolved.len() < self.types.len() {
            let mut progressed = false;
            for (name, def) in &self.types {
                if resolved.contains_key(name) {
                    continue;
                }
                if !self.dependencies_resolved(name, def, &resolved)? {
                    continue;
                }
                let descriptor = build_type(name, def, &resolved)?;
                resolved.insert(name.clone(), descriptor);
                progressed = true;
            }
            if !progressed {
                let unresolved: Vec<&str> = self
                    .types
                    .keys()
                    .filter(|name| !resolved.contains_key(*name))
                    .map(String::as_str)
                    .collect();
                return Err(DeltaError::schema(
                    "resolving schema types",
                    SchemaErrorKind::CyclicTypes {
                        names: unresolved.join(", "),
                    },
                ));
            }
        }

        let mut registry = DescriptorRegistry::new();
        for name in self.types.keys() {
            if let Some(descriptor) = resolved.get(name) {
                registry.insert(descriptor.clone());
            }
        }
        if let Some(root) = &self.root {
            registry.set_root(root);
        }
        Ok(registry)
    }

    /// Check that every complex reference of `def` exists and is resolved.
    fn dependencies_resolved(
        &self,
        name: &str,
        def: &TypeDef,
        resolved: &HashMap<String, Arc<TypeDescriptor>>,
    ) -> Result<bool> {
        for (prop_name, prop) in &def.properties {
            if let PropertyDef::Complex(complex) = prop {
                if !self.types.contains_key(&complex.element) {
                    return Err(DeltaError::schema(
                        "resolving schema types",
                        SchemaErrorKind::UnknownType {
                            name: complex.element.clone(),
                            referrer: format!("{name}.{prop_name}"),
                        },
                    ));
                }
                if !resolved.contains_key(&complex.element) {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

fn build_type(
    name: &str,
    def: &TypeDef,
    resolved: &HashMap<String, Arc<TypeDescriptor>>,
) -> Result<Arc<TypeDescriptor>> {
    let mut builder = TypeDescriptor::builder(name);
    for (prop_name, prop) in &def.properties {
        builder = match prop {
            PropertyDef::Scalar(ScalarKind::Boolean) => builder.boolean(prop_name),
            PropertyDef::Scalar(ScalarKind::Number) => builder.number(prop_name),
            PropertyDef::Scalar(ScalarKind::String) => builder.string(prop_name),
            PropertyDef::Complex(complex) => {
                let element = resolved.get(&complex.element).cloned().ok_or_else(|| {
                    DeltaError::schema(
                        format!("resolving type '{name}'"),
                        SchemaErrorKind::UnknownType {
                            name: complex.element.clone(),
                            referrer: format!("{name}.{prop_name}"),
                        },
                    )
                })?;
                if element.primary_key().is_empty() {
                    return Err(DeltaError::schema(
                        format!("resolving type '{name}'"),
                        SchemaErrorKind::MissingPrimaryKey {
                            type_name: complex.element.clone(),
                        },
                    ));
                }
                builder.complex(prop_name, element)
            }
        };
    }
    builder.primary_key(def.primary_key.iter().cloned()).build()
}

/// Generate a JSON Schema for the schema-definition file format.
///
/// Documents every field a schema file can carry; editors can use it for
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(SchemaFile);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
