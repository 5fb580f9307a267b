//! Type descriptors: declarative metadata for one complex type.
//!
//! A [`TypeDescriptor`] declares which properties a type has, the kind of
//! each property, and the primary key used to match array elements across
//! versions. Descriptors are built once through [`TypeDescriptorBuilder`],
//! are immutable afterwards, and are shared via `Arc` across many diff
//! calls.
//!
//! The `properties` map must cover every property of the described type,
//! including ones that may be absent at runtime - the engine only visits
//! declared properties.

use crate::diff::{ADDED_MARKER, REMOVED_MARKER};
use crate::error::{DeltaError, Result, SchemaErrorKind};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Kind of a property value.
///
/// Arrays are not a distinct kind: an array-valued property has the kind of
/// its elements. A property holding `string[]` is still `String`; a property
/// holding nested objects is `Complex` and carries the element descriptor.
/// The recursion dispatches on this tag, never on runtime casts.
#[derive(Debug, Clone)]
pub enum PropertyKind {
    Boolean,
    Number,
    String,
    Complex(Arc<TypeDescriptor>),
}

impl PropertyKind {
    /// Diagnostic label for error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Complex(_) => "complex",
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(_))
    }
}

/// Descriptor for a single property of a type.
///
/// The `name` is bound from the owning map key at construction time, never
/// supplied by hand, so it cannot disagree with the key it is stored under.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    name: String,
    kind: PropertyKind,
}

impl PropertyDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    /// Element descriptor for complex properties, `None` otherwise.
    pub fn nested(&self) -> Option<&Arc<TypeDescriptor>> {
        match &self.kind {
            PropertyKind::Complex(nested) => Some(nested),
            _ => None,
        }
    }
}

/// Declarative metadata describing one complex type.
#[derive(Debug)]
pub struct TypeDescriptor {
    name: String,
    properties: BTreeMap<String, PropertyDescriptor>,
    primary_key: Vec<String>,
}

impl TypeDescriptor {
    /// Start building a descriptor for the named type.
    pub fn builder(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(name)
    }

    /// Diagnostic type name, used in error messages and paths.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared properties in lexicographic name order.
    ///
    /// This order fixes the engine's deterministic visit order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.values()
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(name)
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Property names whose combined values identify an instance within a
    /// collection. Empty on types never used as array elements.
    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }
}

/// Builder producing a fully bound, immutable [`TypeDescriptor`].
///
/// Name binding and validation happen once here, as a single atomic
/// construction step; nothing mutates a descriptor after `build`.
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: String,
    properties: BTreeMap<String, PropertyDescriptor>,
    primary_key: Vec<String>,
    defects: Vec<SchemaErrorKind>,
}

impl TypeDescriptorBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
            primary_key: Vec::new(),
            defects: Vec::new(),
        }
    }

    /// Declare a property of the given kind.
    pub fn property(mut self, name: impl Into<String>, kind: PropertyKind) -> Self {
        let name = name.into();
        if name.is_empty() || name == REMOVED_MARKER || name == ADDED_MARKER {
            self.defects.push(SchemaErrorKind::InvalidPropertyName {
                type_name: self.name.clone(),
                name,
            });
            return self;
        }
        let descriptor = PropertyDescriptor {
            name: name.clone(),
            kind,
        };
        if self.properties.insert(name.clone(), descriptor).is_some() {
            self.defects.push(SchemaErrorKind::DuplicateProperty {
                type_name: self.name.clone(),
                name,
            });
        }
        self
    }

    pub fn boolean(self, name: impl Into<String>) -> Self {
        self.property(name, PropertyKind::Boolean)
    }

    pub fn number(self, name: impl Into<String>) -> Self {
        self.property(name, PropertyKind::Number)
    }

    pub fn string(self, name: impl Into<String>) -> Self {
        self.property(name, PropertyKind::String)
    }

    /// Declare a complex property whose array elements follow `element`.
    pub fn complex(self, name: impl Into<String>, element: Arc<TypeDescriptor>) -> Self {
        self.property(name, PropertyKind::Complex(element))
    }

    /// Declare the primary key property names.
    pub fn primary_key<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = names.into_iter().map(Into::into).collect();
        self
    }

    /// Validate and produce the immutable descriptor.
    pub fn build(mut self) -> Result<Arc<TypeDescriptor>> {
        for key in &self.primary_key {
            match self.properties.get(key) {
                None => self.defects.push(SchemaErrorKind::UnknownPrimaryKeyProperty {
                    type_name: self.name.clone(),
                    key: key.clone(),
                }),
                Some(descriptor) if descriptor.kind.is_complex() => {
                    self.defects.push(SchemaErrorKind::ComplexPrimaryKeyProperty {
                        type_name: self.name.clone(),
                        key: key.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        if let Some(defect) = self.defects.into_iter().next() {
            return Err(DeltaError::schema(
                format!("building descriptor for type '{}'", self.name),
                defect,
            ));
        }

        Ok(Arc::new(TypeDescriptor {
            name: self.name,
            properties: self.properties,
            primary_key: self.primary_key,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature() -> Arc<TypeDescriptor> {
        TypeDescriptor::builder("Feature")
            .string("code")
            .string("label")
            .primary_key(["code"])
            .build()
            .expect("valid descriptor")
    }

    #[test]
    fn test_builder_binds_names_and_sorts_properties() {
        let desc = TypeDescriptor::builder("Car")
            .string("id")
            .number("msrp")
            .string("make")
            .complex("features", feature())
            .primary_key(["id"])
            .build()
            .expect("valid descriptor");

        let names: Vec<&str> = desc.properties().map(PropertyDescriptor::name).collect();
        assert_eq!(names, vec!["features", "id", "make", "msrp"]);

        let features = desc.property("features").expect("declared");
        assert_eq!(features.name(), "features");
        assert!(features.kind().is_complex());
        assert_eq!(features.nested().expect("nested").name(), "Feature");
    }

    #[test]
    fn test_unknown_primary_key_rejected() {
        let err = TypeDescriptor::builder("Car")
            .string("id")
            .primary_key(["vin"])
            .build()
            .expect_err("must reject");
        assert!(matches!(
            err,
            DeltaError::Schema {
                source: SchemaErrorKind::UnknownPrimaryKeyProperty { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_complex_primary_key_rejected() {
        let err = TypeDescriptor::builder("Car")
            .complex("features", feature())
            .primary_key(["features"])
            .build()
            .expect_err("must reject");
        assert!(matches!(
            err,
            DeltaError::Schema {
                source: SchemaErrorKind::ComplexPrimaryKeyProperty { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_reserved_property_names_rejected() {
        for name in ["-", "+", ""] {
            let err = TypeDescriptor::builder("Car")
                .string(name)
                .build()
                .expect_err("must reject reserved name");
            assert!(matches!(
                err,
                DeltaError::Schema {
                    source: SchemaErrorKind::InvalidPropertyName { .. },
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let err = TypeDescriptor::builder("Car")
            .string("id")
            .number("id")
            .build()
            .expect_err("must reject duplicate");
        assert!(matches!(
            err,
            DeltaError::Schema {
                source: SchemaErrorKind::DuplicateProperty { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_empty_primary_key_allowed_for_root_types() {
        let desc = TypeDescriptor::builder("Collection")
            .complex("cars", feature())
            .build()
            .expect("root types need no primary key");
        assert!(desc.primary_key().is_empty());
    }
}
