//! Named descriptor registry.
//!
//! Descriptors are built once and reused across many diff invocations; the
//! registry is the caller-side cache holding them by type name, in
//! declaration order.

use super::TypeDescriptor;
use indexmap::IndexMap;
use std::sync::Arc;

/// Order-preserving registry of resolved type descriptors.
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    types: IndexMap<String, Arc<TypeDescriptor>>,
    root: Option<String>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its own type name.
    ///
    /// Re-registering a name replaces the previous descriptor; existing
    /// `Arc` holders keep the version they resolved.
    pub fn insert(&mut self, descriptor: Arc<TypeDescriptor>) {
        self.types
            .insert(descriptor.name().to_string(), descriptor);
    }

    /// Mark the named type as the default diff root.
    pub fn set_root(&mut self, name: impl Into<String>) {
        self.root = Some(name.into());
    }

    pub fn get(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        self.types.get(name).cloned()
    }

    /// The default root descriptor, when one was declared.
    pub fn root(&self) -> Option<Arc<TypeDescriptor>> {
        self.root.as_deref().and_then(|name| self.get(name))
    }

    pub fn root_name(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<TypeDescriptor>)> {
        self.types.iter().map(|(name, desc)| (name.as_str(), desc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup_and_root() {
        let car = TypeDescriptor::builder("Car")
            .string("id")
            .primary_key(["id"])
            .build()
            .expect("valid");

        let mut registry = DescriptorRegistry::new();
        registry.insert(car);
        registry.set_root("Car");

        assert_eq!(registry.len(), 1);
        assert!(registry.get("Car").is_some());
        assert!(registry.get("Truck").is_none());
        assert_eq!(registry.root().expect("root").name(), "Car");
    }

    #[test]
    fn test_missing_root_descriptor() {
        let mut registry = DescriptorRegistry::new();
        registry.set_root("Ghost");
        assert!(registry.root().is_none());
        assert_eq!(registry.root_name(), Some("Ghost"));
    }
}
