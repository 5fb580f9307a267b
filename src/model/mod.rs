//! Descriptor model: declarative metadata for schema-described data graphs.
//!
//! A [`TypeDescriptor`] declares, for one complex type, which properties
//! exist, their kind, and the primary key used to match array elements
//! across versions. Descriptors are immutable after construction and are
//! meant to be built once and reused across many diff calls, either by hand
//! through the builder or from a [`SchemaFile`] document cached in a
//! [`DescriptorRegistry`].

mod descriptor;
mod registry;
mod schema_file;

pub use descriptor::{PropertyDescriptor, PropertyKind, TypeDescriptor, TypeDescriptorBuilder};
pub use registry::DescriptorRegistry;
pub use schema_file::{
    generate_json_schema, ComplexDef, PropertyDef, ScalarKind, SchemaFile, TypeDef,
};
