//! Conversion of YANG type definitions into Swagger schema properties.
//!
//! `yang-swagger` maps one YANG type at a time onto the flat property model of
//! Swagger 2: derivation chains are unwound, leafrefs are resolved through a
//! [`SchemaContext`], string facets are inherited from the closest ancestor
//! that declares them, and enumerations, bits and unions are registered as
//! named models through a [`DataObjectBuilder`].
//!
//! # Architecture
//!
//! ```text
//!  YANG model            Converter                 Swagger
//! ────────────     ──────────────────────     ─────────────────
//! TypeDefinition ─┐                        ┌─> Property (boolean,
//! SchemaNode     ─┼─> TypeConverter ───────┤     integer, string, $ref)
//! SchemaContext  ─┘        │               └─> Model definitions
//!                          └── DataObjectBuilder (ModelRegistry)
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use yang_swagger::yang::{QName, SchemaNode, SchemaPath, TypeDefinition};
//! use yang_swagger::{ModelRegistry, SchemaTree, TypeConverter};
//!
//! let name = TypeDefinition::string().with_length(1, 64);
//! let leaf = SchemaNode::leaf(
//!     SchemaPath::root().child(QName::new("m", "name")),
//!     Arc::new(name.clone()),
//! );
//!
//! let mut converter = TypeConverter::new(Arc::new(SchemaTree::new()));
//! converter.set_data_object_builder(Arc::new(ModelRegistry::default()));
//!
//! let property = converter.convert(&name, &leaf).unwrap();
//! assert_eq!(
//!     serde_json::to_string(&property).unwrap(),
//!     r#"{"type":"string","minLength":1,"maxLength":64}"#
//! );
//! ```

pub mod config;
pub mod context;
pub mod converter;
pub mod property;
pub mod registry;
pub mod traits;
pub mod yang;

pub use config::{Config, ConfigError, ConverterConfig, ModelConfig};
pub use context::SchemaTree;
pub use converter::{BaseKind, ConvertError, TypeConverter};
pub use property::{Property, RefProperty, StringProperty};
pub use registry::{Model, ModelRegistry};
pub use traits::{DataObjectBuilder, ResolveError, SchemaContext};
