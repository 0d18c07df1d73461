//! Collaborators the converter depends on.

use crate::yang::{SchemaNode, TypeDefinition};
use std::sync::Arc;

/// Error that can occur when resolving a leafref.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("leafref target {path} not found")]
    NotFound { path: String },

    #[error("leafref target {path} is not a leaf or leaf-list")]
    NotTyped { path: String },

    #[error("invalid leafref path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("type {name} is not a leafref")]
    NotLeafref { name: String },

    #[error("leafref chain starting at {path} exceeds {hops} hops")]
    TooDeep { path: String, hops: usize },
}

/// Schema lookups needed to resolve leafrefs.
pub trait SchemaContext: Send + Sync {
    /// Resolve `leafref` to the type of the node it ultimately points to.
    ///
    /// `scope` is the schema node that declares `leafref`; relative paths
    /// are evaluated from it. The returned type is never a leafref.
    fn resolve_leafref(
        &self,
        leafref: &TypeDefinition,
        scope: &SchemaNode,
    ) -> Result<Arc<TypeDefinition>, ResolveError>;
}

/// Sink for generated complex models.
///
/// Implementations are shared between converters and must tolerate
/// concurrent registration. Both methods return a reference token, normally
/// the name of the registered model.
pub trait DataObjectBuilder: Send + Sync {
    /// Register a model for a `bits` or `union` type.
    fn add_model_for_complex_type(&self, ty: &TypeDefinition) -> String;

    /// Register a model for an `enumeration` type.
    fn add_enum_model(&self, ty: &TypeDefinition) -> String;
}
