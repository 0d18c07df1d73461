//! YANG type to Swagger property conversion.
//!
//! [`TypeConverter::convert`] answers one question per call: which Swagger
//! property represents this YANG type? It works in three steps:
//!
//! 1. find the base type to dispatch on (the declared base, or the leafref
//!    target resolved through the [`SchemaContext`]),
//! 2. classify that base into a [`BaseKind`],
//! 3. build the property, delegating bits, unions and enumerations to the
//!    configured [`DataObjectBuilder`].
//!
//! String facets are looked up separately, walking the derivation chain of
//! the converted type outward until a level declares one.

use crate::config::ConverterConfig;
use crate::property::{Property, StringProperty};
use crate::traits::{DataObjectBuilder, ResolveError, SchemaContext};
use crate::yang::{IntWidth, LengthConstraint, SchemaNode, TypeDefinition, TypeKind};
use std::sync::Arc;
use tracing::debug;

/// Error that can occur when converting a type.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// A model had to be registered but no builder is configured.
    #[error("no data object builder configured (needed to convert {type_name})")]
    NoDataObjectBuilder { type_name: String },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("length bound {value} of {type_name} does not fit a 32-bit integer")]
    LengthOutOfRange { type_name: String, value: u64 },
}

/// Classification of a base type, in dispatch terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseKind {
    Boolean,
    Integer { width: IntWidth, signed: bool },
    Bits,
    Union,
    Enumeration,
    String,
    /// No dedicated mapping; converted to a plain string.
    Unrecognized,
}

impl BaseKind {
    pub fn of(ty: &TypeDefinition) -> Self {
        match &ty.kind {
            TypeKind::Boolean => BaseKind::Boolean,
            TypeKind::Int(width) => BaseKind::Integer {
                width: *width,
                signed: true,
            },
            TypeKind::Uint(width) => BaseKind::Integer {
                width: *width,
                signed: false,
            },
            TypeKind::Bits(_) => BaseKind::Bits,
            TypeKind::Union(_) => BaseKind::Union,
            TypeKind::Enumeration(_) => BaseKind::Enumeration,
            TypeKind::String(_) => BaseKind::String,
            TypeKind::Binary
            | TypeKind::Decimal64 { .. }
            | TypeKind::Empty
            | TypeKind::IdentityRef { .. }
            | TypeKind::InstanceIdentifier
            | TypeKind::Leafref { .. } => BaseKind::Unrecognized,
        }
    }
}

/// Converts YANG types to Swagger properties.
pub struct TypeConverter {
    ctx: Arc<dyn SchemaContext>,
    config: ConverterConfig,
    data_object_builder: Option<Arc<dyn DataObjectBuilder>>,
}

impl TypeConverter {
    pub fn new(ctx: Arc<dyn SchemaContext>) -> Self {
        Self::with_config(ctx, ConverterConfig::default())
    }

    pub fn with_config(ctx: Arc<dyn SchemaContext>, config: ConverterConfig) -> Self {
        Self {
            ctx,
            config,
            data_object_builder: None,
        }
    }

    /// Set the builder that registers models for enumerations, bits and unions.
    pub fn set_data_object_builder(&mut self, builder: Arc<dyn DataObjectBuilder>) {
        self.data_object_builder = Some(builder);
    }

    /// Convert `ty` to a Swagger property.
    ///
    /// `parent` is the schema node declaring `ty`; leafref paths are
    /// resolved relative to it.
    pub fn convert(
        &self,
        ty: &TypeDefinition,
        parent: &SchemaNode,
    ) -> Result<Property, ConvertError> {
        let resolved = self.resolve_leafref(ty, parent)?;
        let base = resolved.as_deref().unwrap_or_else(|| declared_base(ty));

        let kind = BaseKind::of(base);
        match kind {
            BaseKind::Boolean => return Ok(Property::Boolean),
            BaseKind::Integer { width, signed } => return Ok(integer_property(width, signed)),
            BaseKind::Bits | BaseKind::Union => return self.complex_type_ref(ty),
            BaseKind::Enumeration | BaseKind::String | BaseKind::Unrecognized => {}
        }

        // The declared base, not the leafref target: a leafref to an
        // enumeration is a plain string.
        if let Some(enumeration) = as_enumeration(ty, declared_base(ty)) {
            if self.config.enum_to_model {
                let builder = self.builder(ty)?;
                return Ok(Property::reference(builder.add_enum_model(enumeration)));
            }
        }

        match kind {
            BaseKind::String => self.string_property(ty, parent),
            _ => Ok(Property::string()),
        }
    }

    /// The leafref target type, if `ty` is a leafref.
    fn resolve_leafref(
        &self,
        ty: &TypeDefinition,
        parent: &SchemaNode,
    ) -> Result<Option<Arc<TypeDefinition>>, ResolveError> {
        if !ty.is_leafref() {
            return Ok(None);
        }
        debug!(ty = %ty.qname, parent = %parent.qname, "leaf node");
        self.ctx.resolve_leafref(ty, parent).map(Some)
    }

    /// The configured builder; converting `ty` needs one.
    fn builder(&self, ty: &TypeDefinition) -> Result<&dyn DataObjectBuilder, ConvertError> {
        self.data_object_builder
            .as_deref()
            .ok_or_else(|| ConvertError::NoDataObjectBuilder {
                type_name: ty.qname.to_string(),
            })
    }

    fn complex_type_ref(&self, ty: &TypeDefinition) -> Result<Property, ConvertError> {
        let builder = self.builder(ty)?;
        Ok(Property::reference(builder.add_model_for_complex_type(ty)))
    }

    fn string_property(
        &self,
        ty: &TypeDefinition,
        parent: &SchemaNode,
    ) -> Result<Property, ConvertError> {
        let mut property = StringProperty::default();

        if let Some(length) = length_constraint(ty) {
            property.min_length = Some(length_bound(ty, length.min)?);
            property.max_length = Some(length_bound(ty, length.max)?);
            debug!(
                parent = %parent.qname,
                ty = %ty.qname,
                min = length.min,
                max = length.max,
                "set string property range"
            );
        }

        if let Some(pattern) = pattern(ty) {
            debug!(parent = %parent.qname, ty = %ty.qname, pattern, "set string property pattern");
            property.pattern = Some(pattern.to_string());
        }

        debug!(parent = %parent.qname, ty = %ty.qname, ?property, "string property");
        Ok(Property::String(property))
    }
}

/// The declared base of `ty`; builtins are their own base.
fn declared_base(ty: &TypeDefinition) -> &TypeDefinition {
    ty.base.as_deref().unwrap_or(ty)
}

fn as_enumeration<'a>(
    ty: &'a TypeDefinition,
    base: &'a TypeDefinition,
) -> Option<&'a TypeDefinition> {
    if ty.is_enumeration() {
        Some(ty)
    } else if base.is_enumeration() {
        Some(base)
    } else {
        None
    }
}

fn integer_property(width: IntWidth, signed: bool) -> Property {
    // Only the widths that overflow int32 get int64. int8 and uint64 have no
    // dedicated mapping yet and stay int32.
    match (signed, width) {
        (true, IntWidth::W64) | (false, IntWidth::W32) => Property::Long,
        _ => Property::Integer,
    }
}

/// First length restriction on the closest level that declares one.
fn length_constraint(ty: &TypeDefinition) -> Option<LengthConstraint> {
    let mut current = Some(ty);
    while let Some(t) = current {
        if let Some(length) = t.string_facets().and_then(|f| f.lengths.first()) {
            return Some(*length);
        }
        current = t.base.as_deref();
    }
    None
}

/// First pattern on the closest level that declares a non-blank one.
fn pattern(ty: &TypeDefinition) -> Option<&str> {
    let mut current = Some(ty);
    while let Some(t) = current {
        let first = t
            .string_facets()
            .and_then(|f| f.patterns.first())
            .map(|p| p.regex.as_str());
        match first {
            Some(regex) if !regex.trim().is_empty() => return Some(regex),
            _ => current = t.base.as_deref(),
        }
    }
    None
}

fn length_bound(ty: &TypeDefinition, value: u64) -> Result<i32, ConvertError> {
    i32::try_from(value).map_err(|_| ConvertError::LengthOutOfRange {
        type_name: ty.qname.to_string(),
        value,
    })
}
