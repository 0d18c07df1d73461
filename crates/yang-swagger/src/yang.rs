//! YANG schema model consumed by the converter.
//!
//! Type definitions form derivation chains: every derived type points at its
//! immediate base through [`TypeDefinition::base`] and repeats the builtin
//! [`TypeKind`] of the chain, carrying only the facets it declares itself.
//! The chain ends at a builtin type with no base.

use std::fmt;
use std::sync::Arc;

/// A qualified YANG name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QName {
    /// Module the name is defined in.
    pub module: String,
    /// Local name (e.g., "interface-name").
    pub name: String,
}

impl QName {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Name of a builtin type. Builtins live in the pseudo-module `yang`.
    pub fn builtin(name: &str) -> Self {
        Self::new("yang", name)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.name)
    }
}

/// Absolute path of a schema node from its module root.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaPath(pub Vec<QName>);

impl SchemaPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, qname: QName) -> Self {
        let mut steps = self.0.clone();
        steps.push(qname);
        Self(steps)
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    pub fn last(&self) -> Option<&QName> {
        self.0.last()
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for step in &self.0 {
            write!(f, "/{}", step)?;
        }
        Ok(())
    }
}

/// Width of an integer builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

/// A `length` restriction. Only the outer bounds are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthConstraint {
    pub min: u64,
    pub max: u64,
}

/// A `pattern` restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternConstraint {
    /// The regular expression as written in the module.
    pub regex: String,
}

/// Facets a string type declares itself (inherited ones are not repeated).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringFacets {
    pub lengths: Vec<LengthConstraint>,
    pub patterns: Vec<PatternConstraint>,
}

/// A named bit of a `bits` type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bit {
    pub name: String,
    pub position: u32,
}

/// A member of an `enumeration` type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumPair {
    pub name: String,
    pub value: i32,
}

/// The builtin kind of a type, with the facets declared at this level.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Binary,
    Bits(Vec<Bit>),
    Boolean,
    Decimal64 { fraction_digits: u8 },
    Empty,
    Enumeration(Vec<EnumPair>),
    IdentityRef { identity: QName },
    InstanceIdentifier,
    Int(IntWidth),
    Uint(IntWidth),
    /// Reference to the type of another leaf, by path.
    Leafref { path: String },
    String(StringFacets),
    Union(Vec<Arc<TypeDefinition>>),
}

impl TypeKind {
    /// The YANG keyword of the builtin.
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Binary => "binary",
            TypeKind::Bits(_) => "bits",
            TypeKind::Boolean => "boolean",
            TypeKind::Decimal64 { .. } => "decimal64",
            TypeKind::Empty => "empty",
            TypeKind::Enumeration(_) => "enumeration",
            TypeKind::IdentityRef { .. } => "identityref",
            TypeKind::InstanceIdentifier => "instance-identifier",
            TypeKind::Int(IntWidth::W8) => "int8",
            TypeKind::Int(IntWidth::W16) => "int16",
            TypeKind::Int(IntWidth::W32) => "int32",
            TypeKind::Int(IntWidth::W64) => "int64",
            TypeKind::Uint(IntWidth::W8) => "uint8",
            TypeKind::Uint(IntWidth::W16) => "uint16",
            TypeKind::Uint(IntWidth::W32) => "uint32",
            TypeKind::Uint(IntWidth::W64) => "uint64",
            TypeKind::Leafref { .. } => "leafref",
            TypeKind::String(_) => "string",
            TypeKind::Union(_) => "union",
        }
    }
}

/// A YANG type definition: a builtin, a typedef, or an inline restriction.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub qname: QName,
    /// Immediate base type. `None` for builtins.
    pub base: Option<Arc<TypeDefinition>>,
    pub kind: TypeKind,
    pub description: Option<String>,
}

impl TypeDefinition {
    /// A builtin type, named after its keyword.
    pub fn builtin(kind: TypeKind) -> Self {
        Self {
            qname: QName::builtin(kind.keyword()),
            base: None,
            kind,
            description: None,
        }
    }

    /// A type derived from `base`. The kind must match the base's builtin kind.
    pub fn derived(qname: QName, base: Arc<TypeDefinition>, kind: TypeKind) -> Self {
        Self {
            qname,
            base: Some(base),
            kind,
            description: None,
        }
    }

    /// Derive a restriction of `base` that declares no facets of its own.
    pub fn restrict(qname: QName, base: Arc<TypeDefinition>) -> Self {
        let kind = match &base.kind {
            TypeKind::String(_) => TypeKind::String(StringFacets::default()),
            other => other.clone(),
        };
        Self::derived(qname, base, kind)
    }

    pub fn boolean() -> Self {
        Self::builtin(TypeKind::Boolean)
    }

    pub fn string() -> Self {
        Self::builtin(TypeKind::String(StringFacets::default()))
    }

    pub fn int(width: IntWidth) -> Self {
        Self::builtin(TypeKind::Int(width))
    }

    pub fn uint(width: IntWidth) -> Self {
        Self::builtin(TypeKind::Uint(width))
    }

    pub fn leafref(path: impl Into<String>) -> Self {
        Self::builtin(TypeKind::Leafref { path: path.into() })
    }

    pub fn enumeration(names: &[&str]) -> Self {
        let pairs = names
            .iter()
            .zip(0..)
            .map(|(name, value)| EnumPair {
                name: name.to_string(),
                value,
            })
            .collect();
        Self::builtin(TypeKind::Enumeration(pairs))
    }

    pub fn bits(names: &[&str]) -> Self {
        let bits = names
            .iter()
            .zip(0..)
            .map(|(name, position)| Bit {
                name: name.to_string(),
                position,
            })
            .collect();
        Self::builtin(TypeKind::Bits(bits))
    }

    pub fn union(members: Vec<Arc<TypeDefinition>>) -> Self {
        Self::builtin(TypeKind::Union(members))
    }

    /// Rename the type (e.g., to give an inline type the name of its leaf).
    pub fn named(mut self, qname: QName) -> Self {
        self.qname = qname;
        self
    }

    /// Attach the `description` statement; registered models carry it.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a length restriction. No-op unless this is a string type.
    pub fn with_length(mut self, min: u64, max: u64) -> Self {
        if let TypeKind::String(facets) = &mut self.kind {
            facets.lengths.push(LengthConstraint { min, max });
        }
        self
    }

    /// Add a pattern restriction. No-op unless this is a string type.
    pub fn with_pattern(mut self, regex: impl Into<String>) -> Self {
        if let TypeKind::String(facets) = &mut self.kind {
            facets.patterns.push(PatternConstraint {
                regex: regex.into(),
            });
        }
        self
    }

    /// The facets declared on this level, if it is a string type.
    pub fn string_facets(&self) -> Option<&StringFacets> {
        match &self.kind {
            TypeKind::String(facets) => Some(facets),
            _ => None,
        }
    }

    pub fn is_leafref(&self) -> bool {
        matches!(self.kind, TypeKind::Leafref { .. })
    }

    pub fn is_enumeration(&self) -> bool {
        matches!(self.kind, TypeKind::Enumeration(_))
    }
}

/// A node of the schema tree. Leaves and leaf-lists carry a type;
/// containers and lists do not.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub qname: QName,
    pub path: SchemaPath,
    pub ty: Option<Arc<TypeDefinition>>,
}

impl SchemaNode {
    /// A typeless node (container, list) at `path`.
    pub fn container(path: SchemaPath) -> Self {
        Self {
            qname: path.last().cloned().unwrap_or_else(|| QName::builtin("root")),
            path,
            ty: None,
        }
    }

    /// A leaf at `path` of type `ty`.
    pub fn leaf(path: SchemaPath, ty: Arc<TypeDefinition>) -> Self {
        Self {
            ty: Some(ty),
            ..Self::container(path)
        }
    }
}
