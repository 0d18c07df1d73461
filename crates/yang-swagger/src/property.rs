//! Swagger 2 schema properties produced by the converter.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Prefix of local model references.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// A flat Swagger property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Property {
    Boolean,
    /// 32-bit integer (`format: int32`).
    Integer,
    /// 64-bit integer (`format: int64`).
    Long,
    String(StringProperty),
    /// Reference to a model registered elsewhere.
    Ref(RefProperty),
}

impl Property {
    /// A string property without constraints.
    pub fn string() -> Self {
        Property::String(StringProperty::default())
    }

    pub fn reference(token: impl Into<String>) -> Self {
        Property::Ref(RefProperty::new(token))
    }
}

/// A string property with optional constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringProperty {
    pub min_length: Option<i32>,
    pub max_length: Option<i32>,
    pub pattern: Option<String>,
}

/// A reference to a named model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefProperty {
    /// Token handed out by the model registry, usually a bare model name.
    pub reference: String,
}

impl RefProperty {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    /// The `$ref` value. Bare names point into `#/definitions/`.
    pub fn target(&self) -> String {
        if self.reference.starts_with("#/") {
            self.reference.clone()
        } else {
            format!("{}{}", DEFINITIONS_PREFIX, self.reference)
        }
    }

    /// Model name the reference points to.
    pub fn simple_name(&self) -> &str {
        self.reference
            .strip_prefix(DEFINITIONS_PREFIX)
            .unwrap_or(&self.reference)
    }
}

impl Serialize for Property {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Property::Boolean => map.serialize_entry("type", "boolean")?,
            Property::Integer => {
                map.serialize_entry("type", "integer")?;
                map.serialize_entry("format", "int32")?;
            }
            Property::Long => {
                map.serialize_entry("type", "integer")?;
                map.serialize_entry("format", "int64")?;
            }
            Property::String(s) => {
                map.serialize_entry("type", "string")?;
                if let Some(min) = s.min_length {
                    map.serialize_entry("minLength", &min)?;
                }
                if let Some(max) = s.max_length {
                    map.serialize_entry("maxLength", &max)?;
                }
                if let Some(pattern) = &s.pattern {
                    map.serialize_entry("pattern", pattern)?;
                }
            }
            Property::Ref(r) => map.serialize_entry("$ref", &r.target())?,
        }
        map.end()
    }
}
