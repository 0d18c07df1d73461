//! Registry of generated Swagger models.
//!
//! [`ModelRegistry`] is the stock [`DataObjectBuilder`]: it turns enumeration,
//! bits and union types into named definitions and hands back the model name
//! as the reference token.

use crate::config::ModelConfig;
use crate::property::Property;
use crate::traits::DataObjectBuilder;
use crate::yang::{QName, TypeDefinition, TypeKind};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// A Swagger model definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Model {
    #[serde(rename = "type")]
    pub model_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Property>,
}

impl Model {
    fn new(model_type: &'static str, description: Option<String>) -> Self {
        Self {
            model_type,
            description,
            enum_values: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    /// `type: string` restricted to the enumeration's names.
    pub fn enumeration(ty: &TypeDefinition) -> Self {
        let mut model = Self::new("string", ty.description.clone());
        model.enum_values = enum_names(ty);
        model
    }

    /// An object with one boolean flag per bit.
    pub fn bits(ty: &TypeDefinition) -> Self {
        let mut model = Self::new("object", ty.description.clone());
        if let TypeKind::Bits(bits) = &ty.kind {
            model.properties = bits
                .iter()
                .map(|bit| (bit.name.clone(), Property::Boolean))
                .collect();
        }
        model
    }

    /// Unions have no Swagger 2 counterpart; they become strings whose
    /// description lists the member types.
    pub fn union(ty: &TypeDefinition) -> Self {
        let members = match &ty.kind {
            TypeKind::Union(members) => members
                .iter()
                .map(|m| m.kind.keyword())
                .collect::<Vec<_>>()
                .join(" | "),
            _ => String::new(),
        };
        Self::new("string", Some(format!("union of {}", members)))
    }
}

/// Names of an enumeration, taken from the closest level that lists any.
fn enum_names(ty: &TypeDefinition) -> Vec<String> {
    let mut current = Some(ty);
    while let Some(t) = current {
        match &t.kind {
            TypeKind::Enumeration(pairs) if !pairs.is_empty() => {
                return pairs.iter().map(|p| p.name.clone()).collect();
            }
            _ => {}
        }
        current = t.base.as_deref();
    }
    Vec::new()
}

/// Thread-safe store of generated models, keyed by model name.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    config: ModelConfig,
    models: RwLock<BTreeMap<String, Model>>,
}

impl ModelRegistry {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            models: RwLock::new(BTreeMap::new()),
        }
    }

    /// Snapshot of all registered models in name order.
    pub fn definitions(&self) -> BTreeMap<String, Model> {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The registered models as a Swagger `definitions` object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.definitions())
    }

    pub fn get(&self, name: &str) -> Option<Model> {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn model_name(&self, qname: &QName) -> String {
        if self.config.camel_case_names {
            camel_case(&qname.name)
        } else {
            qname.name.clone()
        }
    }

    /// Store `model` under the type's name. An identical model already stored
    /// under that name is reused; a different one pushes this model to the
    /// first free numbered name.
    fn register(&self, ty: &TypeDefinition, model: Model) -> String {
        let base = self.model_name(&ty.qname);
        let mut models = self.models.write().unwrap_or_else(PoisonError::into_inner);

        let mut name = base.clone();
        let mut suffix = 1;
        loop {
            match models.get(&name) {
                Some(existing) if *existing == model => {
                    debug!(model = %name, ty = %ty.qname, "reusing registered model");
                    return name;
                }
                Some(_) => {
                    suffix += 1;
                    name = format!("{}{}", base, suffix);
                }
                None => {
                    debug!(model = %name, ty = %ty.qname, "registered model");
                    models.insert(name.clone(), model);
                    return name;
                }
            }
        }
    }
}

impl DataObjectBuilder for ModelRegistry {
    fn add_model_for_complex_type(&self, ty: &TypeDefinition) -> String {
        let model = match &ty.kind {
            TypeKind::Bits(_) => Model::bits(ty),
            TypeKind::Union(_) => Model::union(ty),
            _ => Model::new("string", ty.description.clone()),
        };
        self.register(ty, model)
    }

    fn add_enum_model(&self, ty: &TypeDefinition) -> String {
        self.register(ty, Model::enumeration(ty))
    }
}

/// `admin-status` -> `AdminStatus`.
fn camel_case(name: &str) -> String {
    let out: String = name
        .split(['-', '_', '.'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    if out.is_empty() {
        "Model".to_string()
    } else {
        out
    }
}
