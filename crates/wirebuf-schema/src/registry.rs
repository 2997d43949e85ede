use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::def::{StructDef, TypeDef};

/// Error produced while assembling a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("type `{0}` is already defined")]
    DuplicateType(String),
}

/// Ordered collection of named type definitions.
///
/// Declaration order is preserved and observable: iteration, generation and
/// subtype dispatch all follow it, so a schema produces the same output on
/// every run. The registry is filled by the front-end and read-only during
/// generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaRegistry {
    types: IndexMap<String, TypeDef>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition under its own name.
    pub fn define(&mut self, def: impl Into<TypeDef>) -> Result<(), SchemaError> {
        let def = def.into();
        let name = def.name().to_string();
        if self.types.contains_key(&name) {
            return Err(SchemaError::DuplicateType(name));
        }
        self.types.insert(name, def);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeDef)> {
        self.types.iter()
    }

    /// Concrete records extending `base`, in declaration order.
    pub fn subtypes_of<'a>(&'a self, base: &'a str) -> impl Iterator<Item = &'a StructDef> + 'a {
        self.types.values().filter_map(move |def| match def {
            TypeDef::Struct(d) if d.extends.as_ref().is_some_and(|e| e.base == base) => Some(d),
            _ => None,
        })
    }
}
