//! `wirebuf-schema` — schema data model consumed by the wirebuf code generator.
//!
//! A schema is an ordered collection of named type definitions: records
//! (concrete or abstract hierarchy heads), enums, counted sequences, and
//! primitive aliases. Field order inside a definition is load-bearing: it is
//! the declaration order, the constructor parameter order, and the wire
//! order of the generated code, all at once.
//!
//! The model is plain data with serde derives, so a front-end (IDL parser,
//! build script, test fixture) can hand definitions over as JSON or build
//! them in code through the chainable constructors.

mod def;
mod field;
mod registry;
mod scalar;

pub use def::{
    AliasDef, EnumDef, EnumVariant, Extends, SequenceDef, StructDef, TypeDef, TypePolicy,
};
pub use field::{FieldDef, FieldKind, FieldRole, KindBuilder, K};
pub use registry::{SchemaError, SchemaRegistry};
pub use scalar::ScalarKind;
