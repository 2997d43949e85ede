//! `wirebuf-gen` — the code-generation core of wirebuf.
//!
//! Given a [`wirebuf_schema::SchemaRegistry`], this crate lowers each type
//! definition into a language-independent description of the methods a
//! target-language emitter should produce: constructor, equality, ordering,
//! serialize, deserialize, size, accessors and rendering. The description is
//! a set of [`MethodDescriptor`] values whose bodies are structured
//! instruction templates, not source text, so any emitter (and the reference
//! interpreter in [`interp`]) can lower them without re-deriving wire
//! semantics.
//!
//! The entry points are [`TypeFormatter::for_type`] for one type and
//! [`bundle`]/[`bundle_all`] for the assembled per-type output.

mod bundle;
mod descriptor;
mod dispatch;
mod error;
mod formatter;
mod ops;

pub mod interp;

pub use bundle::{bundle, bundle_all, TypeBundle};
pub use descriptor::{Annotation, Argument, MethodBody, MethodDescriptor, ValueKind};
pub use dispatch::DispatchTable;
pub use error::GenError;
pub use formatter::{
    AliasFormatter, BaseFormatter, EnumFormatter, RecordFormatter, SequenceFormatter,
    TypeFormatter,
};
pub use ops::{DispatchArm, Template, WireOp};
