//! Per-kind type formatters behind one capability surface.
//!
//! [`TypeFormatter`] is the sum of the five formatter kinds. Constructing one
//! resolves everything that can fail (parent lookup, dispatch table, constant
//! shapes); afterwards every descriptor getter is infallible, stateless and
//! idempotent: calling it twice yields equal descriptors.

mod alias;
mod base;
mod enums;
mod record;
mod sequence;

pub use alias::AliasFormatter;
pub use base::BaseFormatter;
pub use enums::EnumFormatter;
pub use record::RecordFormatter;
pub use sequence::SequenceFormatter;

use wirebuf_schema::{FieldDef, FieldKind, FieldRole, SchemaRegistry, TypeDef};

use crate::descriptor::{Annotation, Argument, MethodBody, MethodDescriptor, ValueKind};
use crate::dispatch::DispatchTable;
use crate::error::GenError;
use crate::ops::{Template, WireOp};

/// Formatter for one schema type, selected by the type's kind.
#[derive(Debug, Clone)]
pub enum TypeFormatter<'a> {
    Record(RecordFormatter<'a>),
    Base(BaseFormatter<'a>),
    Enum(EnumFormatter<'a>),
    Sequence(SequenceFormatter<'a>),
    Alias(AliasFormatter<'a>),
}

impl<'a> TypeFormatter<'a> {
    /// Routes `name` to the formatter for its kind.
    pub fn for_type(reg: &'a SchemaRegistry, name: &str) -> Result<Self, GenError> {
        let def = reg
            .get(name)
            .ok_or_else(|| GenError::UnknownType(name.to_string()))?;
        Ok(match def {
            TypeDef::Struct(d) => match d.tag_kind {
                Some(tag_kind) => Self::Base(BaseFormatter::new(reg, d, tag_kind)?),
                None => Self::Record(RecordFormatter::new(reg, d)?),
            },
            TypeDef::Enum(d) => Self::Enum(EnumFormatter::new(d)),
            TypeDef::Sequence(d) => Self::Sequence(SequenceFormatter::new(d)),
            TypeDef::Alias(d) => Self::Alias(AliasFormatter::new(d)),
        })
    }

    /// Name used in generated declarations.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Record(f) => f.type_name(),
            Self::Base(f) => f.type_name(),
            Self::Enum(f) => f.type_name(),
            Self::Sequence(f) => f.type_name(),
            Self::Alias(f) => f.type_name(),
        }
    }

    /// True only for abstract hierarchy heads.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Base(_))
    }

    /// Parent type name when this type extends an abstract base.
    pub fn base_class_name(&self) -> Option<&str> {
        match self {
            Self::Record(f) => f.base_class_name(),
            _ => None,
        }
    }

    /// Constructor accepting every data field in declaration order.
    pub fn ctor_descriptor(&self) -> MethodDescriptor {
        match self {
            Self::Record(f) => f.ctor_descriptor(),
            Self::Base(f) => f.ctor_descriptor(),
            Self::Enum(f) => f.ctor_descriptor(),
            Self::Sequence(f) => f.ctor_descriptor(),
            Self::Alias(f) => f.ctor_descriptor(),
        }
    }

    /// Structural equality, when the type supports it.
    pub fn comparer_descriptor(&self) -> Option<MethodDescriptor> {
        match self {
            Self::Record(f) => f.comparer_descriptor(),
            Self::Base(_) => None,
            Self::Enum(f) => f.comparer_descriptor(),
            Self::Sequence(f) => f.comparer_descriptor(),
            Self::Alias(f) => f.comparer_descriptor(),
        }
    }

    /// Relative ordering, when the type is declared sortable.
    pub fn sort_descriptor(&self) -> Option<MethodDescriptor> {
        match self {
            Self::Record(f) => f.sort_descriptor(),
            Self::Base(_) => None,
            Self::Enum(f) => f.sort_descriptor(),
            Self::Sequence(f) => f.sort_descriptor(),
            Self::Alias(f) => f.sort_descriptor(),
        }
    }

    /// Reads an instance back from wire bytes.
    pub fn deserialize_descriptor(&self) -> MethodDescriptor {
        match self {
            Self::Record(f) => f.deserialize_descriptor(),
            Self::Base(f) => f.deserialize_descriptor(),
            Self::Enum(f) => f.deserialize_descriptor(),
            Self::Sequence(f) => f.deserialize_descriptor(),
            Self::Alias(f) => f.deserialize_descriptor(),
        }
    }

    /// Writes an instance to wire bytes; mirror of deserialize.
    pub fn serialize_descriptor(&self) -> MethodDescriptor {
        match self {
            Self::Record(f) => f.serialize_descriptor(),
            Self::Base(f) => f.serialize_descriptor(),
            Self::Enum(f) => f.serialize_descriptor(),
            Self::Sequence(f) => f.serialize_descriptor(),
            Self::Alias(f) => f.serialize_descriptor(),
        }
    }

    /// Restricted helper writing only this type's own field span. Present on
    /// hierarchy heads, absent everywhere else.
    pub fn serialize_protected_descriptor(&self) -> Option<MethodDescriptor> {
        match self {
            Self::Base(f) => Some(f.serialize_protected_descriptor()),
            _ => None,
        }
    }

    /// Exact serialized byte length without serializing.
    pub fn size_descriptor(&self) -> MethodDescriptor {
        match self {
            Self::Record(f) => f.size_descriptor(),
            Self::Base(f) => f.size_descriptor(),
            Self::Enum(f) => f.size_descriptor(),
            Self::Sequence(f) => f.size_descriptor(),
            Self::Alias(f) => f.size_descriptor(),
        }
    }

    /// One accessor per exposed field, in field order.
    pub fn getter_descriptors(&self) -> Vec<MethodDescriptor> {
        match self {
            Self::Record(f) => f.getter_descriptors(),
            Self::Base(f) => f.getter_descriptors(),
            Self::Enum(_) => Vec::new(),
            Self::Sequence(f) => f.getter_descriptors(),
            Self::Alias(f) => f.getter_descriptors(),
        }
    }

    /// One mutator per mutable field, in field order.
    pub fn setter_descriptors(&self) -> Vec<MethodDescriptor> {
        match self {
            Self::Record(f) => f.setter_descriptors(),
            Self::Base(f) => f.setter_descriptors(),
            Self::Enum(_) | Self::Sequence(_) => Vec::new(),
            Self::Alias(f) => f.setter_descriptors(),
        }
    }

    /// Human-readable rendering, when the type is printable.
    pub fn str_descriptor(&self) -> Option<MethodDescriptor> {
        match self {
            Self::Record(f) => f.str_descriptor(),
            Self::Base(f) => f.str_descriptor(),
            Self::Enum(f) => f.str_descriptor(),
            Self::Sequence(f) => f.str_descriptor(),
            Self::Alias(f) => f.str_descriptor(),
        }
    }

    /// The ordered field list backing ctor, wire and accessor order.
    pub fn fields(&self) -> Vec<FieldDef> {
        match self {
            Self::Record(f) => f.fields(),
            Self::Base(f) => f.fields(),
            Self::Enum(_) => Vec::new(),
            Self::Sequence(f) => f.fields(),
            Self::Alias(f) => f.fields(),
        }
    }

    /// The hierarchy dispatch table, for abstract heads.
    pub fn dispatch_table(&self) -> Option<&DispatchTable> {
        match self {
            Self::Base(f) => Some(f.dispatch_table()),
            _ => None,
        }
    }
}

// ── Shared descriptor construction ──────────────────────────────────────────
//
// Canonical slot names live here, once. Emitters may rename; the descriptor
// name identifies the slot.

pub(crate) fn ctor(arguments: Vec<Argument>, visibility: Annotation) -> MethodDescriptor {
    let assign = arguments.iter().map(|a| a.name.clone()).collect();
    MethodDescriptor {
        name: "new".to_string(),
        arguments,
        body: MethodBody::Template(Template::AssignFields(assign)),
        returns: ValueKind::Unit,
        annotations: vec![visibility],
    }
}

pub(crate) fn eq_method(type_name: &str, body: Template) -> MethodDescriptor {
    MethodDescriptor::named("eq")
        .arg("other", ValueKind::Ty(FieldKind::Named(type_name.to_string())))
        .template(body)
        .returns(ValueKind::Bool)
        .annotate(Annotation::Public)
}

pub(crate) fn cmp_method(type_name: &str, body: Template) -> MethodDescriptor {
    MethodDescriptor::named("cmp")
        .arg("other", ValueKind::Ty(FieldKind::Named(type_name.to_string())))
        .template(body)
        .returns(ValueKind::Ordering)
        .annotate(Annotation::Public)
}

pub(crate) fn serialize_method(plan: Vec<WireOp>) -> MethodDescriptor {
    MethodDescriptor::named("serialize")
        .template(Template::Wire(plan))
        .returns(ValueKind::ByteSpan)
        .annotate(Annotation::Public)
}

pub(crate) fn serialize_fields_method(plan: Vec<WireOp>) -> MethodDescriptor {
    MethodDescriptor::named("serialize_fields")
        .template(Template::Wire(plan))
        .returns(ValueKind::ByteSpan)
        .annotate(Annotation::Protected)
}

pub(crate) fn deserialize_method(type_name: &str, plan: Vec<WireOp>) -> MethodDescriptor {
    MethodDescriptor::named("deserialize")
        .arg("payload", ValueKind::ByteSpan)
        .template(Template::Wire(plan))
        .returns(ValueKind::Ty(FieldKind::Named(type_name.to_string())))
        .annotate(Annotation::Public)
        .annotate(Annotation::Static)
}

pub(crate) fn size_method(plan: Vec<WireOp>) -> MethodDescriptor {
    MethodDescriptor::named("size")
        .template(Template::Wire(plan))
        .returns(ValueKind::Size)
        .annotate(Annotation::Public)
        .annotate(Annotation::Property)
}

pub(crate) fn str_method(names: Vec<String>) -> MethodDescriptor {
    MethodDescriptor::named("to_string")
        .template(Template::Render(names))
        .returns(ValueKind::Text)
        .annotate(Annotation::Public)
}

pub(crate) fn getters_for(fields: &[FieldDef]) -> Vec<MethodDescriptor> {
    fields
        .iter()
        .filter(|f| f.is_data())
        .map(|f| {
            MethodDescriptor::named(&f.name)
                .template(Template::ReadField(f.name.clone()))
                .returns(ValueKind::Ty(f.kind.clone()))
                .annotate(Annotation::Public)
                .annotate(Annotation::Property)
        })
        .collect()
}

pub(crate) fn setters_for(fields: &[FieldDef]) -> Vec<MethodDescriptor> {
    fields
        .iter()
        .filter(|f| f.is_data())
        .map(|f| {
            MethodDescriptor::named(format!("set_{}", f.name))
                .arg("value", ValueKind::Ty(f.kind.clone()))
                .template(Template::WriteField(f.name.clone()))
                .annotate(Annotation::Public)
        })
        .collect()
}

/// Lowers a field list to its wire ops: data fields encode per kind,
/// constant fields become fixed scalar writes.
pub(crate) fn field_ops(type_name: &str, fields: &[FieldDef]) -> Result<Vec<WireOp>, GenError> {
    let mut ops = Vec::with_capacity(fields.len());
    for field in fields {
        match &field.role {
            FieldRole::Data => ops.push(WireOp::Field {
                name: field.name.clone(),
                kind: field.kind.clone(),
            }),
            FieldRole::Const { value } => {
                let FieldKind::Scalar(kind) = &field.kind else {
                    return Err(GenError::ConstNotScalar {
                        type_name: type_name.to_string(),
                        field: field.name.clone(),
                    });
                };
                ops.push(WireOp::Const {
                    field: field.name.clone(),
                    kind: *kind,
                    value: *value,
                });
            }
        }
    }
    Ok(ops)
}

pub(crate) fn field_args<'f>(fields: impl Iterator<Item = &'f FieldDef>) -> Vec<Argument> {
    fields
        .map(|f| Argument::new(&f.name, ValueKind::Ty(f.kind.clone())))
        .collect()
}
