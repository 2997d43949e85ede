//! Per-type assembly of the full descriptor set.

use wirebuf_schema::{FieldDef, SchemaRegistry};

use crate::descriptor::{MethodBody, MethodDescriptor};
use crate::error::GenError;
use crate::formatter::TypeFormatter;
use crate::ops::{Template, WireOp};

/// Everything an emitter needs to generate one type: a fixed-shape record
/// with one slot per contract entry. Optional capabilities the type does not
/// support are `None`; required slots are always filled or [`bundle`] fails.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeBundle {
    pub type_name: String,
    pub is_abstract: bool,
    pub base_class: Option<String>,
    pub ctor: MethodDescriptor,
    pub comparer: Option<MethodDescriptor>,
    pub sort: Option<MethodDescriptor>,
    pub deserialize: MethodDescriptor,
    pub serialize: MethodDescriptor,
    pub serialize_protected: Option<MethodDescriptor>,
    pub size: MethodDescriptor,
    pub getters: Vec<MethodDescriptor>,
    pub setters: Vec<MethodDescriptor>,
    pub str_: Option<MethodDescriptor>,
    pub fields: Vec<FieldDef>,
}

/// Assembles the descriptor bundle for one type.
///
/// Fails when a required slot is unfilled, when a hierarchy is malformed, or
/// when the formatter's constructor, wire and accessor orders disagree. On
/// any failure no bundle is produced at all.
pub fn bundle(reg: &SchemaRegistry, name: &str) -> Result<TypeBundle, GenError> {
    let formatter = TypeFormatter::for_type(reg, name)?;
    let type_name = formatter.type_name().to_string();
    let ctor = required(&type_name, "ctor", formatter.ctor_descriptor())?;
    let deserialize = required(&type_name, "deserialize", formatter.deserialize_descriptor())?;
    let serialize = required(&type_name, "serialize", formatter.serialize_descriptor())?;
    let size = required(&type_name, "size", formatter.size_descriptor())?;
    let bundle = TypeBundle {
        is_abstract: formatter.is_abstract(),
        base_class: formatter.base_class_name().map(str::to_string),
        ctor,
        comparer: formatter.comparer_descriptor(),
        sort: formatter.sort_descriptor(),
        deserialize,
        serialize,
        serialize_protected: formatter.serialize_protected_descriptor(),
        size,
        getters: formatter.getter_descriptors(),
        setters: formatter.setter_descriptors(),
        str_: formatter.str_descriptor(),
        fields: formatter.fields(),
        type_name,
    };
    check_field_order(&bundle)?;
    Ok(bundle)
}

/// Bundles every type in the registry, in declaration order. The first
/// failure aborts the run; no partial output is returned.
pub fn bundle_all(reg: &SchemaRegistry) -> Result<Vec<TypeBundle>, GenError> {
    reg.iter().map(|(name, _)| bundle(reg, name)).collect()
}

fn required(
    type_name: &str,
    slot: &'static str,
    desc: MethodDescriptor,
) -> Result<MethodDescriptor, GenError> {
    if desc.name.is_empty() {
        return Err(GenError::MissingDescriptor {
            type_name: type_name.to_string(),
            descriptor: slot,
        });
    }
    Ok(desc)
}

/// Asserts the single-source-of-truth property: the field list, the ctor
/// parameter tail, the wire plan and the accessors must all walk the type's
/// own data fields in the same order.
fn check_field_order(bundle: &TypeBundle) -> Result<(), GenError> {
    let expected: Vec<&str> = bundle
        .fields
        .iter()
        .filter(|f| f.is_data())
        .map(|f| f.name.as_str())
        .collect();

    // Constructor arguments end with the own data fields; anything before
    // them is the inherited span.
    let ctor_names: Vec<&str> = bundle
        .ctor
        .arguments
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    if ctor_names.len() < expected.len()
        || ctor_names[ctor_names.len() - expected.len()..] != expected[..]
    {
        return Err(GenError::FieldOrderMismatch {
            type_name: bundle.type_name.clone(),
            left: "ctor",
            right: "fields",
        });
    }

    // Wire order comes from the own-span plan: the restricted serializer on
    // hierarchy heads, the serialize plan everywhere else.
    let wire = bundle
        .serialize_protected
        .as_ref()
        .unwrap_or(&bundle.serialize);
    let wire_names: Vec<&str> = match &wire.body {
        MethodBody::Template(Template::Wire(ops)) => ops
            .iter()
            .filter_map(|op| match op {
                WireOp::Field { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    if wire_names != expected {
        return Err(GenError::FieldOrderMismatch {
            type_name: bundle.type_name.clone(),
            left: "serialize",
            right: "fields",
        });
    }

    let getter_names: Vec<&str> = bundle.getters.iter().map(|g| g.name.as_str()).collect();
    if getter_names != expected {
        return Err(GenError::FieldOrderMismatch {
            type_name: bundle.type_name.clone(),
            left: "getters",
            right: "fields",
        });
    }
    Ok(())
}
