//! Reference interpreter for descriptor bodies.
//!
//! Executes wire plans and comparison templates directly against in-memory
//! values, using the same [`Reader`] and [`Writer`] primitives a generated
//! runtime would. An emitter lowers descriptor bodies to source text; this
//! module runs them as-is, so a byte layout or ordering rule can be checked
//! without generating any code. It favors clarity over speed and rebuilds
//! formatters as it recurses.

use std::cmp::Ordering;

use thiserror::Error;
use wirebuf_buffers::{BufferError, Reader, Writer};
use wirebuf_schema::{FieldKind, ScalarKind, SchemaRegistry, TypeDef};

use crate::descriptor::{MethodBody, MethodDescriptor};
use crate::error::GenError;
use crate::formatter::TypeFormatter;
use crate::ops::{Template, WireOp};

/// An in-memory value a plan can serialize, compare or render.
///
/// Instances of named types are record-shaped except for enums: a struct's
/// fields, a sequence's lone `elements` list and an alias's lone `value` all
/// sit in a [`RecordValue`]. Subtype instances store inherited data fields
/// flattened ahead of their own, in wire order. Schema constants never
/// appear; the plan supplies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Any fixed-width integer, wide enough for every supported kind.
    Int(i128),
    /// A fixed-length byte field.
    Bytes(Vec<u8>),
    /// A vector field's elements.
    List(Vec<Value>),
    /// An instance of a struct, sequence or alias type.
    Record(RecordValue),
    /// An instance of an enum type.
    Enum(EnumValue),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordValue {
    pub type_name: String,
    /// Data fields in wire order, inherited span first.
    pub fields: Vec<(String, Value)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub type_name: String,
    pub value: u64,
}

impl Value {
    /// Record-shaped instance with the given data fields.
    pub fn record(type_name: &str, fields: Vec<(&str, Value)>) -> Self {
        Self::Record(RecordValue {
            type_name: type_name.to_string(),
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        })
    }

    /// Enum instance with the given discriminant.
    pub fn variant(type_name: &str, value: u64) -> Self {
        Self::Enum(EnumValue {
            type_name: type_name.to_string(),
            value,
        })
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "scalar",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "list",
            Self::Record(_) => "record",
            Self::Enum(_) => "enum",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpError {
    #[error(transparent)]
    Gen(#[from] GenError),
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error("`{type_name}` tag mismatch: expected {expected}, found {found}")]
    TagMismatch {
        type_name: String,
        expected: u64,
        found: u64,
    },
    #[error("`{type_name}.{field}` constant mismatch: expected {expected}, found {found}")]
    ConstMismatch {
        type_name: String,
        field: String,
        expected: u64,
        found: u64,
    },
    #[error("no subtype of `{base}` carries tag {tag}")]
    UnknownTag { base: String, tag: u64 },
    #[error("`{type_name}` is not a registered subtype of `{base}`")]
    NotASubtype { base: String, type_name: String },
    #[error("`{type_name}` has no variant with value {value}")]
    UnknownVariant { type_name: String, value: u64 },
    #[error("`{type_name}` value is missing field `{field}`")]
    MissingField { type_name: String, field: String },
    #[error("expected a {expected} value, found {found}")]
    UnexpectedValue {
        expected: &'static str,
        found: &'static str,
    },
    #[error("value {value} does not fit in {kind}")]
    ScalarRange { kind: ScalarKind, value: i128 },
    #[error("byte field expects {expected} bytes, found {found}")]
    ByteLength { expected: usize, found: usize },
    #[error("{count} elements do not fit in a {kind} count prefix")]
    CountRange { kind: ScalarKind, count: usize },
    #[error("`{type_name}` does not support `{operation}`")]
    Unsupported {
        type_name: String,
        operation: &'static str,
    },
}

// ── Entry points ──

/// Encodes `value` as one `type_name` image.
pub fn serialize(
    reg: &SchemaRegistry,
    type_name: &str,
    value: &Value,
) -> Result<Vec<u8>, InterpError> {
    let formatter = TypeFormatter::for_type(reg, type_name)?;
    let mut writer = Writer::with_alloc_size(256);
    write_image(reg, &formatter, value, &mut writer)?;
    Ok(writer.flush())
}

/// Decodes one `type_name` image from the front of `bytes`. Trailing bytes
/// are left untouched, matching stream semantics.
pub fn deserialize(
    reg: &SchemaRegistry,
    type_name: &str,
    bytes: &[u8],
) -> Result<Value, InterpError> {
    let formatter = TypeFormatter::for_type(reg, type_name)?;
    let mut reader = Reader::new(bytes);
    read_image(reg, &formatter, &mut reader)
}

/// Exact encoded size of `value`, computed without serializing it.
pub fn size_of(reg: &SchemaRegistry, type_name: &str, value: &Value) -> Result<usize, InterpError> {
    let formatter = TypeFormatter::for_type(reg, type_name)?;
    image_size(reg, &formatter, value)
}

/// Structural equality per the type's comparer descriptor.
pub fn eq(
    reg: &SchemaRegistry,
    type_name: &str,
    a: &Value,
    b: &Value,
) -> Result<bool, InterpError> {
    let formatter = TypeFormatter::for_type(reg, type_name)?;
    let Some(desc) = formatter.comparer_descriptor() else {
        return Err(unsupported(type_name, "eq"));
    };
    match &desc.body {
        MethodBody::Template(Template::CompareFields(names)) => {
            for name in names {
                if field_of(a, name)? != field_of(b, name)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        MethodBody::Template(Template::CompareDiscriminant) => {
            Ok(expect_enum(a)?.value == expect_enum(b)?.value)
        }
        _ => Err(unsupported(type_name, "eq")),
    }
}

/// Relative ordering per the type's sort descriptor.
pub fn cmp(
    reg: &SchemaRegistry,
    type_name: &str,
    a: &Value,
    b: &Value,
) -> Result<Ordering, InterpError> {
    let formatter = TypeFormatter::for_type(reg, type_name)?;
    let Some(desc) = formatter.sort_descriptor() else {
        return Err(unsupported(type_name, "cmp"));
    };
    match &desc.body {
        MethodBody::Template(Template::OrderBy(names)) => {
            for name in names {
                let ord = cmp_values(field_of(a, name)?, field_of(b, name)?)?;
                if ord != Ordering::Equal {
                    return Ok(ord);
                }
            }
            Ok(Ordering::Equal)
        }
        MethodBody::Template(Template::CompareDiscriminant) => {
            Ok(expect_enum(a)?.value.cmp(&expect_enum(b)?.value))
        }
        _ => Err(unsupported(type_name, "cmp")),
    }
}

/// Human-readable rendering per the type's str descriptor.
pub fn render(reg: &SchemaRegistry, type_name: &str, value: &Value) -> Result<String, InterpError> {
    let formatter = TypeFormatter::for_type(reg, type_name)?;
    let Some(desc) = formatter.str_descriptor() else {
        return Err(unsupported(type_name, "str"));
    };
    let MethodBody::Template(Template::Render(names)) = &desc.body else {
        return Err(unsupported(type_name, "str"));
    };
    if let Value::Enum(e) = value {
        return variant_label(reg, e);
    }
    let mut out = String::new();
    out.push_str(formatter.type_name());
    out.push('(');
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(name);
        out.push_str(": ");
        render_value(reg, field_of(value, name)?, &mut out)?;
    }
    out.push(')');
    Ok(out)
}

// ── Plan execution, write side ──

fn write_image(
    reg: &SchemaRegistry,
    formatter: &TypeFormatter,
    value: &Value,
    writer: &mut Writer,
) -> Result<(), InterpError> {
    let desc = formatter.serialize_descriptor();
    write_ops(reg, formatter.type_name(), &wire_plan(&desc), value, writer)
}

fn write_ops(
    reg: &SchemaRegistry,
    type_name: &str,
    ops: &[WireOp],
    value: &Value,
    writer: &mut Writer,
) -> Result<(), InterpError> {
    for op in ops {
        match op {
            WireOp::Field { name, kind } => {
                write_kind(reg, kind, field_of(value, name)?, writer)?;
            }
            WireOp::Const { kind, value: c, .. } => {
                write_scalar(*kind, *c as i128, writer)?;
            }
            WireOp::Tag { kind, value: tag } => {
                write_scalar(*kind, *tag as i128, writer)?;
            }
            WireOp::Inherited { base } => {
                let ops = protected_plan(reg, type_name, base)?;
                write_ops(reg, base, &ops, value, writer)?;
            }
            WireOp::Dispatch { arms, .. } => {
                let concrete = concrete_name(value)?;
                let Some(arm) = arms.iter().find(|a| a.type_name == concrete) else {
                    return Err(InterpError::NotASubtype {
                        base: type_name.to_string(),
                        type_name: concrete.to_string(),
                    });
                };
                // The arm's tag is not written here: the concrete plan
                // opens with its own Tag op.
                let formatter = TypeFormatter::for_type(reg, &arm.type_name)?;
                write_image(reg, &formatter, value, writer)?;
            }
            WireOp::Discriminant { kind } => {
                let e = expect_enum(value)?;
                check_variant(reg, type_name, e.value)?;
                write_scalar(*kind, e.value as i128, writer)?;
            }
        }
    }
    Ok(())
}

fn write_kind(
    reg: &SchemaRegistry,
    kind: &FieldKind,
    value: &Value,
    writer: &mut Writer,
) -> Result<(), InterpError> {
    match kind {
        FieldKind::Scalar(k) => write_scalar(*k, expect_int(value)?, writer),
        FieldKind::Bytes(len) => {
            let bytes = expect_bytes(value)?;
            if bytes.len() != *len {
                return Err(InterpError::ByteLength {
                    expected: *len,
                    found: bytes.len(),
                });
            }
            writer.buf(bytes);
            Ok(())
        }
        FieldKind::Named(name) => {
            let formatter = TypeFormatter::for_type(reg, name)?;
            write_image(reg, &formatter, value, writer)
        }
        FieldKind::Vector { count, element } => {
            let elems = expect_list(value)?;
            if !count.fits(elems.len() as i128) {
                return Err(InterpError::CountRange {
                    kind: *count,
                    count: elems.len(),
                });
            }
            write_scalar(*count, elems.len() as i128, writer)?;
            for elem in elems {
                write_kind(reg, element, elem, writer)?;
            }
            Ok(())
        }
    }
}

fn write_scalar(kind: ScalarKind, value: i128, writer: &mut Writer) -> Result<(), InterpError> {
    if !kind.fits(value) {
        return Err(InterpError::ScalarRange { kind, value });
    }
    match kind {
        ScalarKind::U8 => writer.u8(value as u8),
        ScalarKind::U16 => writer.u16(value as u16),
        ScalarKind::U32 => writer.u32(value as u32),
        ScalarKind::U64 => writer.u64(value as u64),
        ScalarKind::I8 => writer.i8(value as i8),
        ScalarKind::I16 => writer.i16(value as i16),
        ScalarKind::I32 => writer.i32(value as i32),
        ScalarKind::I64 => writer.i64(value as i64),
    }
    Ok(())
}

// ── Plan execution, read side ──

fn read_image(
    reg: &SchemaRegistry,
    formatter: &TypeFormatter,
    reader: &mut Reader<'_>,
) -> Result<Value, InterpError> {
    let desc = formatter.deserialize_descriptor();
    read_plan(reg, formatter.type_name(), &wire_plan(&desc), reader)
}

fn read_plan(
    reg: &SchemaRegistry,
    type_name: &str,
    ops: &[WireOp],
    reader: &mut Reader<'_>,
) -> Result<Value, InterpError> {
    // Dispatch and discriminant plans stand alone and produce the whole
    // value; everything else is a record-shaped field walk.
    if let [WireOp::Dispatch { tag_kind, arms }] = ops {
        // Peek the tag on a forked cursor; the concrete plan consumes and
        // verifies it from the real one.
        let tag = read_scalar(*tag_kind, &mut reader.clone())? as u64;
        let Some(arm) = arms.iter().find(|a| a.tag == tag) else {
            return Err(InterpError::UnknownTag {
                base: type_name.to_string(),
                tag,
            });
        };
        let formatter = TypeFormatter::for_type(reg, &arm.type_name)?;
        return read_image(reg, &formatter, reader);
    }
    if let [WireOp::Discriminant { kind }] = ops {
        let value = read_scalar(*kind, reader)? as u64;
        check_variant(reg, type_name, value)?;
        return Ok(Value::Enum(EnumValue {
            type_name: type_name.to_string(),
            value,
        }));
    }
    let mut fields: Vec<(String, Value)> = Vec::new();
    for op in ops {
        match op {
            WireOp::Field { name, kind } => {
                fields.push((name.clone(), read_kind(reg, kind, reader)?));
            }
            WireOp::Const { field, kind, value } => {
                let found = read_scalar(*kind, reader)? as u64;
                if found != *value {
                    return Err(InterpError::ConstMismatch {
                        type_name: type_name.to_string(),
                        field: field.clone(),
                        expected: *value,
                        found,
                    });
                }
            }
            WireOp::Tag { kind, value } => {
                let found = read_scalar(*kind, reader)? as u64;
                if found != *value {
                    return Err(InterpError::TagMismatch {
                        type_name: type_name.to_string(),
                        expected: *value,
                        found,
                    });
                }
            }
            WireOp::Inherited { base } => {
                let ops = protected_plan(reg, type_name, base)?;
                let Value::Record(span) = read_plan(reg, base, &ops, reader)? else {
                    unreachable!()
                };
                fields.extend(span.fields);
            }
            WireOp::Dispatch { .. } | WireOp::Discriminant { .. } => unreachable!(),
        }
    }
    Ok(Value::Record(RecordValue {
        type_name: type_name.to_string(),
        fields,
    }))
}

fn read_kind(
    reg: &SchemaRegistry,
    kind: &FieldKind,
    reader: &mut Reader<'_>,
) -> Result<Value, InterpError> {
    match kind {
        FieldKind::Scalar(k) => Ok(Value::Int(read_scalar(*k, reader)?)),
        FieldKind::Bytes(len) => Ok(Value::Bytes(reader.try_buf(*len)?.to_vec())),
        FieldKind::Named(name) => {
            let formatter = TypeFormatter::for_type(reg, name)?;
            read_image(reg, &formatter, reader)
        }
        FieldKind::Vector { count, element } => {
            let n = read_scalar(*count, reader)? as usize;
            // A hostile count prefix must not drive allocation beyond what
            // the buffer could possibly hold.
            let mut elems = Vec::with_capacity(n.min(reader.remaining()));
            for _ in 0..n {
                elems.push(read_kind(reg, element, reader)?);
            }
            Ok(Value::List(elems))
        }
    }
}

fn read_scalar(kind: ScalarKind, reader: &mut Reader<'_>) -> Result<i128, BufferError> {
    Ok(match kind {
        ScalarKind::U8 => i128::from(reader.try_u8()?),
        ScalarKind::U16 => i128::from(reader.try_u16()?),
        ScalarKind::U32 => i128::from(reader.try_u32()?),
        ScalarKind::U64 => i128::from(reader.try_u64()?),
        ScalarKind::I8 => i128::from(reader.try_i8()?),
        ScalarKind::I16 => i128::from(reader.try_i16()?),
        ScalarKind::I32 => i128::from(reader.try_i32()?),
        ScalarKind::I64 => i128::from(reader.try_i64()?),
    })
}

// ── Plan execution, size side ──

fn image_size(
    reg: &SchemaRegistry,
    formatter: &TypeFormatter,
    value: &Value,
) -> Result<usize, InterpError> {
    let desc = formatter.size_descriptor();
    size_ops(reg, formatter.type_name(), &wire_plan(&desc), value)
}

fn size_ops(
    reg: &SchemaRegistry,
    type_name: &str,
    ops: &[WireOp],
    value: &Value,
) -> Result<usize, InterpError> {
    let mut total = 0;
    for op in ops {
        total += match op {
            WireOp::Field { name, kind } => size_kind(reg, kind, field_of(value, name)?)?,
            WireOp::Const { kind, .. } => kind.byte_len(),
            WireOp::Tag { kind, .. } => kind.byte_len(),
            WireOp::Inherited { base } => {
                let ops = protected_plan(reg, type_name, base)?;
                size_ops(reg, base, &ops, value)?
            }
            WireOp::Dispatch { arms, .. } => {
                let concrete = concrete_name(value)?;
                let Some(arm) = arms.iter().find(|a| a.type_name == concrete) else {
                    return Err(InterpError::NotASubtype {
                        base: type_name.to_string(),
                        type_name: concrete.to_string(),
                    });
                };
                let formatter = TypeFormatter::for_type(reg, &arm.type_name)?;
                image_size(reg, &formatter, value)?
            }
            WireOp::Discriminant { kind } => kind.byte_len(),
        };
    }
    Ok(total)
}

fn size_kind(
    reg: &SchemaRegistry,
    kind: &FieldKind,
    value: &Value,
) -> Result<usize, InterpError> {
    match kind {
        FieldKind::Scalar(k) => Ok(k.byte_len()),
        FieldKind::Bytes(len) => Ok(*len),
        FieldKind::Named(name) => {
            let formatter = TypeFormatter::for_type(reg, name)?;
            image_size(reg, &formatter, value)
        }
        FieldKind::Vector { count, element } => {
            let mut total = count.byte_len();
            for elem in expect_list(value)? {
                total += size_kind(reg, element, elem)?;
            }
            Ok(total)
        }
    }
}

// ── Value plumbing ──

fn wire_plan(desc: &MethodDescriptor) -> Vec<WireOp> {
    match &desc.body {
        MethodBody::Template(Template::Wire(ops)) => ops.clone(),
        _ => Vec::new(),
    }
}

/// Resolves the parent's restricted-serializer plan for an `Inherited` op.
fn protected_plan(
    reg: &SchemaRegistry,
    subtype: &str,
    base: &str,
) -> Result<Vec<WireOp>, InterpError> {
    let formatter = TypeFormatter::for_type(reg, base)?;
    let Some(desc) = formatter.serialize_protected_descriptor() else {
        return Err(GenError::InvalidBase {
            subtype: subtype.to_string(),
            base: base.to_string(),
        }
        .into());
    };
    Ok(wire_plan(&desc))
}

fn field_of<'v>(value: &'v Value, name: &str) -> Result<&'v Value, InterpError> {
    let Value::Record(rec) = value else {
        return Err(InterpError::UnexpectedValue {
            expected: "record",
            found: value.kind_name(),
        });
    };
    rec.fields
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v)
        .ok_or_else(|| InterpError::MissingField {
            type_name: rec.type_name.clone(),
            field: name.to_string(),
        })
}

fn concrete_name(value: &Value) -> Result<&str, InterpError> {
    match value {
        Value::Record(rec) => Ok(&rec.type_name),
        Value::Enum(e) => Ok(&e.type_name),
        other => Err(InterpError::UnexpectedValue {
            expected: "record",
            found: other.kind_name(),
        }),
    }
}

fn expect_int(value: &Value) -> Result<i128, InterpError> {
    match value {
        Value::Int(v) => Ok(*v),
        other => Err(InterpError::UnexpectedValue {
            expected: "scalar",
            found: other.kind_name(),
        }),
    }
}

fn expect_bytes(value: &Value) -> Result<&[u8], InterpError> {
    match value {
        Value::Bytes(bytes) => Ok(bytes),
        other => Err(InterpError::UnexpectedValue {
            expected: "bytes",
            found: other.kind_name(),
        }),
    }
}

fn expect_list(value: &Value) -> Result<&[Value], InterpError> {
    match value {
        Value::List(elems) => Ok(elems),
        other => Err(InterpError::UnexpectedValue {
            expected: "list",
            found: other.kind_name(),
        }),
    }
}

fn expect_enum(value: &Value) -> Result<&EnumValue, InterpError> {
    match value {
        Value::Enum(e) => Ok(e),
        other => Err(InterpError::UnexpectedValue {
            expected: "enum",
            found: other.kind_name(),
        }),
    }
}

fn check_variant(reg: &SchemaRegistry, type_name: &str, value: u64) -> Result<(), InterpError> {
    let Some(TypeDef::Enum(def)) = reg.get(type_name) else {
        return Err(GenError::UnknownType(type_name.to_string()).into());
    };
    if def.variants.iter().any(|v| v.value == value) {
        Ok(())
    } else {
        Err(InterpError::UnknownVariant {
            type_name: type_name.to_string(),
            value,
        })
    }
}

fn cmp_values(a: &Value, b: &Value) -> Result<Ordering, InterpError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        (Value::Bytes(x), Value::Bytes(y)) => Ok(x.cmp(y)),
        (Value::List(x), Value::List(y)) => {
            for (ea, eb) in x.iter().zip(y) {
                let ord = cmp_values(ea, eb)?;
                if ord != Ordering::Equal {
                    return Ok(ord);
                }
            }
            Ok(x.len().cmp(&y.len()))
        }
        (Value::Record(x), Value::Record(y)) => {
            for ((_, va), (_, vb)) in x.fields.iter().zip(&y.fields) {
                let ord = cmp_values(va, vb)?;
                if ord != Ordering::Equal {
                    return Ok(ord);
                }
            }
            Ok(x.fields.len().cmp(&y.fields.len()))
        }
        (Value::Enum(x), Value::Enum(y)) => Ok(x.value.cmp(&y.value)),
        _ => Err(InterpError::UnexpectedValue {
            expected: a.kind_name(),
            found: b.kind_name(),
        }),
    }
}

fn render_value(
    reg: &SchemaRegistry,
    value: &Value,
    out: &mut String,
) -> Result<(), InterpError> {
    match value {
        Value::Int(v) => out.push_str(&v.to_string()),
        Value::Bytes(bytes) => {
            out.push_str("0x");
            for b in bytes {
                out.push_str(&format!("{b:02x}"));
            }
        }
        Value::List(elems) => {
            out.push('[');
            for (i, elem) in elems.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_value(reg, elem, out)?;
            }
            out.push(']');
        }
        Value::Record(rec) => {
            out.push_str(&rec.type_name);
            out.push('(');
            for (i, (name, v)) in rec.fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(name);
                out.push_str(": ");
                render_value(reg, v, out)?;
            }
            out.push(')');
        }
        Value::Enum(e) => out.push_str(&variant_label(reg, e)?),
    }
    Ok(())
}

fn variant_label(reg: &SchemaRegistry, e: &EnumValue) -> Result<String, InterpError> {
    let Some(TypeDef::Enum(def)) = reg.get(&e.type_name) else {
        return Err(GenError::UnknownType(e.type_name.clone()).into());
    };
    let Some(variant) = def.variants.iter().find(|v| v.value == e.value) else {
        return Err(InterpError::UnknownVariant {
            type_name: e.type_name.clone(),
            value: e.value,
        });
    };
    Ok(format!("{}::{}", e.type_name, variant.name))
}

fn unsupported(type_name: &str, operation: &'static str) -> InterpError {
    InterpError::Unsupported {
        type_name: type_name.to_string(),
        operation,
    }
}
