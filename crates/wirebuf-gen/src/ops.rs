//! Structured method-body templates.
//!
//! Bodies are instruction sequences, not source text: an emitter lowers each
//! instruction to target syntax, and the reference interpreter executes the
//! same instructions directly. Serialize, deserialize and size descriptors of
//! one type all carry the *same* wire plan, which is what makes their byte
//! layouts agree by construction.

use wirebuf_schema::{FieldKind, ScalarKind};

/// One arm of a tag dispatch: a wire tag value and the concrete type it
/// selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchArm {
    pub tag: u64,
    pub type_name: String,
}

/// One step of a wire plan.
///
/// Each op is directional: serialization writes its bytes, deserialization
/// consumes and verifies them, size accounting adds its width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireOp {
    /// A stored field, encoded per its semantic kind.
    Field { name: String, kind: FieldKind },
    /// A schema constant: written on serialize, read back and verified on
    /// deserialize, never stored on the instance.
    Const {
        field: String,
        kind: ScalarKind,
        value: u64,
    },
    /// The wire tag identifying a concrete subtype. Written with the fixed
    /// value on serialize; on deserialize the value read must match.
    Tag { kind: ScalarKind, value: u64 },
    /// The parent's field span, delegated to the parent's restricted
    /// serializer (and its mirror on read).
    Inherited { base: String },
    /// Abstract-base plan: peek a tag of the given width, select the arm,
    /// and delegate the whole image to the concrete type, which consumes and
    /// verifies the tag itself. On serialize the arm is selected by the
    /// instance's concrete type instead.
    Dispatch {
        tag_kind: ScalarKind,
        arms: Vec<DispatchArm>,
    },
    /// An enum's underlying discriminant value.
    Discriminant { kind: ScalarKind },
}

/// Instruction payload of a method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// Walk the wire plan. Serialize, deserialize and size all interpret the
    /// same plan in their own direction.
    Wire(Vec<WireOp>),
    /// Constructor body: assign each parameter to its field slot, in order.
    AssignFields(Vec<String>),
    /// Structural equality over the named fields, in order.
    CompareFields(Vec<String>),
    /// Relative ordering over the named fields, in order.
    OrderBy(Vec<String>),
    /// Equality and ordering by the enum's numeric discriminant.
    CompareDiscriminant,
    /// Accessor body: read one field slot.
    ReadField(String),
    /// Accessor body: overwrite one field slot.
    WriteField(String),
    /// Human-readable rendering of the type name and the named fields.
    Render(Vec<String>),
}

impl Template {
    /// The wire plan carried by this template, if it is one.
    pub fn wire_ops(&self) -> Option<&[WireOp]> {
        match self {
            Self::Wire(ops) => Some(ops),
            _ => None,
        }
    }
}
