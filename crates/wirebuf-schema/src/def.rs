use serde::{Deserialize, Serialize};

use crate::field::{FieldDef, FieldKind};
use crate::scalar::ScalarKind;

/// Per-type generation policy flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypePolicy {
    /// Generate structural equality.
    pub comparable: bool,
    /// Generate relative ordering.
    pub sortable: bool,
    /// Generate a human-readable rendering.
    pub printable: bool,
}

impl Default for TypePolicy {
    fn default() -> Self {
        Self {
            comparable: true,
            sortable: false,
            printable: true,
        }
    }
}

/// Reference from a concrete record to the abstract base it extends, with the
/// wire tag value that identifies it among its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extends {
    pub base: String,
    pub tag: u64,
}

/// A record type: a concrete struct, or an abstract hierarchy head when
/// `tag_kind` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    /// Present on abstract hierarchy heads: the width of the wire tag that
    /// identifies each concrete subtype.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_kind: Option<ScalarKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Extends>,
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub policy: TypePolicy,
}

impl StructDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag_kind: None,
            extends: None,
            fields: Vec::new(),
            policy: TypePolicy::default(),
        }
    }

    /// Marks this record as an abstract hierarchy head whose subtypes are
    /// identified by a tag of the given width.
    pub fn tagged(mut self, tag_kind: ScalarKind) -> Self {
        self.tag_kind = Some(tag_kind);
        self
    }

    /// Declares this record a concrete subtype of `base`, identified on the
    /// wire by `tag`.
    pub fn extends(mut self, base: impl Into<String>, tag: u64) -> Self {
        self.extends = Some(Extends {
            base: base.into(),
            tag,
        });
        self
    }

    /// Appends a data field.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDef::new(name, kind));
        self
    }

    /// Appends a constant field (written on serialize, verified on read).
    pub fn const_field(mut self, name: impl Into<String>, kind: FieldKind, value: u64) -> Self {
        self.fields.push(FieldDef::constant(name, kind, value));
        self
    }

    pub fn sortable(mut self) -> Self {
        self.policy.sortable = true;
        self
    }

    pub fn not_comparable(mut self) -> Self {
        self.policy.comparable = false;
        self
    }

    pub fn not_printable(mut self) -> Self {
        self.policy.printable = false;
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.tag_kind.is_some()
    }

    /// Data fields in declaration order (constants excluded).
    pub fn data_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.is_data())
    }
}

/// One named value of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumVariant {
    pub name: String,
    pub value: u64,
}

/// An enumeration over a fixed-width unsigned representation. Discriminant
/// values are unsigned; ordering is numeric over the raw value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    pub repr: ScalarKind,
    pub variants: Vec<EnumVariant>,
    #[serde(default)]
    pub policy: TypePolicy,
}

impl EnumDef {
    pub fn new(name: impl Into<String>, repr: ScalarKind) -> Self {
        Self {
            name: name.into(),
            repr,
            variants: Vec::new(),
            policy: TypePolicy::default(),
        }
    }

    pub fn variant(mut self, name: impl Into<String>, value: u64) -> Self {
        self.variants.push(EnumVariant {
            name: name.into(),
            value,
        });
        self
    }

    pub fn sortable(mut self) -> Self {
        self.policy.sortable = true;
        self
    }
}

/// A named count-prefixed sequence of homogeneous elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceDef {
    pub name: String,
    pub element: FieldKind,
    pub count_kind: ScalarKind,
    #[serde(default)]
    pub policy: TypePolicy,
}

impl SequenceDef {
    pub fn new(name: impl Into<String>, count_kind: ScalarKind, element: FieldKind) -> Self {
        Self {
            name: name.into(),
            element,
            count_kind,
            policy: TypePolicy::default(),
        }
    }

    pub fn sortable(mut self) -> Self {
        self.policy.sortable = true;
        self
    }
}

/// A named wrapper over a scalar or fixed byte span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasDef {
    pub name: String,
    pub target: FieldKind,
    #[serde(default)]
    pub policy: TypePolicy,
}

impl AliasDef {
    pub fn new(name: impl Into<String>, target: FieldKind) -> Self {
        Self {
            name: name.into(),
            target,
            policy: TypePolicy::default(),
        }
    }

    pub fn sortable(mut self) -> Self {
        self.policy.sortable = true;
        self
    }
}

/// The unified type definition enum covering all schema type kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypeDef {
    Struct(StructDef),
    Enum(EnumDef),
    Sequence(SequenceDef),
    Alias(AliasDef),
}

impl TypeDef {
    /// Returns the "kind" string identifier for this definition.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Struct(d) if d.is_abstract() => "abstract",
            Self::Struct(_) => "struct",
            Self::Enum(_) => "enum",
            Self::Sequence(_) => "sequence",
            Self::Alias(_) => "alias",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Struct(d) => &d.name,
            Self::Enum(d) => &d.name,
            Self::Sequence(d) => &d.name,
            Self::Alias(d) => &d.name,
        }
    }

    pub fn policy(&self) -> TypePolicy {
        match self {
            Self::Struct(d) => d.policy,
            Self::Enum(d) => d.policy,
            Self::Sequence(d) => d.policy,
            Self::Alias(d) => d.policy,
        }
    }
}

impl From<StructDef> for TypeDef {
    fn from(def: StructDef) -> Self {
        Self::Struct(def)
    }
}

impl From<EnumDef> for TypeDef {
    fn from(def: EnumDef) -> Self {
        Self::Enum(def)
    }
}

impl From<SequenceDef> for TypeDef {
    fn from(def: SequenceDef) -> Self {
        Self::Sequence(def)
    }
}

impl From<AliasDef> for TypeDef {
    fn from(def: AliasDef) -> Self {
        Self::Alias(def)
    }
}
