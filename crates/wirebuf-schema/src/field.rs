use serde::{Deserialize, Serialize};

use crate::scalar::ScalarKind;

/// Semantic kind of a field: what sits on the wire at the field's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum FieldKind {
    /// Fixed-width little-endian integer.
    Scalar(ScalarKind),
    /// Fixed-length raw byte span.
    Bytes(usize),
    /// Instance of another named schema type.
    Named(String),
    /// Count-prefixed sequence of homogeneous elements.
    Vector {
        count: ScalarKind,
        element: Box<FieldKind>,
    },
}

impl FieldKind {
    /// Short tag used in error messages and renderings.
    pub fn describe(&self) -> String {
        match self {
            Self::Scalar(k) => k.as_str().to_string(),
            Self::Bytes(len) => format!("bytes[{len}]"),
            Self::Named(name) => name.clone(),
            Self::Vector { count, element } => {
                format!("vector<{}; count {}>", element.describe(), count.as_str())
            }
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Whether a field holds caller data or a schema-fixed constant.
///
/// Constant fields (reserved slots, format markers) occupy wire space but are
/// never stored on the instance: serialization writes the fixed value and
/// deserialization reads it back and verifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum FieldRole {
    Data,
    Const { value: u64 },
}

/// One field of a record, sequence or alias definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default = "FieldRole::data")]
    pub role: FieldRole,
}

impl FieldRole {
    fn data() -> Self {
        Self::Data
    }
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            role: FieldRole::Data,
        }
    }

    pub fn constant(name: impl Into<String>, kind: FieldKind, value: u64) -> Self {
        Self {
            name: name.into(),
            kind,
            role: FieldRole::Const { value },
        }
    }

    /// True for fields that hold caller data (not schema constants).
    pub fn is_data(&self) -> bool {
        matches!(self.role, FieldRole::Data)
    }
}

/// Shorthand constructors for field kinds.
///
/// # Example
///
/// ```
/// use wirebuf_schema::{FieldKind, ScalarKind, K};
///
/// let kind = K.Vector(ScalarKind::U16, K.U32());
/// assert_eq!(kind.describe(), "vector<u32; count u16>");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KindBuilder;

#[allow(non_snake_case)]
impl KindBuilder {
    pub fn U8(&self) -> FieldKind {
        FieldKind::Scalar(ScalarKind::U8)
    }

    pub fn U16(&self) -> FieldKind {
        FieldKind::Scalar(ScalarKind::U16)
    }

    pub fn U32(&self) -> FieldKind {
        FieldKind::Scalar(ScalarKind::U32)
    }

    pub fn U64(&self) -> FieldKind {
        FieldKind::Scalar(ScalarKind::U64)
    }

    pub fn I8(&self) -> FieldKind {
        FieldKind::Scalar(ScalarKind::I8)
    }

    pub fn I16(&self) -> FieldKind {
        FieldKind::Scalar(ScalarKind::I16)
    }

    pub fn I32(&self) -> FieldKind {
        FieldKind::Scalar(ScalarKind::I32)
    }

    pub fn I64(&self) -> FieldKind {
        FieldKind::Scalar(ScalarKind::I64)
    }

    pub fn Bytes(&self, len: usize) -> FieldKind {
        FieldKind::Bytes(len)
    }

    pub fn Named(&self, name: impl Into<String>) -> FieldKind {
        FieldKind::Named(name.into())
    }

    pub fn Vector(&self, count: ScalarKind, element: FieldKind) -> FieldKind {
        FieldKind::Vector {
            count,
            element: Box::new(element),
        }
    }
}

/// Global default kind builder.
pub static K: KindBuilder = KindBuilder;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(K.U8().describe(), "u8");
        assert_eq!(K.Bytes(32).describe(), "bytes[32]");
        assert_eq!(K.Named("Hash").describe(), "Hash");
        assert_eq!(
            K.Vector(ScalarKind::U8, K.Named("Point")).describe(),
            "vector<Point; count u8>"
        );
    }

    #[test]
    fn test_field_roles() {
        let data = FieldDef::new("height", K.U64());
        assert!(data.is_data());
        let padding = FieldDef::constant("reserved", K.U32(), 0);
        assert!(!padding.is_data());
        assert_eq!(padding.role, FieldRole::Const { value: 0 });
    }

    #[test]
    fn test_serde_tagging() {
        let kind = K.Vector(ScalarKind::U16, K.U32());
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["kind"], "vector");
        assert_eq!(json["of"]["count"], "u16");
        let back: FieldKind = serde_json::from_value(json).unwrap();
        assert_eq!(back, kind);
    }

    #[test]
    fn test_field_role_default() {
        // A field without an explicit role deserializes as plain data.
        let json = r#"{ "name": "height", "kind": { "kind": "scalar", "of": "u64" } }"#;
        let field: FieldDef = serde_json::from_str(json).unwrap();
        assert!(field.is_data());
    }
}
