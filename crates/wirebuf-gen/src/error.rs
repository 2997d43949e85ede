use thiserror::Error;
use wirebuf_schema::ScalarKind;

/// Generation-time errors.
///
/// Every variant carries the names a maintainer needs to locate the problem
/// in the schema; no error leaves the offending type anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    /// A definition references a type the registry does not contain.
    #[error("unknown type `{0}`")]
    UnknownType(String),

    /// A required descriptor slot came back empty.
    #[error("type `{type_name}` is missing required descriptor `{descriptor}`")]
    MissingDescriptor {
        type_name: String,
        descriptor: &'static str,
    },

    /// Two subtypes of the same base claim the same wire tag.
    #[error("discriminant {tag} under `{base}` maps to both `{first}` and `{second}`")]
    DiscriminantCollision {
        base: String,
        tag: u64,
        first: String,
        second: String,
    },

    /// A record extends something that is not an abstract record.
    #[error("`{subtype}` extends `{base}`, which is not an abstract record")]
    InvalidBase { subtype: String, base: String },

    /// An abstract record declares a parent of its own.
    #[error("abstract record `{name}` cannot extend `{base}`: nested hierarchies are not supported")]
    NestedHierarchy { name: String, base: String },

    /// A subtype's tag does not fit the base's declared tag width.
    #[error("tag {tag} of `{subtype}` does not fit the {tag_kind} discriminant of `{base}`")]
    TagOutOfRange {
        base: String,
        subtype: String,
        tag: u64,
        tag_kind: ScalarKind,
    },

    /// A constant field must occupy a scalar slot on the wire.
    #[error("constant field `{field}` of `{type_name}` must have a scalar kind")]
    ConstNotScalar { type_name: String, field: String },

    /// Constructor, wire and accessor orders disagree. Formatters derive all
    /// three from one field sequence, so this indicates a formatter bug.
    #[error("type `{type_name}` field order diverges between {left} and {right}")]
    FieldOrderMismatch {
        type_name: String,
        left: &'static str,
        right: &'static str,
    },
}
