//! Language-independent description of one generated method.

use wirebuf_schema::FieldKind;

use crate::ops::Template;

/// Semantic kind of a method argument or return slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// No value. As a return kind it denotes a method without a result.
    Unit,
    Bool,
    /// A byte count.
    Size,
    /// A three-way comparison result.
    Ordering,
    /// A human-readable string.
    Text,
    /// An unsized span of wire bytes.
    ByteSpan,
    /// A value of a schema-level kind, including instances of named types.
    Ty(FieldKind),
}

/// One named, typed method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub ty: ValueKind,
}

impl Argument {
    pub fn new(name: impl Into<String>, ty: ValueKind) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Emitter hint attached to a generated method. Order is preserved and
/// duplicates are allowed; interpretation is up to the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    Public,
    Protected,
    /// The method belongs to the type, not an instance.
    Static,
    /// The method reads like an attribute access.
    Property,
    /// The method replaces one declared on the base type.
    Override,
}

/// Body of a generated method.
///
/// A deliberately empty body and an absent template are different things, so
/// the distinction is a sum type rather than a sentinel value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MethodBody {
    /// The method exists but does nothing (base-class hooks).
    #[default]
    NoOp,
    /// Instruction template the emitter lowers to target syntax.
    Template(Template),
}

/// Shape of one method to be generated, before any target syntax exists.
///
/// Descriptors are plain data: construction performs no validation, every
/// field defaults to absent/empty, and a formatter fills them incrementally
/// through the chainable constructors. A descriptor is built fresh on each
/// request and owned by the caller.
///
/// # Example
///
/// ```
/// use wirebuf_gen::{Annotation, MethodDescriptor, ValueKind};
///
/// let desc = MethodDescriptor::named("size")
///     .returns(ValueKind::Size)
///     .annotate(Annotation::Public)
///     .annotate(Annotation::Property);
/// assert_eq!(desc.name, "size");
/// assert!(desc.arguments.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodDescriptor {
    /// Identifier of the generated method; empty means the slot is unfilled.
    pub name: String,
    /// Parameters in call-site order.
    pub arguments: Vec<Argument>,
    /// What the method does.
    pub body: MethodBody,
    /// Kind of the result; [`ValueKind::Unit`] denotes no return value.
    pub returns: ValueKind,
    /// Emitter hints, in order.
    pub annotations: Vec<Annotation>,
}

impl Default for ValueKind {
    fn default() -> Self {
        Self::Unit
    }
}

impl MethodDescriptor {
    /// Starts a descriptor with the given method name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends a parameter.
    pub fn arg(mut self, name: impl Into<String>, ty: ValueKind) -> Self {
        self.arguments.push(Argument::new(name, ty));
        self
    }

    /// Sets the body template.
    pub fn template(mut self, template: Template) -> Self {
        self.body = MethodBody::Template(template);
        self
    }

    /// Sets the return kind.
    pub fn returns(mut self, ty: ValueKind) -> Self {
        self.returns = ty;
        self
    }

    /// Appends an annotation.
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_empty() {
        let desc = MethodDescriptor::default();
        assert_eq!(desc.name, "");
        assert!(desc.arguments.is_empty());
        assert_eq!(desc.body, MethodBody::NoOp);
        assert_eq!(desc.returns, ValueKind::Unit);
        assert!(desc.annotations.is_empty());
    }

    #[test]
    fn test_chained_construction_preserves_order() {
        let desc = MethodDescriptor::named("deserialize")
            .arg("payload", ValueKind::ByteSpan)
            .arg("offset", ValueKind::Size)
            .annotate(Annotation::Public)
            .annotate(Annotation::Static);
        assert_eq!(desc.arguments[0].name, "payload");
        assert_eq!(desc.arguments[1].name, "offset");
        assert_eq!(
            desc.annotations,
            [Annotation::Public, Annotation::Static]
        );
    }

    #[test]
    fn test_duplicate_annotations_allowed() {
        let desc = MethodDescriptor::named("x")
            .annotate(Annotation::Public)
            .annotate(Annotation::Public);
        assert_eq!(desc.annotations.len(), 2);
    }
}
