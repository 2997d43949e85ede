use wirebuf_schema::{EnumDef, FieldKind};

use super::{
    cmp_method, ctor, deserialize_method, eq_method, serialize_method, size_method, str_method,
};
use crate::descriptor::{Annotation, Argument, MethodDescriptor, ValueKind};
use crate::ops::{Template, WireOp};

/// Formatter for enumerations.
///
/// An enum is its discriminant: the wire image is the underlying value and
/// nothing else, equality and ordering derive strictly from its numeric
/// value, and the field list is empty. The constructor takes the raw value.
#[derive(Debug, Clone)]
pub struct EnumFormatter<'a> {
    def: &'a EnumDef,
}

impl<'a> EnumFormatter<'a> {
    pub(crate) fn new(def: &'a EnumDef) -> Self {
        Self { def }
    }

    pub fn type_name(&self) -> &str {
        &self.def.name
    }

    fn plan(&self) -> Vec<WireOp> {
        vec![WireOp::Discriminant {
            kind: self.def.repr,
        }]
    }

    pub fn ctor_descriptor(&self) -> MethodDescriptor {
        ctor(
            vec![Argument::new(
                "value",
                ValueKind::Ty(FieldKind::Scalar(self.def.repr)),
            )],
            Annotation::Public,
        )
    }

    pub fn comparer_descriptor(&self) -> Option<MethodDescriptor> {
        if !self.def.policy.comparable {
            return None;
        }
        Some(eq_method(&self.def.name, Template::CompareDiscriminant))
    }

    pub fn sort_descriptor(&self) -> Option<MethodDescriptor> {
        if !self.def.policy.sortable {
            return None;
        }
        Some(cmp_method(&self.def.name, Template::CompareDiscriminant))
    }

    pub fn deserialize_descriptor(&self) -> MethodDescriptor {
        deserialize_method(&self.def.name, self.plan())
    }

    pub fn serialize_descriptor(&self) -> MethodDescriptor {
        serialize_method(self.plan())
    }

    pub fn size_descriptor(&self) -> MethodDescriptor {
        size_method(self.plan())
    }

    pub fn str_descriptor(&self) -> Option<MethodDescriptor> {
        if !self.def.policy.printable {
            return None;
        }
        Some(str_method(vec!["value".to_string()]))
    }
}
