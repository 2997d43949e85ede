use wirebuf_schema::{FieldDef, FieldKind, SequenceDef};

use super::{
    cmp_method, ctor, deserialize_method, eq_method, field_args, getters_for, serialize_method,
    size_method, str_method,
};
use crate::descriptor::{Annotation, MethodDescriptor};
use crate::ops::{Template, WireOp};

/// Formatter for named count-prefixed sequences.
///
/// The sequence wraps its element kind behind a single `elements` field: the
/// wire image is the count prefix followed by the elements, and size is the
/// prefix width plus the sum of element sizes.
#[derive(Debug, Clone)]
pub struct SequenceFormatter<'a> {
    def: &'a SequenceDef,
}

impl<'a> SequenceFormatter<'a> {
    pub(crate) fn new(def: &'a SequenceDef) -> Self {
        Self { def }
    }

    pub fn type_name(&self) -> &str {
        &self.def.name
    }

    fn elements_field(&self) -> FieldDef {
        FieldDef::new(
            "elements",
            FieldKind::Vector {
                count: self.def.count_kind,
                element: Box::new(self.def.element.clone()),
            },
        )
    }

    fn plan(&self) -> Vec<WireOp> {
        let field = self.elements_field();
        vec![WireOp::Field {
            name: field.name,
            kind: field.kind,
        }]
    }

    pub fn ctor_descriptor(&self) -> MethodDescriptor {
        let fields = self.fields();
        ctor(field_args(fields.iter()), Annotation::Public)
    }

    pub fn comparer_descriptor(&self) -> Option<MethodDescriptor> {
        if !self.def.policy.comparable {
            return None;
        }
        Some(eq_method(
            &self.def.name,
            Template::CompareFields(vec!["elements".to_string()]),
        ))
    }

    pub fn sort_descriptor(&self) -> Option<MethodDescriptor> {
        if !self.def.policy.sortable {
            return None;
        }
        Some(cmp_method(
            &self.def.name,
            Template::OrderBy(vec!["elements".to_string()]),
        ))
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

    pub fn getter_descriptors(&self) -> Vec<MethodDescriptor> {
        getters_for(&self.fields())
    }

    pub fn str_descriptor(&self) -> Option<MethodDescriptor> {
        if !self.def.policy.printable {
            return None;
        }
        Some(str_method(vec!["elements".to_string()]))
    }

    pub fn fields(&self) -> Vec<FieldDef> {
        vec![self.elements_field()]
    }
}
