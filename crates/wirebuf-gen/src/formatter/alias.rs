use wirebuf_schema::{AliasDef, FieldDef};

use super::{
    cmp_method, ctor, deserialize_method, eq_method, field_args, getters_for, serialize_method,
    setters_for, size_method, str_method,
};
use crate::descriptor::{Annotation, MethodDescriptor};
use crate::ops::{Template, WireOp};

/// Formatter for primitive aliases.
///
/// An alias is a named wrapper over one `value` field; that single field
/// drives every descriptor.
#[derive(Debug, Clone)]
pub struct AliasFormatter<'a> {
    def: &'a AliasDef,
}

impl<'a> AliasFormatter<'a> {
    pub(crate) fn new(def: &'a AliasDef) -> Self {
        Self { def }
    }

    pub fn type_name(&self) -> &str {
        &self.def.name
    }

    fn value_field(&self) -> FieldDef {
        FieldDef::new("value", self.def.target.clone())
    }

    fn plan(&self) -> Vec<WireOp> {
        let field = self.value_field();
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
            Template::CompareFields(vec!["value".to_string()]),
        ))
    }

    pub fn sort_descriptor(&self) -> Option<MethodDescriptor> {
        if !self.def.policy.sortable {
            return None;
        }
        Some(cmp_method(
            &self.def.name,
            Template::OrderBy(vec!["value".to_string()]),
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

    pub fn setter_descriptors(&self) -> Vec<MethodDescriptor> {
        setters_for(&self.fields())
    }

    pub fn str_descriptor(&self) -> Option<MethodDescriptor> {
        if !self.def.policy.printable {
            return None;
        }
        Some(str_method(vec!["value".to_string()]))
    }

    pub fn fields(&self) -> Vec<FieldDef> {
        vec![self.value_field()]
    }
}
