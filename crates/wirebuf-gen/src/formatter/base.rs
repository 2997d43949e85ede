use wirebuf_schema::{FieldDef, ScalarKind, SchemaRegistry, StructDef};

use super::{
    ctor, deserialize_method, field_args, field_ops, getters_for, serialize_fields_method,
    serialize_method, setters_for, size_method, str_method,
};
use crate::descriptor::{Annotation, MethodDescriptor};
use crate::dispatch::DispatchTable;
use crate::error::GenError;
use crate::ops::WireOp;

/// Formatter for abstract hierarchy heads.
///
/// The base never appears on the wire by itself: serialize, deserialize and
/// size dispatch on the subtype tag and delegate the whole image to the
/// concrete type. What the base owns is the shared field span, exposed to
/// subtypes through the restricted serializer, and a protected constructor.
/// Equality and ordering are deliberately absent; they belong to concrete
/// types.
#[derive(Debug, Clone)]
pub struct BaseFormatter<'a> {
    def: &'a StructDef,
    table: DispatchTable,
    shared_plan: Vec<WireOp>,
}

impl<'a> BaseFormatter<'a> {
    pub(crate) fn new(
        reg: &'a SchemaRegistry,
        def: &'a StructDef,
        tag_kind: ScalarKind,
    ) -> Result<Self, GenError> {
        if let Some(ext) = &def.extends {
            return Err(GenError::NestedHierarchy {
                name: def.name.clone(),
                base: ext.base.clone(),
            });
        }
        let table = DispatchTable::build(reg, &def.name, tag_kind)?;
        let shared_plan = field_ops(&def.name, &def.fields)?;
        Ok(Self {
            def,
            table,
            shared_plan,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.def.name
    }

    pub fn dispatch_table(&self) -> &DispatchTable {
        &self.table
    }

    fn dispatch_plan(&self) -> Vec<WireOp> {
        vec![WireOp::Dispatch {
            tag_kind: self.table.tag_kind(),
            arms: self.table.plan_arms(),
        }]
    }

    pub fn ctor_descriptor(&self) -> MethodDescriptor {
        ctor(field_args(self.def.data_fields()), Annotation::Protected)
    }

    pub fn deserialize_descriptor(&self) -> MethodDescriptor {
        deserialize_method(&self.def.name, self.dispatch_plan())
    }

    pub fn serialize_descriptor(&self) -> MethodDescriptor {
        serialize_method(self.dispatch_plan())
    }

    pub fn serialize_protected_descriptor(&self) -> MethodDescriptor {
        serialize_fields_method(self.shared_plan.clone())
    }

    pub fn size_descriptor(&self) -> MethodDescriptor {
        size_method(self.dispatch_plan())
    }

    pub fn getter_descriptors(&self) -> Vec<MethodDescriptor> {
        getters_for(&self.def.fields)
    }

    pub fn setter_descriptors(&self) -> Vec<MethodDescriptor> {
        setters_for(&self.def.fields)
    }

    pub fn str_descriptor(&self) -> Option<MethodDescriptor> {
        if !self.def.policy.printable {
            return None;
        }
        let names = self.def.data_fields().map(|f| f.name.clone()).collect();
        Some(str_method(names))
    }

    pub fn fields(&self) -> Vec<FieldDef> {
        self.def.fields.clone()
    }
}
