use wirebuf_schema::{FieldDef, SchemaRegistry, StructDef, TypeDef};

use super::{
    cmp_method, ctor, deserialize_method, eq_method, field_args, field_ops, getters_for,
    serialize_method, setters_for, size_method, str_method,
};
use crate::descriptor::{Annotation, MethodDescriptor};
use crate::error::GenError;
use crate::ops::{Template, WireOp};

/// Formatter for concrete records, standalone or extending an abstract base.
///
/// A subtype's wire image is its tag, then the inherited span (delegated to
/// the parent's restricted serializer), then its own fields. Its constructor
/// and comparisons cover inherited data fields first, then its own, so an
/// instance is fully specified through one call.
#[derive(Debug, Clone)]
pub struct RecordFormatter<'a> {
    def: &'a StructDef,
    parent: Option<&'a StructDef>,
    plan: Vec<WireOp>,
}

impl<'a> RecordFormatter<'a> {
    pub(crate) fn new(reg: &'a SchemaRegistry, def: &'a StructDef) -> Result<Self, GenError> {
        let own_ops = field_ops(&def.name, &def.fields)?;
        let (parent, plan) = match &def.extends {
            None => (None, own_ops),
            Some(ext) => {
                let parent = match reg.get(&ext.base) {
                    None => return Err(GenError::UnknownType(ext.base.clone())),
                    Some(TypeDef::Struct(p)) => p,
                    Some(_) => {
                        return Err(GenError::InvalidBase {
                            subtype: def.name.clone(),
                            base: ext.base.clone(),
                        })
                    }
                };
                let Some(tag_kind) = parent.tag_kind else {
                    return Err(GenError::InvalidBase {
                        subtype: def.name.clone(),
                        base: ext.base.clone(),
                    });
                };
                if !tag_kind.fits(ext.tag as i128) {
                    return Err(GenError::TagOutOfRange {
                        base: ext.base.clone(),
                        subtype: def.name.clone(),
                        tag: ext.tag,
                        tag_kind,
                    });
                }
                let mut plan = vec![
                    WireOp::Tag {
                        kind: tag_kind,
                        value: ext.tag,
                    },
                    WireOp::Inherited {
                        base: ext.base.clone(),
                    },
                ];
                plan.extend(own_ops);
                (Some(parent), plan)
            }
        };
        Ok(Self { def, parent, plan })
    }

    pub fn type_name(&self) -> &str {
        &self.def.name
    }

    pub fn base_class_name(&self) -> Option<&str> {
        self.def.extends.as_ref().map(|e| e.base.as_str())
    }

    /// Inherited data fields followed by own data fields.
    fn all_data_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.parent
            .into_iter()
            .flat_map(|p| p.data_fields())
            .chain(self.def.data_fields())
    }

    fn all_data_names(&self) -> Vec<String> {
        self.all_data_fields().map(|f| f.name.clone()).collect()
    }

    /// Marks methods that replace a declaration on the base type.
    fn with_override(&self, desc: MethodDescriptor) -> MethodDescriptor {
        if self.parent.is_some() {
            desc.annotate(Annotation::Override)
        } else {
            desc
        }
    }

    pub fn ctor_descriptor(&self) -> MethodDescriptor {
        ctor(field_args(self.all_data_fields()), Annotation::Public)
    }

    pub fn comparer_descriptor(&self) -> Option<MethodDescriptor> {
        if !self.def.policy.comparable {
            return None;
        }
        Some(eq_method(
            &self.def.name,
            Template::CompareFields(self.all_data_names()),
        ))
    }

    pub fn sort_descriptor(&self) -> Option<MethodDescriptor> {
        if !self.def.policy.sortable {
            return None;
        }
        Some(cmp_method(
            &self.def.name,
            Template::OrderBy(self.all_data_names()),
        ))
    }

    pub fn deserialize_descriptor(&self) -> MethodDescriptor {
        deserialize_method(&self.def.name, self.plan.clone())
    }

    pub fn serialize_descriptor(&self) -> MethodDescriptor {
        self.with_override(serialize_method(self.plan.clone()))
    }

    pub fn size_descriptor(&self) -> MethodDescriptor {
        self.with_override(size_method(self.plan.clone()))
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
        Some(self.with_override(str_method(self.all_data_names())))
    }

    pub fn fields(&self) -> Vec<FieldDef> {
        self.def.fields.clone()
    }
}
