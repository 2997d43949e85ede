//! Tag-to-subtype dispatch for abstract hierarchy heads.

use indexmap::IndexMap;
use wirebuf_schema::{ScalarKind, SchemaRegistry};

use crate::error::GenError;
use crate::ops::DispatchArm;

/// Closed mapping from wire tag to concrete subtype for one hierarchy.
///
/// Built once per base from registry declaration order, so arm order (and
/// with it every generated dispatch) is deterministic. Construction fails on
/// a tag claimed twice or a tag wider than the base's declared width; after
/// that the table is total: every subtype of the base has exactly one arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTable {
    base: String,
    tag_kind: ScalarKind,
    arms: IndexMap<u64, String>,
}

impl DispatchTable {
    /// Collects the subtypes of `base` into a dispatch table.
    pub fn build(reg: &SchemaRegistry, base: &str, tag_kind: ScalarKind) -> Result<Self, GenError> {
        let mut arms: IndexMap<u64, String> = IndexMap::new();
        for sub in reg.subtypes_of(base) {
            let tag = match &sub.extends {
                Some(ext) => ext.tag,
                None => continue,
            };
            if !tag_kind.fits(tag as i128) {
                return Err(GenError::TagOutOfRange {
                    base: base.to_string(),
                    subtype: sub.name.clone(),
                    tag,
                    tag_kind,
                });
            }
            if let Some(first) = arms.get(&tag) {
                return Err(GenError::DiscriminantCollision {
                    base: base.to_string(),
                    tag,
                    first: first.clone(),
                    second: sub.name.clone(),
                });
            }
            arms.insert(tag, sub.name.clone());
        }
        Ok(Self {
            base: base.to_string(),
            tag_kind,
            arms,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn tag_kind(&self) -> ScalarKind {
        self.tag_kind
    }

    pub fn len(&self) -> usize {
        self.arms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    /// Concrete type registered under `tag`, if any.
    pub fn type_for(&self, tag: u64) -> Option<&str> {
        self.arms.get(&tag).map(String::as_str)
    }

    /// Tag registered for `type_name`, if any.
    pub fn tag_for(&self, type_name: &str) -> Option<u64> {
        self.arms
            .iter()
            .find(|(_, name)| name.as_str() == type_name)
            .map(|(tag, _)| *tag)
    }

    /// Arms in declaration order.
    pub fn arms(&self) -> impl Iterator<Item = (u64, &str)> {
        self.arms.iter().map(|(tag, name)| (*tag, name.as_str()))
    }

    /// Arms in declaration order, in wire-plan form.
    pub fn plan_arms(&self) -> Vec<DispatchArm> {
        self.arms
            .iter()
            .map(|(tag, name)| DispatchArm {
                tag: *tag,
                type_name: name.clone(),
            })
            .collect()
    }
}
