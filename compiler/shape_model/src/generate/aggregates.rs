//! Object, array, and union rules.
//!
//! Aggregate nodes are allocated and cached *before* their entries are
//! generated, so a cycle back into the aggregate finds the cached node and
//! terminates.

use shape_ir::{array_index, AsgKind, LowerResult, NodeId, PropertyKind};

use super::AsgBuilder;
use crate::model::{ArrayModel, Model, ObjectModel, UnionModel};
use crate::ModelId;

/// Arrays whose highest index exceeds this render through the object rule
/// instead of allocating a mostly-empty element list.
const MAX_DENSE_INDEX: u32 = 1 << 16;

impl AsgBuilder<'_> {
    pub(super) fn object(&mut self, id: ModelId, obj: &ObjectModel) -> LowerResult<NodeId> {
        let hint = format!("obj_{}", self.graph.label(id));
        let node = self.arena.push_hinted(AsgKind::Object { properties: vec![] }, hint);
        self.cache(id, node);

        for (name, value) in obj.properties.iter() {
            self.push_entry(node, name, value, PropertyKind::Init)?;
        }
        for (name, getter) in obj.getters.iter() {
            self.push_entry(node, name, getter, PropertyKind::Get)?;
        }
        for (name, setter) in obj.setters.iter() {
            self.push_entry(node, name, setter, PropertyKind::Set)?;
        }
        Ok(node)
    }

    fn push_entry(
        &mut self,
        object: NodeId,
        name: &str,
        value: ModelId,
        kind: PropertyKind,
    ) -> LowerResult<()> {
        let value = self.to_node(value)?;
        let entry = self.arena.property(name, value, kind);
        self.arena.push_property(object, entry);
        Ok(())
    }

    /// Whether `model` renders as `{}`: an object, or an array taking the
    /// object rule, with no entries at all.
    pub(super) fn renders_empty_object(&self, model: ModelId) -> bool {
        let object = match self.graph.model(model) {
            Model::Object(obj) => obj,
            Model::Array(arr) if arr.degraded => &arr.object,
            Model::Union(union) => match union.members.as_slice() {
                [only] => return self.renders_empty_object(*only),
                _ => return false,
            },
            _ => return false,
        };
        object.properties.is_empty() && object.getters.is_empty() && object.setters.is_empty()
    }

    pub(super) fn array(&mut self, id: ModelId, arr: &ArrayModel) -> LowerResult<NodeId> {
        if arr.degraded {
            return self.object(id, &arr.object);
        }
        let mut slots = Vec::with_capacity(arr.object.properties.len());
        for (name, value) in arr.object.properties.iter() {
            match array_index(name) {
                Some(index) if index <= MAX_DENSE_INDEX => slots.push((index, value)),
                _ => return self.object(id, &arr.object),
            }
        }

        let hint = format!("array_{}", self.graph.label(id));
        let node = self.arena.push_hinted(AsgKind::Array { elements: vec![] }, hint);
        self.cache(id, node);

        let len = slots.iter().map(|&(index, _)| index as usize + 1).max().unwrap_or(0);
        let mut elements = vec![None; len];
        for (index, value) in slots {
            elements[index as usize] = Some(self.to_node(value)?);
        }
        if let AsgKind::Array { elements: slot } = self.arena.kind_mut(node) {
            *slot = elements;
        }
        Ok(node)
    }

    /// Left fold of members under `||`.
    ///
    /// `a || b` only picks `b` when `a` is falsy, so a member that can
    /// produce a meaningful falsy value shadows the ones after it.
    pub(super) fn union(&mut self, id: ModelId, union: &UnionModel) -> LowerResult<NodeId> {
        match union.members.as_slice() {
            [] => Ok(self.arena.undefined()),
            [only] => self.to_node(*only),
            [first, rest @ ..] => {
                let mut acc = self.to_node(*first)?;
                let mut operands = Vec::with_capacity(rest.len());
                for &member in rest {
                    operands.push(self.to_node(member)?);
                }
                // A member may have cycled back here through a cached
                // aggregate and built the disjunction already.
                if let Some(&node) = self.nodes.get(&id) {
                    return Ok(node);
                }
                for operand in operands {
                    acc = self.arena.or(acc, operand);
                }
                self.arena.set_hint(acc, format!("union_{}", id.raw()));
                self.cache(id, acc);
                Ok(acc)
            }
        }
    }
}
