//! Arena storage for abstract syntax graph nodes.
//!
//! Struct-of-arrays layout: `kinds` and `hints` are parallel arrays indexed
//! by [`NodeId`]. A node may be referenced from any number of parent slots;
//! that is what makes it a graph until the lowering pass unfolds it.

use crate::ident::is_identifier;
use crate::node::{AsgKind, Literal, LogicalOp, MemberProp, PropKey, PropertyKind, UnaryOp};
use crate::node_id::to_u32;
use crate::NodeId;

/// Arena of ASG nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsgArena {
    /// Node kinds (parallel with `hints`).
    kinds: Vec<AsgKind>,
    /// Binding-name hint used if the node is promoted to a declaration.
    hints: Vec<Option<String>>,
}

impl AsgArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node without a binding-name hint.
    pub fn push(&mut self, kind: AsgKind) -> NodeId {
        let id = NodeId::new(to_u32(self.kinds.len(), "ASG nodes"));
        self.kinds.push(kind);
        self.hints.push(None);
        id
    }

    /// Allocate a node that carries a binding-name hint for promotion.
    pub fn push_hinted(&mut self, kind: AsgKind, hint: impl Into<String>) -> NodeId {
        let id = self.push(kind);
        self.hints[id.index()] = Some(hint.into());
        id
    }

    /// Get a node's kind.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn kind(&self, id: NodeId) -> &AsgKind {
        &self.kinds[id.index()]
    }

    /// Get a node's kind, or `None` for an id this arena never allocated.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&AsgKind> {
        self.kinds.get(id.index())
    }

    #[inline]
    pub fn kind_mut(&mut self, id: NodeId) -> &mut AsgKind {
        &mut self.kinds[id.index()]
    }

    /// Binding-name hint of a node, if any.
    #[inline]
    pub fn hint(&self, id: NodeId) -> Option<&str> {
        self.hints.get(id.index()).and_then(|h| h.as_deref())
    }

    /// Attach or replace the binding-name hint of an existing node.
    pub fn set_hint(&mut self, id: NodeId, hint: impl Into<String>) {
        if let Some(slot) = self.hints.get_mut(id.index()) {
            *slot = Some(hint.into());
        }
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Point `parent`'s child `slot` at `child`.
    ///
    /// Returns `false` if the parent has no such slot.
    pub fn replace_child(&mut self, parent: NodeId, slot: u32, child: NodeId) -> bool {
        match self.kinds.get_mut(parent.index()).and_then(|k| k.child_mut(slot)) {
            Some(target) => {
                *target = child;
                true
            }
            None => false,
        }
    }

    // Construction helpers

    pub fn ident(&mut self, name: impl Into<String>) -> NodeId {
        self.push(AsgKind::Ident(name.into()))
    }

    pub fn this(&mut self) -> NodeId {
        self.push(AsgKind::This)
    }

    pub fn literal(&mut self, literal: Literal) -> NodeId {
        self.push(AsgKind::Literal(literal))
    }

    /// `void 0`.
    pub fn undefined(&mut self) -> NodeId {
        let zero = self.literal(Literal::Int(0));
        self.push(AsgKind::Unary {
            op: UnaryOp::Void,
            operand: zero,
        })
    }

    /// `object.prop` when `prop` is an identifier, `object["prop"]` otherwise.
    pub fn member(&mut self, object: NodeId, prop: &str) -> NodeId {
        let property = if is_identifier(prop) {
            MemberProp::Named(prop.to_owned())
        } else {
            MemberProp::Computed(self.literal(Literal::Str(prop.to_owned())))
        };
        self.push(AsgKind::Member { object, property })
    }

    /// Member chain for a dotted path: `a.b.c`.
    pub fn path(&mut self, dotted: &str) -> NodeId {
        let mut components = dotted.split('.');
        let head = components.next().unwrap_or_default();
        let mut node = self.ident(head);
        for component in components {
            node = self.member(node, component);
        }
        node
    }

    /// Aggregate entry with identifier keying when possible.
    pub fn property(&mut self, name: &str, value: NodeId, kind: PropertyKind) -> NodeId {
        let key = if is_identifier(name) {
            PropKey::Ident(name.to_owned())
        } else {
            PropKey::Quoted(name.to_owned())
        };
        self.push(AsgKind::Property { key, value, kind })
    }

    pub fn or(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.push(AsgKind::Logical {
            op: LogicalOp::Or,
            left,
            right,
        })
    }

    /// `target = value;`
    pub fn assign_stmt(&mut self, target: NodeId, value: NodeId) -> NodeId {
        let expr = self.push(AsgKind::Assign { target, value });
        self.push(AsgKind::ExprStmt { expr })
    }

    pub fn ret(&mut self, value: NodeId) -> NodeId {
        self.push(AsgKind::Return { value: Some(value) })
    }

    /// `var name = init;`
    pub fn var_decl(&mut self, name: impl Into<String>, init: Option<NodeId>) -> NodeId {
        let declarator = self.push(AsgKind::Declarator {
            name: name.into(),
            init,
        });
        self.push(AsgKind::VarDecl {
            declarators: vec![declarator],
        })
    }

    /// Append an entry to an `Object` node. No-op on other kinds.
    pub fn push_property(&mut self, object: NodeId, property: NodeId) {
        if let AsgKind::Object { properties } = self.kind_mut(object) {
            properties.push(property);
        }
    }

    /// Append a statement to a `Block` node. No-op on other kinds.
    pub fn push_stmt(&mut self, block: NodeId, stmt: NodeId) {
        if let AsgKind::Block { body } = self.kind_mut(block) {
            body.push(stmt);
        }
    }

    /// Name bound by a single-declarator `VarDecl`.
    pub fn declared_name(&self, id: NodeId) -> Option<&str> {
        let AsgKind::VarDecl { declarators } = self.get(id)? else {
            return None;
        };
        match self.get(*declarators.first()?)? {
            AsgKind::Declarator { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests;
