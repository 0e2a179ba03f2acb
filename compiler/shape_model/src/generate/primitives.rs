//! Fixed expressions for primitives.
//!
//! Number, boolean, string, and regexp share one dependency chain rooted at
//! `Math.random()`, so the four collapse onto a single promoted binding.

use shape_ir::{AsgKind, Literal, NodeId, UnaryOp};

use super::AsgBuilder;
use crate::model::PrimitiveKind;
use crate::ModelId;

impl AsgBuilder<'_> {
    pub(super) fn primitive(&mut self, id: ModelId, kind: PrimitiveKind) -> NodeId {
        let node = match kind {
            // Leaves carry no identity worth sharing.
            PrimitiveKind::Undefined => return self.arena.undefined(),
            PrimitiveKind::Null => return self.arena.literal(Literal::Null),

            PrimitiveKind::Number => {
                let callee = self.arena.path("Math.random");
                self.arena.push_hinted(
                    AsgKind::Call {
                        callee,
                        args: vec![],
                    },
                    "$NUMBER$",
                )
            }
            PrimitiveKind::Boolean => {
                let operand = self.shared_primitive(PrimitiveKind::Number);
                self.arena.push_hinted(
                    AsgKind::Unary {
                        op: UnaryOp::Not,
                        operand,
                    },
                    "$BOOLEAN$",
                )
            }
            PrimitiveKind::String => {
                let number = self.shared_primitive(PrimitiveKind::Number);
                let callee = self.arena.ident("String");
                self.arena.push_hinted(
                    AsgKind::Call {
                        callee,
                        args: vec![number],
                    },
                    "$STRING$",
                )
            }
            PrimitiveKind::RegExp => {
                let string = self.shared_primitive(PrimitiveKind::String);
                let callee = self.arena.ident("RegExp");
                self.arena.push_hinted(
                    AsgKind::New {
                        callee,
                        args: vec![string],
                    },
                    "$REGEXP$",
                )
            }
        };
        self.cache(id, node);
        node
    }

    /// Cached node of another primitive kind.
    fn shared_primitive(&mut self, kind: PrimitiveKind) -> NodeId {
        let id = self.graph.primitive(kind);
        match self.nodes.get(&id) {
            Some(&node) => node,
            None => self.primitive(id, kind),
        }
    }
}
