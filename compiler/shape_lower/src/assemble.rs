//! Final statement sequence handed to the renderer.

use shape_ir::dump::dump_program;
use shape_ir::{AsgArena, NodeId};

use crate::Lowered;

/// Tree-shaped program: every node in `body` (and below) has one parent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub arena: AsgArena,
    /// Top-level statements in emission order.
    pub body: Vec<NodeId>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// S-expression dump, one statement per line.
    pub fn dump(&self) -> String {
        dump_program(&self.arena, &self.body)
    }
}

/// Lay out `lowered`'s roots in `order`.
///
/// Indices missing from `order` are appended in their original position
/// order, so no statement is ever dropped.
pub fn assemble(lowered: Lowered, order: &[usize]) -> Program {
    let Lowered { arena, roots, .. } = lowered;
    let mut placed = vec![false; roots.len()];
    let mut body = Vec::with_capacity(roots.len());

    for &index in order {
        if let Some(seen) = placed.get_mut(index) {
            if !*seen {
                *seen = true;
                body.push(roots[index]);
            }
        }
    }
    for (index, seen) in placed.iter().enumerate() {
        if !seen {
            body.push(roots[index]);
        }
    }

    tracing::debug!(statements = body.len(), "program assembled");
    Program { arena, body }
}
