//! Sharing detection and promotion.
//!
//! Walks the declaration forest depth-first, tagging each node with the
//! slot it was first reached through. A node reached a second time is
//! shared: it becomes the initializer of a new top-level `var`, and every
//! occurrence (the first one included) is rewritten to an identifier
//! naming that binding. After the walk, each rewritten occurrence is
//! attributed to the declaration that encloses it, giving the dependency
//! edges the ordering pass sorts by.
//!
//! The visitation map is owned by the pass, so the arena carries no
//! traversal state and the same generated forest can be lowered again.

use rustc_hash::FxHashSet;
use shape_ir::{AsgArena, AsgKind, BindingNames, LowerError, LowerResult, NodeId};

/// Position a node was first reached through.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Slot {
    /// Top-level statement `i`.
    Root(usize),
    /// Child `slot` of `parent`.
    Child { parent: NodeId, slot: u32 },
}

#[derive(Copy, Clone, Debug)]
struct Visit {
    at: Slot,
    /// Index into `Lowerer::promotions`.
    promoted: Option<usize>,
}

#[derive(Clone, Debug)]
struct Promotion {
    /// Root index of the `var` declaring the binding.
    root: usize,
    name: String,
}

#[derive(Copy, Clone, Debug)]
struct Work {
    node: NodeId,
    at: Slot,
}

/// Output of the lowering pass: a forest where every node has exactly one
/// parent (or is a root).
#[derive(Clone, Debug)]
pub struct Lowered {
    pub arena: AsgArena,
    /// Original roots followed by one `var` per promoted node.
    pub roots: Vec<NodeId>,
    /// `deps[i]`: roots whose bindings root `i` references, deduplicated,
    /// in first-reference order. May include `i` itself.
    pub deps: Vec<Vec<usize>>,
    /// Number of promoted nodes.
    pub promoted: usize,
}

/// Unfold the graph reachable from `roots` into a tree.
///
/// `names` must already hold every binding name in use; promoted bindings
/// draw from it using each node's hint.
///
/// # Errors
///
/// - `UnsupportedNodeKind` for a dangling id, a `Property` or `Declarator`
///   outside its container, or a shared node that is not an expression.
/// - `InvalidBindingName` for a shared node without a hint.
pub fn lower(
    arena: AsgArena,
    roots: Vec<NodeId>,
    names: &mut BindingNames,
) -> LowerResult<Lowered> {
    tracing::debug!(roots = roots.len(), nodes = arena.len(), "lowering");
    let mut lowerer = Lowerer {
        visits: vec![None; arena.len()],
        arena,
        roots,
        names,
        promotions: Vec::new(),
        references: Vec::new(),
        stack: Vec::new(),
    };
    lowerer.unfold()?;
    let deps = lowerer.attribute();
    let promoted = lowerer.promotions.len();
    tracing::debug!(promoted, "lowering finished");

    Ok(Lowered {
        arena: lowerer.arena,
        roots: lowerer.roots,
        deps,
        promoted,
    })
}

struct Lowerer<'n> {
    arena: AsgArena,
    roots: Vec<NodeId>,
    names: &'n mut BindingNames,
    visits: Vec<Option<Visit>>,
    promotions: Vec<Promotion>,
    /// Rewritten occurrences: `(parent holding the reference, promotion)`.
    references: Vec<(NodeId, usize)>,
    stack: Vec<Work>,
}

impl Lowerer<'_> {
    fn unfold(&mut self) -> LowerResult<()> {
        // Promoted declarations are appended to `roots` but not walked:
        // their initializer was already walked from its first occurrence.
        let original = self.roots.len();
        for index in 0..original {
            self.stack.push(Work {
                node: self.roots[index],
                at: Slot::Root(index),
            });
            while let Some(work) = self.stack.pop() {
                self.visit(work)?;
            }
        }
        Ok(())
    }

    fn visit(&mut self, work: Work) -> LowerResult<()> {
        let Work { node, at } = work;
        self.check_placement(node, at)?;

        match self.visit_of(node) {
            Some(Visit {
                promoted: Some(promotion),
                ..
            }) => self.reference(node, promotion, at),
            Some(Visit {
                at: first,
                promoted: None,
            }) => {
                let promotion = self.promote(node, first)?;
                self.reference(node, promotion, first)?;
                self.reference(node, promotion, at)
            }
            None => {
                self.set_visit(node, Visit { at, promoted: None });
                let children = self.arena.kind(node).children();
                for (slot, child) in children.into_iter().rev() {
                    self.stack.push(Work {
                        node: child,
                        at: Slot::Child { parent: node, slot },
                    });
                }
                Ok(())
            }
        }
    }

    /// Reject dangling ids and container-only kinds outside their container.
    fn check_placement(&self, node: NodeId, at: Slot) -> LowerResult<()> {
        let Some(kind) = self.arena.get(node) else {
            return Err(LowerError::UnsupportedNodeKind {
                node,
                kind: "dangling",
            });
        };
        let placed = match at {
            Slot::Root(_) => !matches!(
                kind,
                AsgKind::Property { .. } | AsgKind::Declarator { .. }
            ),
            Slot::Child { parent, .. } => self.arena.kind(parent).accepts_child(kind),
        };
        if placed {
            Ok(())
        } else {
            Err(LowerError::UnsupportedNodeKind {
                node,
                kind: kind.name(),
            })
        }
    }

    /// Declare `var <name> = node;` and mark the node promoted.
    fn promote(&mut self, node: NodeId, first: Slot) -> LowerResult<usize> {
        let kind = self.arena.kind(node);
        if !kind.is_expression() || matches!(first, Slot::Root(_)) {
            return Err(LowerError::UnsupportedNodeKind {
                node,
                kind: kind.name(),
            });
        }

        let name = self.names.fresh(self.arena.hint(node))?;
        let decl = self.arena.var_decl(name.clone(), Some(node));
        let root = self.roots.len();
        self.roots.push(decl);
        tracing::trace!(%node, name = name.as_str(), root, "promoted shared node");

        let promotion = self.promotions.len();
        self.promotions.push(Promotion { root, name });
        self.set_visit(
            node,
            Visit {
                at: first,
                promoted: Some(promotion),
            },
        );
        Ok(promotion)
    }

    /// Point the occurrence at `at` to the promoted binding.
    fn reference(&mut self, node: NodeId, promotion: usize, at: Slot) -> LowerResult<()> {
        let Slot::Child { parent, slot } = at else {
            return Err(LowerError::UnsupportedNodeKind {
                node,
                kind: self.arena.kind(node).name(),
            });
        };
        let name = self.promotions[promotion].name.clone();
        let ident = self.arena.ident(name);
        if !self.arena.replace_child(parent, slot, ident) {
            return Err(LowerError::UnsupportedNodeKind {
                node: parent,
                kind: self.arena.kind(parent).name(),
            });
        }
        self.references.push((parent, promotion));
        Ok(())
    }

    /// Resolve each reference to the root that encloses it: the nearest
    /// promoted ancestor, or the original root the chain ends at.
    fn attribute(&self) -> Vec<Vec<usize>> {
        let mut deps = vec![Vec::new(); self.roots.len()];
        let mut seen = FxHashSet::default();
        for &(site, promotion) in &self.references {
            let Some(owner) = self.owner(site) else {
                continue;
            };
            let target = self.promotions[promotion].root;
            if seen.insert((owner, target)) {
                deps[owner].push(target);
            }
        }
        deps
    }

    fn owner(&self, mut node: NodeId) -> Option<usize> {
        loop {
            let visit = self.visit_of(node)?;
            if let Some(promotion) = visit.promoted {
                return Some(self.promotions[promotion].root);
            }
            match visit.at {
                Slot::Root(index) => return Some(index),
                Slot::Child { parent, .. } => node = parent,
            }
        }
    }

    fn visit_of(&self, node: NodeId) -> Option<Visit> {
        self.visits.get(node.index()).copied().flatten()
    }

    fn set_visit(&mut self, node: NodeId, visit: Visit) {
        let index = node.index();
        if index >= self.visits.len() {
            self.visits.resize(index + 1, None);
        }
        self.visits[index] = Some(visit);
    }
}

#[cfg(test)]
mod tests;
