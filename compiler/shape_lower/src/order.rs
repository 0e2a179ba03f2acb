//! Dependency ordering of top-level statements.
//!
//! Postorder DFS over the dependency edges recorded by lowering: a root is
//! emitted only after everything it references. An edge into a root that
//! is still on the DFS path closes a cycle; the edge is skipped and
//! reported as a [`CycleWarning`], and the output simply contains a forward
//! reference. Self edges are the normal shape of self-referential values
//! and are skipped silently.

use std::fmt;

use shape_ir::{AsgArena, NodeId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    Unvisited,
    InProgress,
    Done,
}

/// A dependency that could not be satisfied because it closes a cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleWarning {
    /// Statement holding the forward reference.
    pub from: NodeId,
    /// Statement it references.
    pub to: NodeId,
    pub from_name: Option<String>,
    pub to_name: Option<String>,
}

impl fmt::Display for CycleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |name: &Option<String>, id: NodeId| match name {
            Some(name) => name.clone(),
            None => format!("statement {id}"),
        };
        write!(
            f,
            "circular dependency: {} refers to {} before it is initialised",
            name(&self.from_name, self.from),
            name(&self.to_name, self.to)
        )
    }
}

/// Statement order plus the cycles that had to be broken.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ordering {
    /// Root indices in emission order; a permutation of `0..roots.len()`.
    pub order: Vec<usize>,
    pub cycles: Vec<CycleWarning>,
}

/// Order `roots` so that dependencies come first wherever possible.
///
/// Roots are started in list order, so independent statements keep their
/// relative order. With `report_cycles`, each broken cycle is also logged.
pub fn order(
    arena: &AsgArena,
    roots: &[NodeId],
    deps: &[Vec<usize>],
    report_cycles: bool,
) -> Ordering {
    let count = roots.len();
    let mut state = vec![State::Unvisited; count];
    let mut result = Ordering {
        order: Vec::with_capacity(count),
        cycles: Vec::new(),
    };

    // Stack entries: (root index, next dependency to look at).
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for start in 0..count {
        if state[start] != State::Unvisited {
            continue;
        }
        state[start] = State::InProgress;
        stack.push((start, 0));

        while let Some(top) = stack.last_mut() {
            let (root, cursor) = *top;
            let edges = deps.get(root).map_or(&[][..], Vec::as_slice);
            let Some(&dep) = edges.get(cursor) else {
                state[root] = State::Done;
                result.order.push(root);
                stack.pop();
                continue;
            };
            top.1 += 1;

            match state.get(dep) {
                Some(State::Unvisited) => {
                    state[dep] = State::InProgress;
                    stack.push((dep, 0));
                }
                Some(State::InProgress) if dep != root => {
                    let warning = CycleWarning {
                        from: roots[root],
                        to: roots[dep],
                        from_name: arena.declared_name(roots[root]).map(str::to_owned),
                        to_name: arena.declared_name(roots[dep]).map(str::to_owned),
                    };
                    if report_cycles {
                        tracing::warn!("{warning}");
                    }
                    result.cycles.push(warning);
                }
                // Self edge, finished root, or an index past the end.
                _ => {}
            }
        }
    }

    tracing::debug!(
        statements = result.order.len(),
        cycles = result.cycles.len(),
        "ordering finished"
    );
    result
}
