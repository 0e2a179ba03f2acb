//! Graph-to-tree lowering for shape synthesis.
//!
//! Three passes over a generated ASG forest:
//!
//! 1. [`lower`]: detect shared nodes, promote each to a top-level binding,
//!    and rewrite every occurrence into a reference. Records which
//!    declaration references which.
//! 2. [`order`]: topologically sort the declarations by those references,
//!    breaking (and reporting) true cycles.
//! 3. [`assemble`]: lay the statements out as the final [`Program`].
//!
//! [`lower_program`] runs all three.

mod assemble;
mod lower;
mod order;

pub use assemble::{assemble, Program};
pub use lower::{lower, Lowered};
pub use order::{order, CycleWarning, Ordering};

use shape_ir::{AsgArena, BindingNames, LowerResult, NodeId};

/// Lower, order, and assemble in one go.
///
/// Cycle warnings are returned alongside the program; they never make the
/// run fail.
pub fn lower_program(
    arena: AsgArena,
    roots: Vec<NodeId>,
    names: &mut BindingNames,
    report_cycles: bool,
) -> LowerResult<(Program, Vec<CycleWarning>)> {
    let lowered = lower(arena, roots, names)?;
    let ordering = order(&lowered.arena, &lowered.roots, &lowered.deps, report_cycles);
    Ok((assemble(lowered, &ordering.order), ordering.cycles))
}

#[cfg(test)]
mod tests;
