//! Pipeline driver: models → ASG → tree → ordered program.

use shape_ir::{BindingNames, LowerResult};
use shape_lower::{lower_program, CycleWarning, Program};
use shape_model::{AsgBuilder, Generated, ModelGraph};

use crate::SynthConfig;

/// A synthesized program and the dependency cycles that had to be broken.
#[derive(Clone, Debug)]
pub struct SynthOutput {
    pub program: Program,
    pub warnings: Vec<CycleWarning>,
}

/// Synthesize the program reconstructing `graph`'s global bindings.
///
/// Every property of the global model becomes a root `name = value;`
/// statement. Generation runs to completion for all roots before lowering
/// starts, since generating one root may append declarations others use.
///
/// # Errors
///
/// Any [`LowerError`](shape_ir::LowerError): the run is aborted and no
/// partial program is returned.
#[tracing::instrument(level = "debug", skip_all, fields(models = graph.len()))]
pub fn synthesize(graph: &ModelGraph, config: &SynthConfig) -> LowerResult<SynthOutput> {
    let globals = graph.model(graph.global()).properties();

    let mut names = BindingNames::new();
    if config.reserve_global_names {
        for (name, _) in globals.into_iter().flat_map(|props| props.iter()) {
            names.reserve(name);
        }
    }

    let mut builder = AsgBuilder::new(graph, config.generate_config(), names);
    for (name, value) in globals.into_iter().flat_map(|props| props.iter()) {
        builder.assign_global(name, value)?;
    }
    let Generated {
        arena,
        mut names,
        roots,
    } = builder.finish();

    let (program, warnings) = lower_program(arena, roots, &mut names, config.report_cycles)?;
    tracing::debug!(
        statements = program.len(),
        warnings = warnings.len(),
        "synthesis finished"
    );
    Ok(SynthOutput { program, warnings })
}
