//! Shape synthesis: turn recorded value-shape models into a program that
//! rebuilds the same shapes when run.
//!
//! The pipeline has three stages, each in its own crate:
//!
//! - `shape_model`: the model graph a tracer fills in, and the rules that
//!   generate an ASG (a syntax tree with shared subtrees) from it
//! - `shape_lower`: promotion of shared subtrees to top-level bindings,
//!   dependency ordering, and program assembly
//! - `shape_ir`: the ASG arena everything above works on
//!
//! [`synthesize`] drives all of them for one trace.
//!
//! # Tracing
//!
//! Enable tracing with environment variables:
//! - `RUST_LOG=shape_lower=debug` - per-phase summaries
//! - `RUST_LOG=shape_lower=trace` - one event per promoted node
//! - broken dependency cycles are logged at `warn`

mod config;
mod synth;

pub use config::SynthConfig;
pub use synth::{synthesize, SynthOutput};

pub use shape_lower::{CycleWarning, Program};
pub use shape_model::{ModelGraph, ModelId, PrimitiveKind, SiteKey};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing if `RUST_LOG` is unset; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
