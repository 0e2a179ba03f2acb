//! Pipeline configuration.

use shape_model::GenerateConfig;

/// Configuration for [`synthesize`](crate::synthesize).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthConfig {
    /// Name hint for the binding that aliases the global scope.
    /// Defaults to `global`.
    pub global_name: String,

    /// Drop `F.prototype = {}` writes for prototypes that render empty.
    /// Defaults to `true`.
    pub suppress_empty_prototype: bool,

    /// Reserve the traced program's own top-level names before synthesizing
    /// any binding, so no synthesized binding shadows one. Defaults to `true`.
    pub reserve_global_names: bool,

    /// Log broken dependency cycles at `warn`. They are returned either way.
    /// Defaults to `true`.
    pub report_cycles: bool,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            global_name: "global".to_owned(),
            suppress_empty_prototype: true,
            reserve_global_names: true,
            report_cycles: true,
        }
    }
}

impl SynthConfig {
    /// Create a new config with the specified global alias.
    pub fn with_global_name(global_name: impl Into<String>) -> Self {
        Self {
            global_name: global_name.into(),
            ..Default::default()
        }
    }

    /// Create a new config that keeps empty prototype writes.
    pub fn keeping_empty_prototypes() -> Self {
        Self {
            suppress_empty_prototype: false,
            ..Default::default()
        }
    }

    /// Create a new config that returns cycle warnings without logging them.
    pub fn with_silent_cycles() -> Self {
        Self {
            report_cycles: false,
            ..Default::default()
        }
    }

    pub(crate) fn generate_config(&self) -> GenerateConfig {
        GenerateConfig {
            global_name: self.global_name.clone(),
            suppress_empty_prototype: self.suppress_empty_prototype,
        }
    }
}
