//! Stack growth for recursive model-graph generation.
//!
//! Node generation recurses once per level of model nesting (an object
//! holding a function whose return value is an array of objects, ...).
//! Traces of real programs can nest deeply enough to exhaust the default
//! thread stack, so every recursive generation step goes through
//! [`ensure_sufficient_stack`].
//!
//! The lowering and ordering passes do not need this: they walk the
//! declaration forest with explicit work-stacks.
//!
//! # Configuration
//!
//! - **Red zone**: 64KB. If less than this remains, the stack is grown.
//! - **Growth size**: 1MB per segment.

/// Minimum stack space to keep available before recursing.
const RED_ZONE: usize = 64 * 1024;

/// Stack space allocated per growth segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn to_node(&mut self, model: ModelId) -> Result<NodeId, LowerError> {
///     ensure_sufficient_stack(|| self.generate(model))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
