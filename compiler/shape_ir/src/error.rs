//! Fatal errors of the generation and lowering pipeline.
//!
//! Any of these aborts lowering for the whole trace; there is no useful
//! partial program. Recoverable cycles are not errors and are reported as
//! warnings by the ordering pass instead.

use thiserror::Error;

use crate::NodeId;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LowerError {
    /// The traversal met a node it has no rule for: an id this arena never
    /// allocated, or a container-only kind outside its container.
    #[error("cannot lower {kind} node {node}")]
    UnsupportedNodeKind { node: NodeId, kind: &'static str },

    /// A binding name was requested from an empty or absent hint.
    #[error("cannot synthesize a binding name from {}", hint_display(.hint))]
    InvalidBindingName { hint: Option<String> },
}

fn hint_display(hint: &Option<String>) -> String {
    match hint {
        Some(h) => format!("hint {h:?}"),
        None => "a node without a name hint".to_owned(),
    }
}

pub type LowerResult<T> = Result<T, LowerError>;
