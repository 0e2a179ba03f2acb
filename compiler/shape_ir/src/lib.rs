//! Abstract syntax graph (ASG) for shape synthesis.
//!
//! The ASG is the intermediate form between value-shape models and the
//! emitted program. Generation produces a *graph*: a node describing a
//! shared value (an object literal two globals point at, the `Math.random()`
//! call every number reuses) is referenced from every place it occurs. The
//! lowering pass later unfolds that graph into a tree by promoting shared
//! nodes to top-level bindings.
//!
//! # Contents
//!
//! - [`NodeId`] / [`AsgArena`]: arena storage; identity is the id
//! - [`AsgKind`]: the closed node-kind set, with child-slot addressing
//! - [`BindingNames`]: unique top-level binding names
//! - [`LowerError`]: fatal errors shared by generation and lowering
//! - [`dump`]: structural S-expression dump for diagnostics and tests

mod arena;
pub mod dump;
mod error;
mod ident;
mod names;
mod node;
mod node_id;

pub use arena::AsgArena;
pub use error::{LowerError, LowerResult};
pub use ident::{array_index, is_identifier};
pub use names::BindingNames;
pub use node::{
    AsgKind, Children, Literal, LogicalOp, MemberProp, PropKey, PropertyKind, UnaryOp,
};
pub use node_id::NodeId;
