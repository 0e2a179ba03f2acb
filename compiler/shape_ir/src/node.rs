//! Node kinds of the abstract syntax graph.
//!
//! The kind set is closed: every traversal matches on [`AsgKind`]
//! exhaustively, so a new kind cannot be added without teaching the
//! lowering pass how to walk it.
//!
//! # Child slots
//!
//! Children are addressed by a per-kind slot number so that the lowering
//! pass can rewrite one occurrence without knowing the parent's shape:
//!
//! | kind                  | slots                                   |
//! |-----------------------|-----------------------------------------|
//! | `Unary`               | 0 = operand                             |
//! | `Logical`             | 0 = left, 1 = right                     |
//! | `Assign`              | 0 = target, 1 = value                   |
//! | `Call` / `New`        | 0 = callee, `i + 1` = argument `i`      |
//! | `Member`              | 0 = object, 1 = computed property       |
//! | `Function`            | 0 = body                                |
//! | `Object`              | `i` = property entry `i`                |
//! | `Property`            | 0 = value                               |
//! | `Array`               | `i` = element `i` (holes have no slot)  |
//! | `Block`               | `i` = statement `i`                     |
//! | `ExprStmt`            | 0 = expression                          |
//! | `Return`              | 0 = value                               |
//! | `VarDecl`             | `i` = declarator `i`                    |
//! | `Declarator`          | 0 = initializer                         |

use smallvec::SmallVec;

use crate::NodeId;

/// Literal values. Only what generation needs: `void 0`, `null`, and
/// quoted keys for computed member access.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    Null,
    Int(i64),
    Str(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    /// Logical negation (`!`).
    Not,
    /// Evaluate and discard (`void`).
    Void,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogicalOp {
    /// Prefer left, fall back to right (`||`).
    Or,
}

/// Key of an aggregate entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropKey {
    /// Valid bare identifier: `{ x: ... }`.
    Ident(String),
    /// Anything else, rendered quoted: `{ "0": ... }`.
    Quoted(String),
}

impl PropKey {
    pub fn as_str(&self) -> &str {
        match self {
            PropKey::Ident(s) | PropKey::Quoted(s) => s,
        }
    }
}

/// Entry kind inside an object aggregate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

/// Property side of a member access.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberProp {
    /// `object.name`; not a child slot.
    Named(String),
    /// `object[expr]`; occupies slot 1.
    Computed(NodeId),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsgKind {
    // Leaves
    /// Reference to a top-level or local binding.
    Ident(String),
    Literal(Literal),
    /// The implicit receiver.
    This,

    // Expressions
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Logical {
        op: LogicalOp,
        left: NodeId,
        right: NodeId,
    },
    Assign {
        target: NodeId,
        value: NodeId,
    },
    Call {
        callee: NodeId,
        args: Vec<NodeId>,
    },
    New {
        callee: NodeId,
        args: Vec<NodeId>,
    },
    Member {
        object: NodeId,
        property: MemberProp,
    },
    Function {
        params: Vec<String>,
        body: NodeId,
    },
    Object {
        properties: Vec<NodeId>,
    },
    /// Only valid as a direct child of `Object`.
    Property {
        key: PropKey,
        value: NodeId,
        kind: PropertyKind,
    },
    Array {
        elements: Vec<Option<NodeId>>,
    },

    // Statements
    Block {
        body: Vec<NodeId>,
    },
    ExprStmt {
        expr: NodeId,
    },
    Return {
        value: Option<NodeId>,
    },
    VarDecl {
        declarators: Vec<NodeId>,
    },
    /// Only valid as a direct child of `VarDecl`.
    Declarator {
        name: String,
        init: Option<NodeId>,
    },
}

/// Child list as `(slot, child)` pairs, in source order.
pub type Children = SmallVec<[(u32, NodeId); 4]>;

impl AsgKind {
    /// Short kind name for diagnostics and dumps.
    pub fn name(&self) -> &'static str {
        match self {
            AsgKind::Ident(_) => "ident",
            AsgKind::Literal(_) => "literal",
            AsgKind::This => "this",
            AsgKind::Unary { .. } => "unary",
            AsgKind::Logical { .. } => "logical",
            AsgKind::Assign { .. } => "assign",
            AsgKind::Call { .. } => "call",
            AsgKind::New { .. } => "new",
            AsgKind::Member { .. } => "member",
            AsgKind::Function { .. } => "function",
            AsgKind::Object { .. } => "object",
            AsgKind::Property { .. } => "property",
            AsgKind::Array { .. } => "array",
            AsgKind::Block { .. } => "block",
            AsgKind::ExprStmt { .. } => "expr-stmt",
            AsgKind::Return { .. } => "return",
            AsgKind::VarDecl { .. } => "var",
            AsgKind::Declarator { .. } => "declarator",
        }
    }

    /// Leaves have no child slots.
    pub fn is_leaf(&self) -> bool {
        matches!(self, AsgKind::Ident(_) | AsgKind::Literal(_) | AsgKind::This)
    }

    /// Whether `child` may appear in a slot of `self`.
    ///
    /// `Property` and `Declarator` only exist inside their containers.
    pub fn accepts_child(&self, child: &AsgKind) -> bool {
        match child {
            AsgKind::Property { .. } => matches!(self, AsgKind::Object { .. }),
            AsgKind::Declarator { .. } => matches!(self, AsgKind::VarDecl { .. }),
            _ => true,
        }
    }

    /// Whether the node is a value and so may initialise a declaration.
    pub fn is_expression(&self) -> bool {
        !matches!(
            self,
            AsgKind::Property { .. }
                | AsgKind::Block { .. }
                | AsgKind::ExprStmt { .. }
                | AsgKind::Return { .. }
                | AsgKind::VarDecl { .. }
                | AsgKind::Declarator { .. }
        )
    }

    /// Child slots in traversal order.
    pub fn children(&self) -> Children {
        let mut out = Children::new();
        match self {
            AsgKind::Ident(_) | AsgKind::Literal(_) | AsgKind::This => {}
            AsgKind::Unary { operand, .. } => out.push((0, *operand)),
            AsgKind::Logical { left, right, .. } => {
                out.push((0, *left));
                out.push((1, *right));
            }
            AsgKind::Assign { target, value } => {
                out.push((0, *target));
                out.push((1, *value));
            }
            AsgKind::Call { callee, args } | AsgKind::New { callee, args } => {
                out.push((0, *callee));
                out.extend(slots(args).map(|(slot, id)| (slot + 1, id)));
            }
            AsgKind::Member { object, property } => {
                out.push((0, *object));
                if let MemberProp::Computed(key) = property {
                    out.push((1, *key));
                }
            }
            AsgKind::Function { body, .. } => out.push((0, *body)),
            AsgKind::Object { properties: list }
            | AsgKind::Block { body: list }
            | AsgKind::VarDecl { declarators: list } => out.extend(slots(list)),
            AsgKind::Property { value, .. } => out.push((0, *value)),
            AsgKind::Array { elements } => {
                for (slot, element) in (0u32..).zip(elements) {
                    if let Some(id) = element {
                        out.push((slot, *id));
                    }
                }
            }
            AsgKind::ExprStmt { expr } => out.push((0, *expr)),
            AsgKind::Return { value } | AsgKind::Declarator { init: value, .. } => {
                if let Some(id) = value {
                    out.push((0, *id));
                }
            }
        }
        out
    }

    /// Mutable access to the child in `slot`, if the slot exists.
    pub fn child_mut(&mut self, slot: u32) -> Option<&mut NodeId> {
        let index = slot as usize;
        match self {
            AsgKind::Ident(_) | AsgKind::Literal(_) | AsgKind::This => None,
            AsgKind::Unary { operand, .. } => (slot == 0).then_some(operand),
            AsgKind::Logical { left, right, .. } => match slot {
                0 => Some(left),
                1 => Some(right),
                _ => None,
            },
            AsgKind::Assign { target, value } => match slot {
                0 => Some(target),
                1 => Some(value),
                _ => None,
            },
            AsgKind::Call { callee, args } | AsgKind::New { callee, args } => match slot {
                0 => Some(callee),
                _ => args.get_mut(index - 1),
            },
            AsgKind::Member { object, property } => match (slot, property) {
                (0, _) => Some(object),
                (1, MemberProp::Computed(key)) => Some(key),
                _ => None,
            },
            AsgKind::Function { body, .. } => (slot == 0).then_some(body),
            AsgKind::Object { properties: list }
            | AsgKind::Block { body: list }
            | AsgKind::VarDecl { declarators: list } => list.get_mut(index),
            AsgKind::Property { value, .. } => (slot == 0).then_some(value),
            AsgKind::Array { elements } => elements.get_mut(index).and_then(Option::as_mut),
            AsgKind::ExprStmt { expr } => (slot == 0).then_some(expr),
            AsgKind::Return { value } | AsgKind::Declarator { init: value, .. } => {
                if slot == 0 {
                    value.as_mut()
                } else {
                    None
                }
            }
        }
    }
}

fn slots(list: &[NodeId]) -> impl Iterator<Item = (u32, NodeId)> + '_ {
    (0u32..).zip(list.iter().copied())
}
