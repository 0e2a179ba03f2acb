//! Structural S-expression dump of ASG nodes.
//!
//! For diagnostics, tracing output, and tests. This is not the program
//! renderer: it prints node structure, not source text.
//!
//! ```text
//! (var (obj_1 (object (prop x (call (. Math random))))))
//! (stmt (= p obj_1))
//! ```

use std::borrow::Cow;

use crate::node::{AsgKind, Literal, LogicalOp, MemberProp, PropKey, PropertyKind, UnaryOp};
use crate::{AsgArena, NodeId};

enum Task {
    Node(NodeId),
    Text(Cow<'static, str>),
}

/// Dump one node and everything below it.
pub fn dump(arena: &AsgArena, root: NodeId) -> String {
    let mut out = String::new();
    // Explicit stack; graphs handed to the renderer can nest deeply.
    let mut stack = vec![Task::Node(root)];
    while let Some(task) = stack.pop() {
        match task {
            Task::Text(text) => out.push_str(&text),
            Task::Node(id) => {
                let tasks = expand(arena, id);
                stack.extend(tasks.into_iter().rev());
            }
        }
    }
    out
}

/// Dump a statement list, one statement per line.
pub fn dump_program(arena: &AsgArena, body: &[NodeId]) -> String {
    body.iter()
        .map(|&stmt| dump(arena, stmt))
        .collect::<Vec<_>>()
        .join("\n")
}

fn text(s: impl Into<Cow<'static, str>>) -> Task {
    Task::Text(s.into())
}

/// `(head child child ...)` with single spaces.
fn list(head: impl Into<Cow<'static, str>>, items: impl IntoIterator<Item = Task>) -> Vec<Task> {
    let mut tasks = vec![text("("), text(head)];
    for item in items {
        tasks.push(text(" "));
        tasks.push(item);
    }
    tasks.push(text(")"));
    tasks
}

fn expand(arena: &AsgArena, id: NodeId) -> Vec<Task> {
    let Some(kind) = arena.get(id) else {
        return vec![text(format!("<dangling {id}>"))];
    };
    match kind {
        AsgKind::Ident(name) => vec![text(name.clone())],
        AsgKind::Literal(lit) => vec![text(literal(lit))],
        AsgKind::This => vec![text("this")],
        AsgKind::Unary { op, operand } => {
            let head = match op {
                UnaryOp::Not => "!",
                UnaryOp::Void => "void",
            };
            list(head, [Task::Node(*operand)])
        }
        AsgKind::Logical { op, left, right } => {
            let head = match op {
                LogicalOp::Or => "||",
            };
            list(head, [Task::Node(*left), Task::Node(*right)])
        }
        AsgKind::Assign { target, value } => list("=", [Task::Node(*target), Task::Node(*value)]),
        AsgKind::Call { callee, args } => list(
            "call",
            std::iter::once(*callee).chain(args.iter().copied()).map(Task::Node),
        ),
        AsgKind::New { callee, args } => list(
            "new",
            std::iter::once(*callee).chain(args.iter().copied()).map(Task::Node),
        ),
        AsgKind::Member { object, property } => match property {
            MemberProp::Named(name) => list(".", [Task::Node(*object), text(name.clone())]),
            MemberProp::Computed(key) => list(".[]", [Task::Node(*object), Task::Node(*key)]),
        },
        AsgKind::Function { params, body } => {
            let params = format!("({})", params.join(" "));
            list("function", [text(params), Task::Node(*body)])
        }
        AsgKind::Object { properties } => list("object", properties.iter().copied().map(Task::Node)),
        AsgKind::Property {
            key,
            value,
            kind: prop_kind,
        } => {
            let head = match prop_kind {
                PropertyKind::Init => "prop",
                PropertyKind::Get => "get",
                PropertyKind::Set => "set",
            };
            let key = match key {
                PropKey::Ident(name) => name.clone(),
                PropKey::Quoted(name) => format!("{name:?}"),
            };
            list(head, [text(key), Task::Node(*value)])
        }
        AsgKind::Array { elements } => list(
            "array",
            elements.iter().map(|element| match element {
                Some(id) => Task::Node(*id),
                None => text("_"),
            }),
        ),
        AsgKind::Block { body } => list("block", body.iter().copied().map(Task::Node)),
        AsgKind::ExprStmt { expr } => list("stmt", [Task::Node(*expr)]),
        AsgKind::Return { value } => list("return", value.iter().copied().map(Task::Node)),
        AsgKind::VarDecl { declarators } => list("var", declarators.iter().copied().map(Task::Node)),
        AsgKind::Declarator { name, init } => match init {
            Some(init) => list(name.clone(), [Task::Node(*init)]),
            None => vec![text(name.clone())],
        },
    }
}

fn literal(lit: &Literal) -> String {
    match lit {
        Literal::Null => "null".to_owned(),
        Literal::Int(n) => n.to_string(),
        Literal::Str(s) => format!("{s:?}"),
    }
}
