use pretty_assertions::assert_eq;
use shape_ir::dump::dump;
use shape_ir::{Literal, PropertyKind};

use super::*;

/// `{ x: Math.random() }` hinted `obj_1`.
fn object_with_number(arena: &mut AsgArena) -> NodeId {
    let callee = arena.path("Math.random");
    let call = arena.push(AsgKind::Call {
        callee,
        args: vec![],
    });
    let x = arena.property("x", call, PropertyKind::Init);
    arena.push_hinted(
        AsgKind::Object {
            properties: vec![x],
        },
        "obj_1",
    )
}

fn assign(arena: &mut AsgArena, name: &str, value: NodeId) -> NodeId {
    let target = arena.ident(name);
    arena.assign_stmt(target, value)
}

fn run(arena: AsgArena, roots: Vec<NodeId>) -> Lowered {
    match lower(arena, roots, &mut BindingNames::new()) {
        Ok(lowered) => lowered,
        Err(err) => panic!("lowering failed: {err}"),
    }
}

fn dumps(lowered: &Lowered) -> Vec<String> {
    lowered
        .roots
        .iter()
        .map(|&root| dump(&lowered.arena, root))
        .collect()
}

#[test]
fn tree_input_is_left_alone() {
    let mut arena = AsgArena::new();
    let obj = object_with_number(&mut arena);
    let root = assign(&mut arena, "p", obj);

    let lowered = run(arena, vec![root]);
    assert_eq!(lowered.promoted, 0);
    assert_eq!(lowered.deps, vec![Vec::<usize>::new()]);
    assert_eq!(
        dumps(&lowered),
        vec!["(stmt (= p (object (prop x (call (. Math random))))))".to_owned()]
    );
}

#[test]
fn node_shared_by_two_roots_is_promoted_once() {
    let mut arena = AsgArena::new();
    let obj = object_with_number(&mut arena);
    let p = assign(&mut arena, "p", obj);
    let q = assign(&mut arena, "q", obj);

    let lowered = run(arena, vec![p, q]);
    assert_eq!(lowered.promoted, 1);
    assert_eq!(
        dumps(&lowered),
        vec![
            "(stmt (= p obj_1))".to_owned(),
            "(stmt (= q obj_1))".to_owned(),
            "(var (obj_1 (object (prop x (call (. Math random))))))".to_owned(),
        ]
    );
    assert_eq!(lowered.deps, vec![vec![2], vec![2], vec![]]);
}

#[test]
fn self_reference_records_a_self_edge() {
    let mut arena = AsgArena::new();
    let obj = arena.push_hinted(
        AsgKind::Object {
            properties: vec![],
        },
        "obj_1",
    );
    let y = arena.property("y", obj, PropertyKind::Init);
    arena.push_property(obj, y);
    let root = assign(&mut arena, "o", obj);

    let lowered = run(arena, vec![root]);
    assert_eq!(
        dumps(&lowered),
        vec![
            "(stmt (= o obj_1))".to_owned(),
            "(var (obj_1 (object (prop y obj_1))))".to_owned(),
        ]
    );
    assert_eq!(lowered.deps, vec![vec![1], vec![1]]);
}

#[test]
fn references_inside_a_promoted_node_belong_to_its_declaration() {
    let mut arena = AsgArena::new();
    let callee = arena.path("Math.random");
    let num = arena.push_hinted(
        AsgKind::Call {
            callee,
            args: vec![],
        },
        "$NUMBER$",
    );
    let n = arena.property("n", num, PropertyKind::Init);
    let obj = arena.push_hinted(
        AsgKind::Object {
            properties: vec![n],
        },
        "obj_7",
    );
    let p = assign(&mut arena, "p", obj);
    let q = assign(&mut arena, "q", obj);
    let r = assign(&mut arena, "r", num);

    let lowered = run(arena, vec![p, q, r]);
    assert_eq!(lowered.promoted, 2);
    assert_eq!(
        dumps(&lowered)[3..].to_vec(),
        vec![
            "(var (obj_7 (object (prop n $NUMBER$))))".to_owned(),
            "(var ($NUMBER$ (call (. Math random))))".to_owned(),
        ]
    );
    assert_eq!(
        lowered.deps,
        vec![vec![3], vec![3], vec![4], vec![4], vec![]]
    );
}

#[test]
fn repeated_argument_is_promoted() {
    let mut arena = AsgArena::new();
    let callee = arena.ident("f");
    let zero = arena.literal(Literal::Int(0));
    let shared = arena.push_hinted(
        AsgKind::Unary {
            op: shape_ir::UnaryOp::Void,
            operand: zero,
        },
        "undef",
    );
    let call = arena.push(AsgKind::Call {
        callee,
        args: vec![shared, shared],
    });
    let root = arena.push(AsgKind::ExprStmt { expr: call });

    let lowered = run(arena, vec![root]);
    assert_eq!(
        dumps(&lowered),
        vec![
            "(stmt (call f undef undef))".to_owned(),
            "(var (undef (void 0)))".to_owned(),
        ]
    );
    assert_eq!(lowered.deps, vec![vec![1], vec![]]);
}

#[test]
fn promoted_names_avoid_taken_names() {
    let mut arena = AsgArena::new();
    let obj = object_with_number(&mut arena);
    let p = assign(&mut arena, "p", obj);
    let q = assign(&mut arena, "q", obj);

    let mut names = BindingNames::new();
    names.reserve("obj_1");
    let lowered = match lower(arena, vec![p, q], &mut names) {
        Ok(lowered) => lowered,
        Err(err) => panic!("lowering failed: {err}"),
    };
    assert_eq!(lowered.arena.declared_name(lowered.roots[2]), Some("obj_1_1"));
}

#[test]
fn lowering_the_same_forest_twice_is_independent() {
    let mut arena = AsgArena::new();
    let obj = object_with_number(&mut arena);
    let p = assign(&mut arena, "p", obj);
    let q = assign(&mut arena, "q", obj);

    let first = run(arena.clone(), vec![p, q]);
    let second = run(arena, vec![p, q]);
    assert_eq!(dumps(&first), dumps(&second));
}

#[test]
fn shared_node_without_hint_is_rejected() {
    let mut arena = AsgArena::new();
    let this = arena.this();
    let p = assign(&mut arena, "p", this);
    let q = assign(&mut arena, "q", this);

    let err = lower(arena, vec![p, q], &mut BindingNames::new()).err();
    assert_eq!(err, Some(LowerError::InvalidBindingName { hint: None }));
}

#[test]
fn dangling_child_is_rejected() {
    let mut arena = AsgArena::new();
    let root = arena.push(AsgKind::ExprStmt {
        expr: NodeId::new(99),
    });

    let err = lower(arena, vec![root], &mut BindingNames::new()).err();
    assert_eq!(
        err,
        Some(LowerError::UnsupportedNodeKind {
            node: NodeId::new(99),
            kind: "dangling",
        })
    );
}

#[test]
fn property_outside_object_is_rejected() {
    let mut arena = AsgArena::new();
    let this = arena.this();
    let prop = arena.property("a", this, PropertyKind::Init);
    let block = arena.push(AsgKind::Block { body: vec![prop] });

    let err = lower(arena, vec![block], &mut BindingNames::new()).err();
    assert_eq!(
        err,
        Some(LowerError::UnsupportedNodeKind {
            node: prop,
            kind: "property",
        })
    );
}

#[test]
fn declarator_as_root_is_rejected() {
    let mut arena = AsgArena::new();
    let declarator = arena.push(AsgKind::Declarator {
        name: "a".to_owned(),
        init: None,
    });

    let err = lower(arena, vec![declarator], &mut BindingNames::new()).err();
    assert_eq!(
        err,
        Some(LowerError::UnsupportedNodeKind {
            node: declarator,
            kind: "declarator",
        })
    );
}

#[test]
fn shared_statement_is_rejected() {
    let mut arena = AsgArena::new();
    let this = arena.this();
    let stmt = arena.push(AsgKind::ExprStmt { expr: this });
    let block = arena.push(AsgKind::Block {
        body: vec![stmt, stmt],
    });

    let err = lower(arena, vec![block], &mut BindingNames::new()).err();
    assert_eq!(
        err,
        Some(LowerError::UnsupportedNodeKind {
            node: stmt,
            kind: "expr-stmt",
        })
    );
}
