use pretty_assertions::assert_eq;

use super::*;

#[test]
fn ids_are_allocated_sequentially() {
    let mut arena = AsgArena::new();
    let a = arena.ident("a");
    let b = arena.this();
    assert_eq!(a, NodeId::new(0));
    assert_eq!(b, NodeId::new(1));
    assert_eq!(arena.len(), 2);
}

#[test]
fn hints_are_per_node() {
    let mut arena = AsgArena::new();
    let plain = arena.this();
    let hinted = arena.push_hinted(
        AsgKind::Object {
            properties: vec![],
        },
        "obj_4",
    );
    assert_eq!(arena.hint(plain), None);
    assert_eq!(arena.hint(hinted), Some("obj_4"));
}

#[test]
fn member_uses_computed_access_for_non_identifiers() {
    let mut arena = AsgArena::new();
    let obj = arena.ident("o");
    let named = arena.member(obj, "prototype");
    let computed = arena.member(obj, "0");

    assert_eq!(
        arena.kind(named),
        &AsgKind::Member {
            object: obj,
            property: MemberProp::Named("prototype".to_owned()),
        }
    );
    let AsgKind::Member {
        property: MemberProp::Computed(key),
        ..
    } = arena.kind(computed)
    else {
        panic!("expected computed member");
    };
    assert_eq!(arena.kind(*key), &AsgKind::Literal(Literal::Str("0".to_owned())));
}

#[test]
fn path_builds_member_chain() {
    let mut arena = AsgArena::new();
    let node = arena.path("window.Intl.Collator");
    let AsgKind::Member { object, property } = arena.kind(node) else {
        panic!("expected member");
    };
    assert_eq!(property, &MemberProp::Named("Collator".to_owned()));
    let AsgKind::Member { object: root, .. } = arena.kind(*object) else {
        panic!("expected member");
    };
    assert_eq!(arena.kind(*root), &AsgKind::Ident("window".to_owned()));
}

#[test]
fn property_keys_follow_identifier_rules() {
    let mut arena = AsgArena::new();
    let v = arena.this();
    let ident = arena.property("x", v, PropertyKind::Init);
    let quoted = arena.property("1", v, PropertyKind::Get);
    assert!(matches!(
        arena.kind(ident),
        AsgKind::Property { key: PropKey::Ident(k), kind: PropertyKind::Init, .. } if k == "x"
    ));
    assert!(matches!(
        arena.kind(quoted),
        AsgKind::Property { key: PropKey::Quoted(k), kind: PropertyKind::Get, .. } if k == "1"
    ));
}

#[test]
fn replace_child_rewrites_one_slot() {
    let mut arena = AsgArena::new();
    let callee = arena.ident("f");
    let a = arena.ident("a");
    let b = arena.ident("b");
    let call = arena.push(AsgKind::Call {
        callee,
        args: vec![a, b],
    });
    let c = arena.ident("c");

    assert!(arena.replace_child(call, 2, c));
    assert_eq!(
        arena.kind(call),
        &AsgKind::Call {
            callee,
            args: vec![a, c],
        }
    );
    assert!(!arena.replace_child(call, 3, c));
}

#[test]
fn replace_child_skips_array_holes() {
    let mut arena = AsgArena::new();
    let a = arena.ident("a");
    let arr = arena.push(AsgKind::Array {
        elements: vec![None, Some(a)],
    });
    let b = arena.ident("b");
    assert!(!arena.replace_child(arr, 0, b));
    assert!(arena.replace_child(arr, 1, b));
    assert_eq!(
        arena.kind(arr).children().into_vec(),
        vec![(1, b)]
    );
}

#[test]
fn every_reported_slot_can_be_rewritten() {
    let mut arena = AsgArena::new();
    let x = arena.ident("x");
    let kinds = vec![
        AsgKind::Unary { op: UnaryOp::Not, operand: x },
        AsgKind::Logical { op: LogicalOp::Or, left: x, right: x },
        AsgKind::Assign { target: x, value: x },
        AsgKind::Call { callee: x, args: vec![x, x] },
        AsgKind::New { callee: x, args: vec![x] },
        AsgKind::Member { object: x, property: MemberProp::Computed(x) },
        AsgKind::Function { params: vec![], body: x },
        AsgKind::Object { properties: vec![x, x] },
        AsgKind::Property { key: PropKey::Ident("k".to_owned()), value: x, kind: PropertyKind::Init },
        AsgKind::Array { elements: vec![Some(x), None, Some(x)] },
        AsgKind::Block { body: vec![x] },
        AsgKind::ExprStmt { expr: x },
        AsgKind::Return { value: Some(x) },
        AsgKind::VarDecl { declarators: vec![x, x] },
        AsgKind::Declarator { name: "d".to_owned(), init: Some(x) },
    ];

    for kind in kinds {
        let name = kind.name();
        let parent = arena.push(kind);
        for (slot, _) in arena.kind(parent).children() {
            let y = arena.ident("y");
            assert!(arena.replace_child(parent, slot, y), "{name} slot {slot}");
            assert!(
                arena.kind(parent).children().contains(&(slot, y)),
                "{name} slot {slot}"
            );
        }
    }
}

#[test]
fn children_follow_slot_table() {
    let mut arena = AsgArena::new();
    let target = arena.ident("t");
    let value = arena.ident("v");
    let stmt = arena.assign_stmt(target, value);
    let AsgKind::ExprStmt { expr } = arena.kind(stmt) else {
        panic!("expected statement");
    };
    assert_eq!(
        arena.kind(*expr).children().into_vec(),
        vec![(0, target), (1, value)]
    );
}

#[test]
fn declared_name_reads_single_declarator() {
    let mut arena = AsgArena::new();
    let init = arena.this();
    let decl = arena.var_decl("global", Some(init));
    assert_eq!(arena.declared_name(decl), Some("global"));
    assert_eq!(arena.declared_name(init), None);
}

#[test]
fn container_only_kinds() {
    let object = AsgKind::Object {
        properties: vec![],
    };
    let property = AsgKind::Property {
        key: PropKey::Ident("a".to_owned()),
        value: NodeId::new(0),
        kind: PropertyKind::Init,
    };
    let block = AsgKind::Block { body: vec![] };
    assert!(object.accepts_child(&property));
    assert!(!block.accepts_child(&property));
    assert!(block.accepts_child(&AsgKind::This));
}
