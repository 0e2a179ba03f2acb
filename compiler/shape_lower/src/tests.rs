use pretty_assertions::assert_eq;
use shape_ir::{AsgKind, PropertyKind};

use super::*;

fn empty_object(arena: &mut AsgArena, hint: &str) -> NodeId {
    arena.push_hinted(
        AsgKind::Object {
            properties: vec![],
        },
        hint,
    )
}

fn set(arena: &mut AsgArena, object: NodeId, name: &str, value: NodeId) {
    let entry = arena.property(name, value, PropertyKind::Init);
    arena.push_property(object, entry);
}

fn assign(arena: &mut AsgArena, name: &str, value: NodeId) -> NodeId {
    let target = arena.ident(name);
    arena.assign_stmt(target, value)
}

fn run(arena: AsgArena, roots: Vec<NodeId>) -> (Program, Vec<CycleWarning>) {
    match lower_program(arena, roots, &mut BindingNames::new(), true) {
        Ok(out) => out,
        Err(err) => panic!("lowering failed: {err}"),
    }
}

#[test]
fn shared_object_is_declared_before_both_uses() {
    let mut arena = AsgArena::new();
    let obj = empty_object(&mut arena, "obj_1");
    let callee = arena.path("Math.random");
    let num = arena.push_hinted(
        AsgKind::Call {
            callee,
            args: vec![],
        },
        "$NUMBER$",
    );
    set(&mut arena, obj, "x", num);
    let p = assign(&mut arena, "p", obj);
    let q = assign(&mut arena, "q", obj);

    let (program, cycles) = run(arena, vec![p, q]);
    assert!(cycles.is_empty());
    assert_eq!(
        program.dump(),
        "(var (obj_1 (object (prop x (call (. Math random))))))\n\
         (stmt (= p obj_1))\n\
         (stmt (= q obj_1))"
    );
}

#[test]
fn self_reference_is_accepted_without_warning() {
    let mut arena = AsgArena::new();
    let obj = empty_object(&mut arena, "obj_1");
    set(&mut arena, obj, "y", obj);
    let o = assign(&mut arena, "o", obj);

    let (program, cycles) = run(arena, vec![o]);
    assert!(cycles.is_empty());
    assert_eq!(
        program.dump(),
        "(var (obj_1 (object (prop y obj_1))))\n(stmt (= o obj_1))"
    );
}

#[test]
fn mutual_reference_keeps_every_statement_and_warns() {
    let mut arena = AsgArena::new();
    let a = empty_object(&mut arena, "obj_a");
    let b = empty_object(&mut arena, "obj_b");
    set(&mut arena, a, "b", b);
    set(&mut arena, b, "a", a);
    let p = assign(&mut arena, "p", a);
    let q = assign(&mut arena, "q", b);

    let (program, cycles) = run(arena, vec![p, q]);
    assert_eq!(
        program.dump(),
        "(var (obj_b (object (prop a obj_a))))\n\
         (var (obj_a (object (prop b obj_b))))\n\
         (stmt (= p obj_a))\n\
         (stmt (= q obj_b))"
    );
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].from_name.as_deref(), Some("obj_b"));
    assert_eq!(cycles[0].to_name.as_deref(), Some("obj_a"));
}

#[test]
fn assemble_never_drops_statements() {
    let mut arena = AsgArena::new();
    let this = arena.this();
    let a = assign(&mut arena, "a", this);
    let that = arena.this();
    let b = assign(&mut arena, "b", that);
    let lowered = Lowered {
        arena,
        roots: vec![a, b],
        deps: vec![vec![], vec![]],
        promoted: 0,
    };

    let program = assemble(lowered, &[1, 1, 7]);
    assert_eq!(program.body, vec![b, a]);
}
