//! Inference outcomes and type errors, checked through whole sessions.

use kiln_diagnostic::ErrorCode;
use kiln_ir::ParsedType;
use kilnc::SessionConfig;
use pretty_assertions::assert_eq;

use crate::common::{error_codes, lines, only_failure, run, ProgramBuilder};

#[test]
fn integer_literal_is_int() {
    let mut b = ProgramBuilder::new();
    let lit = b.int(42);
    b.do_(lit);
    assert_eq!(lines(&run(b, SessionConfig::default())), ["42 : Int"]);
}

#[test]
fn identity_shares_its_variable() {
    let mut b = ProgramBuilder::new();
    let x = b.var("x");
    let id = b.lambda("x", x);
    b.do_(id);
    assert_eq!(lines(&run(b, SessionConfig::default())), ["(x) -> x : $t1 -> $t1"]);
}

#[test]
fn list_construction_has_list_type() {
    let mut b = ProgramBuilder::new();
    b.int_list();
    let one = b.int(1);
    let nil = b.tag("Nil", vec![]);
    let cons = b.tag("Cons", vec![one, nil]);
    b.do_(cons);

    assert_eq!(
        lines(&run(b, SessionConfig::default())),
        ["type List: Nil, Cons", "Cons(1, Nil()) : List"]
    );
}

#[test]
fn list_tail_must_be_a_list() {
    let mut b = ProgramBuilder::new();
    b.int_list();
    let one = b.int(1);
    let two = b.int(2);
    let cons = b.tag("Cons", vec![one, two]);
    b.do_(cons);

    let report = run(b, SessionConfig::default());
    let diag = only_failure(&report);
    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(diag.message, "type mismatch: expected `List`, found `Int`");
}

#[test]
fn tag_arity_is_its_own_error() {
    let mut b = ProgramBuilder::new();
    b.int_list();
    let one = b.int(1);
    let nil = b.tag("Nil", vec![one]);
    b.do_(nil);

    let report = run(b, SessionConfig::default());
    let diag = only_failure(&report);
    assert_eq!(diag.code, ErrorCode::E2004);
    assert_eq!(diag.message, "tag `Nil` expects 0 arguments but 1 was supplied");
}

#[test]
fn undeclared_variable_is_reported() {
    let mut b = ProgramBuilder::new();
    let y = b.var("y");
    b.do_(y);

    let report = run(b, SessionConfig::default());
    assert_eq!(error_codes(&report), [ErrorCode::E2003]);
    assert_eq!(only_failure(&report).message, "undefined variable `y`");
}

#[test]
fn undeclared_tag_is_reported() {
    let mut b = ProgramBuilder::new();
    let none = b.tag("None", vec![]);
    b.do_(none);

    let report = run(b, SessionConfig::default());
    assert_eq!(error_codes(&report), [ErrorCode::E2006]);
}

#[test]
fn wildcard_match_is_int() {
    let mut b = ProgramBuilder::new();
    let scrutinee = b.bool(true);
    let one = b.int(1);
    let two = b.int(2);
    let m = b.match_(scrutinee, None, one, two);
    b.do_(m);

    assert_eq!(
        lines(&run(b, SessionConfig::default())),
        ["match true as _ then 1 else 2 : Int"]
    );
}

#[test]
fn binding_match_sees_scrutinee_type() {
    let mut b = ProgramBuilder::new();
    let scrutinee = b.string("hello");
    let s = b.var("s");
    let other = b.string("bye");
    let m = b.match_(scrutinee, Some("s"), s, other);
    b.do_(m);

    assert_eq!(
        lines(&run(b, SessionConfig::default())),
        ["match \"hello\" as s then s else \"bye\" : String"]
    );
}

#[test]
fn arithmetic_through_the_prelude() {
    let mut b = ProgramBuilder::new();
    let two = b.int(2);
    let three = b.int(3);
    let product = b.binop("(*)", two, three);
    let one = b.int(1);
    let sum = b.binop("(+)", one, product);
    b.do_(sum);

    assert_eq!(
        lines(&run(b, SessionConfig::default())),
        ["(+)(1)((*)(2)(3)) : Int"]
    );
}

#[test]
fn top_level_let_is_polymorphic() {
    let mut b = ProgramBuilder::new();
    b.option();
    let x = b.var("x");
    let id = b.lambda("x", x);
    b.let_("id", id);
    let id_ref = b.var("id");
    let one = b.int(1);
    let some = b.tag("Some", vec![one]);
    let call = b.app(id_ref, some);
    b.do_(call);
    let id_ref = b.var("id");
    let t = b.bool(true);
    let call = b.app(id_ref, t);
    b.do_(call);

    assert_eq!(
        lines(&run(b, SessionConfig::default())),
        [
            "type Option: None, Some",
            "let id : forall $t2. $t2 -> $t2",
            "id(Some(1)) : Option<Int>",
            "id(true) : Bool",
        ]
    );
}

#[test]
fn local_let_generalizes() {
    let mut b = ProgramBuilder::new();
    let x = b.var("x");
    let id = b.lambda("x", x);
    let f1 = b.var("f");
    let t = b.bool(true);
    let cond = b.app(f1, t);
    let f2 = b.var("f");
    let one = b.int(1);
    let then_branch = b.app(f2, one);
    let zero = b.int(0);
    let body = b.if_(cond, then_branch, zero);
    let program = b.let_in("f", id, body);
    b.do_(program);

    let report = run(b, SessionConfig::default());
    assert!(!report.has_errors(), "{report}");
    assert!(lines(&report)[0].ends_with(" : Int"));
}

#[test]
fn annotated_lambda_rejects_wrong_argument() {
    let mut b = ProgramBuilder::new();
    let n = b.var("n");
    let one = b.int(1);
    let body = b.binop("(+)", n, one);
    let inc = b.lambda_typed("n", ParsedType::Int, body);
    let arg = b.string("one");
    let call = b.app(inc, arg);
    b.do_(call);

    let report = run(b, SessionConfig::default());
    let diag = only_failure(&report);
    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(diag.message, "type mismatch: expected `Int`, found `String`");
}

#[test]
fn self_application_is_rejected() {
    let mut b = ProgramBuilder::new();
    let x1 = b.var("x");
    let x2 = b.var("x");
    let call = b.app(x1, x2);
    let lam = b.lambda("x", call);
    b.do_(lam);

    let report = run(b, SessionConfig::default());
    assert_eq!(error_codes(&report), [ErrorCode::E2005]);
}

#[test]
fn mutually_referencing_items() {
    let mut b = ProgramBuilder::new();
    let forest = b.named("Forest");
    let tree = b.named("Tree");
    let forest_again = b.named("Forest");
    let tree_item = b.item("Tree", &[], vec![("Node", vec![ParsedType::Int, forest])]);
    let forest_item = b.item(
        "Forest",
        &[],
        vec![("Empty", vec![]), ("Grow", vec![tree, forest_again])],
    );
    b.type_def(vec![tree_item, forest_item]);
    let one = b.int(1);
    let empty = b.tag("Empty", vec![]);
    let leaf = b.tag("Node", vec![one, empty]);
    let empty = b.tag("Empty", vec![]);
    let grown = b.tag("Grow", vec![leaf, empty]);
    b.do_(grown);

    assert_eq!(
        lines(&run(b, SessionConfig::default())),
        [
            "type Tree, Forest: Node, Empty, Grow",
            "Grow(Node(1, Empty()), Empty()) : Forest",
        ]
    );
}

#[test]
fn unannotated_tag_argument_accepts_any_type_per_use() {
    let mut b = ProgramBuilder::new();
    let item = b.item("Any", &[], vec![("Wrap", vec![ParsedType::Infer])]);
    b.type_def(vec![item]);
    let one = b.int(1);
    let wrapped_int = b.tag("Wrap", vec![one]);
    b.do_(wrapped_int);
    let t = b.bool(true);
    let wrapped_bool = b.tag("Wrap", vec![t]);
    b.do_(wrapped_bool);

    assert_eq!(
        lines(&run(b, SessionConfig::default())),
        ["type Any: Wrap", "Wrap(1) : Any", "Wrap(true) : Any"]
    );
}

#[test]
fn deeply_nested_lambdas_check_and_print() {
    const DEPTH: usize = 3_000;
    let mut b = ProgramBuilder::new();
    let mut expr = b.var("x");
    for _ in 0..DEPTH {
        expr = b.lambda("x", expr);
    }
    b.do_(expr);

    let report = run(b, SessionConfig::default());
    let lines = lines(&report);
    assert_eq!(lines.len(), 1);
    let Some((source, ty)) = lines[0].split_once(" : ") else {
        panic!("unexpected report line");
    };
    assert_eq!(source.matches("(x) -> ").count(), DEPTH);
    assert_eq!(ty.matches(" -> ").count(), DEPTH);
}
