//! Session-level behavior: error policy, prelude, and state across runs.

use kiln_diagnostic::ErrorCode;
use kiln_ir::ParsedType;
use kilnc::{ErrorPolicy, Session, SessionConfig};
use pretty_assertions::assert_eq;

use crate::common::{ends_in_failure, error_codes, lines, run, ProgramBuilder};

/// `y` (undefined), then `1`.
fn failure_then_success() -> ProgramBuilder {
    let mut b = ProgramBuilder::new();
    let y = b.var("y");
    b.do_(y);
    let one = b.int(1);
    b.do_(one);
    b
}

#[test]
fn halt_stops_at_first_failure() {
    let report = run(failure_then_success(), SessionConfig::default());
    assert_eq!(report.entries.len(), 1);
    assert!(ends_in_failure(&report));
}

#[test]
fn continue_checks_remaining_forms() {
    let config = SessionConfig::default().with_error_policy(ErrorPolicy::Continue);
    let report = run(failure_then_success(), config);
    assert_eq!(report.entries.len(), 2);
    assert_eq!(error_codes(&report), [ErrorCode::E2003]);
    assert_eq!(lines(&report)[1], "1 : Int");
}

#[test]
fn failed_let_is_not_bound() {
    let mut b = ProgramBuilder::new();
    let c = b.bool(true);
    let one = b.int(1);
    let s = b.string("s");
    let bad = b.if_(c, one, s);
    b.let_("bad", bad);
    let use_bad = b.var("bad");
    b.do_(use_bad);

    let config = SessionConfig::default().with_error_policy(ErrorPolicy::Continue);
    let report = run(b, config);
    assert_eq!(error_codes(&report), [ErrorCode::E2001, ErrorCode::E2003]);
}

#[test]
fn prelude_can_be_disabled() {
    let mut b = ProgramBuilder::new();
    let one = b.int(1);
    let two = b.int(2);
    let sum = b.binop("(+)", one, two);
    b.do_(sum);

    let report = run(b, SessionConfig::default().with_prelude(false));
    assert_eq!(error_codes(&report), [ErrorCode::E2003]);
    assert_eq!(
        report.diagnostics().next().map(|d| d.message.as_str()),
        Some("undefined variable `(+)`")
    );
}

#[test]
fn earlier_type_definitions_keep_their_tags() {
    let mut b = ProgramBuilder::new();
    let first = b.item("T", &[], vec![("Mk", vec![])]);
    b.type_def(vec![first]);
    let second = b.item("U", &[], vec![("Mk", vec![ParsedType::Int])]);
    b.type_def(vec![second]);
    let bare = b.tag("Mk", vec![]);
    b.do_(bare);
    let one = b.int(1);
    let applied = b.tag("Mk", vec![one]);
    b.do_(applied);

    let report = run(b, SessionConfig::default());
    assert_eq!(lines(&report)[..3], ["type T: Mk", "type U: Mk", "Mk() : T"]);
    assert!(ends_in_failure(&report));
    assert_eq!(error_codes(&report), [ErrorCode::E2004]);
}

#[test]
fn earlier_items_of_one_definition_keep_their_tags() {
    let mut b = ProgramBuilder::new();
    let left = b.item("L", &[], vec![("Mk", vec![ParsedType::Bool])]);
    let right = b.item("R", &[], vec![("Mk", vec![ParsedType::Int])]);
    b.type_def(vec![left, right]);
    let t = b.bool(true);
    let mk = b.tag("Mk", vec![t]);
    b.do_(mk);

    assert_eq!(
        lines(&run(b, SessionConfig::default())),
        ["type L, R: Mk, Mk", "Mk(true) : L"]
    );
}

#[test]
fn bindings_persist_across_runs() {
    let mut first = ProgramBuilder::new();
    first.int_list();
    let nil = first.tag("Nil", vec![]);
    first.let_("empty", nil);
    let (program, mut interner) = first.finish();

    let mut session = Session::new(SessionConfig::default(), &mut interner);
    let report = session.run(&program, &interner);
    assert!(!report.has_errors(), "{report}");
    assert!(session.context_dump(&interner).contains("  List/0\n"));

    let mut second = ProgramBuilder::with_interner(interner);
    let two = second.int(2);
    let empty = second.var("empty");
    let cons = second.tag("Cons", vec![two, empty]);
    second.do_(cons);
    let (program, interner) = second.finish();

    let report = session.run(&program, &interner);
    assert_eq!(lines(&report), ["Cons(2, empty) : List"]);
}

#[test]
fn config_is_kept_by_the_session() {
    let mut interner = kiln_ir::StringInterner::new();
    let config = SessionConfig::default().with_prelude(false);
    let session = Session::new(config.clone(), &mut interner);
    assert_eq!(session.config(), &config);
    assert!(session.checker().context().var_env().is_empty());
}
