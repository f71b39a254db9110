//! Shared test utilities for phase tests.

#![allow(
    dead_code,
    reason = "each phase module uses a different subset of the builder"
)]

use kiln_diagnostic::ErrorCode;
use kiln_ir::{
    ExprArena, ExprId, ExprKind, MatchPattern, Name, ParsedType, Program, StringInterner, TagDecl,
    TopForm, TypeDef, TypeDefItem,
};
use kilnc::{Report, ReportEntry, Session, SessionConfig};

/// Builds a program form by form, interning names as it goes.
pub struct ProgramBuilder {
    pub interner: StringInterner,
    arena: ExprArena,
    forms: Vec<TopForm>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::with_interner(StringInterner::new())
    }

    /// Continue with names from an earlier program.
    pub fn with_interner(interner: StringInterner) -> Self {
        ProgramBuilder {
            interner,
            arena: ExprArena::new(),
            forms: Vec::new(),
        }
    }

    pub fn name(&mut self, s: &str) -> Name {
        self.interner.intern(s)
    }

    // -- Expressions --

    pub fn int(&mut self, n: i64) -> ExprId {
        self.arena.alloc_expr(ExprKind::Int(n))
    }

    pub fn bool(&mut self, b: bool) -> ExprId {
        self.arena.alloc_expr(ExprKind::Bool(b))
    }

    pub fn string(&mut self, s: &str) -> ExprId {
        let s = self.name(s);
        self.arena.alloc_expr(ExprKind::Str(s))
    }

    pub fn var(&mut self, s: &str) -> ExprId {
        let name = self.name(s);
        self.arena.alloc_expr(ExprKind::Var(name))
    }

    /// `(param) -> body`
    pub fn lambda(&mut self, param: &str, body: ExprId) -> ExprId {
        self.lambda_typed(param, ParsedType::Infer, body)
    }

    /// `(param: ty) -> body`
    pub fn lambda_typed(&mut self, param: &str, param_ty: ParsedType, body: ExprId) -> ExprId {
        let param = self.name(param);
        self.arena.alloc_expr(ExprKind::Lambda {
            param,
            param_ty,
            body,
        })
    }

    pub fn app(&mut self, func: ExprId, arg: ExprId) -> ExprId {
        self.arena.alloc_expr(ExprKind::App { func, arg })
    }

    /// `op(lhs)(rhs)`, the desugaring of `lhs op rhs`.
    pub fn binop(&mut self, op: &str, lhs: ExprId, rhs: ExprId) -> ExprId {
        let op = self.var(op);
        let partial = self.app(op, lhs);
        self.app(partial, rhs)
    }

    pub fn tag(&mut self, s: &str, args: Vec<ExprId>) -> ExprId {
        let name = self.name(s);
        self.arena.alloc_expr(ExprKind::Tag { name, args })
    }

    pub fn if_(&mut self, cond: ExprId, then_branch: ExprId, else_branch: ExprId) -> ExprId {
        self.arena.alloc_expr(ExprKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    /// `match scrutinee as binding then … else …`; `None` is `_`.
    pub fn match_(
        &mut self,
        scrutinee: ExprId,
        binding: Option<&str>,
        then_branch: ExprId,
        else_branch: ExprId,
    ) -> ExprId {
        let pattern = match binding {
            Some(s) => MatchPattern::Binding(self.name(s)),
            None => MatchPattern::Wildcard,
        };
        let pattern = self.arena.alloc_pat(pattern);
        self.arena.alloc_expr(ExprKind::Match {
            scrutinee,
            pattern,
            then_branch,
            else_branch,
        })
    }

    pub fn let_in(&mut self, s: &str, value: ExprId, body: ExprId) -> ExprId {
        let name = self.name(s);
        self.arena.alloc_expr(ExprKind::Let { name, value, body })
    }

    // -- Types --

    pub fn named(&mut self, s: &str) -> ParsedType {
        ParsedType::named(self.name(s))
    }

    /// One type item: `name<params…> = tag(args…) | …`.
    pub fn item(
        &mut self,
        name: &str,
        params: &[&str],
        tags: Vec<(&str, Vec<ParsedType>)>,
    ) -> TypeDefItem {
        TypeDefItem {
            name: self.name(name),
            params: params.iter().map(|p| self.interner.intern(p)).collect(),
            tags: tags
                .into_iter()
                .map(|(tag, args)| TagDecl {
                    name: self.interner.intern(tag),
                    args,
                })
                .collect(),
        }
    }

    // -- Forms --

    pub fn type_def(&mut self, items: Vec<TypeDefItem>) {
        self.forms.push(TopForm::TypeDef(TypeDef { items }));
    }

    /// `type List = Nil() | Cons(Int, List)`
    pub fn int_list(&mut self) {
        let list = self.named("List");
        let item = self.item(
            "List",
            &[],
            vec![("Nil", vec![]), ("Cons", vec![ParsedType::Int, list])],
        );
        self.type_def(vec![item]);
    }

    /// `type Option<a> = None() | Some(a)`
    pub fn option(&mut self) {
        let a = self.named("a");
        let item = self.item("Option", &["a"], vec![("None", vec![]), ("Some", vec![a])]);
        self.type_def(vec![item]);
    }

    pub fn do_(&mut self, expr: ExprId) {
        self.forms.push(TopForm::Do(expr));
    }

    pub fn let_(&mut self, s: &str, value: ExprId) {
        let name = self.name(s);
        self.forms.push(TopForm::Let { name, value });
    }

    pub fn finish(self) -> (Program, StringInterner) {
        (Program::new(self.arena, self.forms), self.interner)
    }
}

/// Run a fresh session over the builder's program.
pub fn run(builder: ProgramBuilder, config: SessionConfig) -> Report {
    let (program, mut interner) = builder.finish();
    let mut session = Session::new(config, &mut interner);
    session.run(&program, &interner)
}

/// Rendered report lines.
pub fn lines(report: &Report) -> Vec<String> {
    report.entries.iter().map(ToString::to_string).collect()
}

/// Error codes of every failed form, in order.
pub fn error_codes(report: &Report) -> Vec<ErrorCode> {
    report.diagnostics().map(|d| d.code).collect()
}

/// The single failure of a report.
pub fn only_failure(report: &Report) -> &kiln_diagnostic::Diagnostic {
    let failures: Vec<_> = report.diagnostics().collect();
    assert_eq!(failures.len(), 1, "expected exactly one failure: {report}");
    failures[0]
}

/// Whether the last entry is a failure.
pub fn ends_in_failure(report: &Report) -> bool {
    matches!(report.entries.last(), Some(ReportEntry::Failed(_)))
}
