//! Source-like rendering of expressions for report lines.

use std::fmt::Write as _;

use kiln_ir::{ExprArena, ExprId, ExprKind, MatchPattern, ParsedType, StringInterner};
use kiln_stack::ensure_sufficient_stack;

pub struct ExprPrinter<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
}

impl<'a> ExprPrinter<'a> {
    pub fn new(arena: &'a ExprArena, interner: &'a StringInterner) -> Self {
        ExprPrinter { arena, interner }
    }

    pub fn print(&self, expr: ExprId) -> String {
        let mut buf = String::new();
        self.print_into(expr, &mut buf);
        buf
    }

    fn print_into(&self, expr: ExprId, buf: &mut String) {
        ensure_sufficient_stack(|| self.print_expr(expr, buf));
    }

    fn print_expr(&self, expr: ExprId, buf: &mut String) {
        let name = |n| self.interner.lookup(n);
        match &self.arena.get_expr(expr).kind {
            ExprKind::Int(n) => {
                let _ = write!(buf, "{n}");
            }
            ExprKind::Double(d) => {
                let _ = write!(buf, "{d:?}");
            }
            ExprKind::Str(s) => {
                let _ = write!(buf, "{:?}", name(*s));
            }
            ExprKind::Char(c) => {
                let _ = write!(buf, "{c:?}");
            }
            ExprKind::Unit => buf.push_str("()"),
            ExprKind::Bool(b) => {
                let _ = write!(buf, "{b}");
            }
            ExprKind::Tag { name: tag, args } => {
                buf.push_str(name(*tag));
                buf.push('(');
                for (i, &arg) in args.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.print_into(arg, buf);
                }
                buf.push(')');
            }
            ExprKind::Var(v) => buf.push_str(name(*v)),
            ExprKind::Lambda {
                param,
                param_ty,
                body,
            } => {
                buf.push('(');
                buf.push_str(name(*param));
                if *param_ty != ParsedType::Infer {
                    buf.push_str(": ");
                    self.print_type(param_ty, buf);
                }
                buf.push_str(") -> ");
                self.print_into(*body, buf);
            }
            ExprKind::App { func, arg } => {
                if self.is_atomic_callee(*func) {
                    self.print_into(*func, buf);
                } else {
                    buf.push('(');
                    self.print_into(*func, buf);
                    buf.push(')');
                }
                buf.push('(');
                self.print_into(*arg, buf);
                buf.push(')');
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                buf.push_str("if ");
                self.print_into(*cond, buf);
                buf.push_str(" then ");
                self.print_into(*then_branch, buf);
                buf.push_str(" else ");
                self.print_into(*else_branch, buf);
            }
            ExprKind::Match {
                scrutinee,
                pattern,
                then_branch,
                else_branch,
            } => {
                buf.push_str("match ");
                self.print_into(*scrutinee, buf);
                buf.push_str(" as ");
                match self.arena.get_pat(*pattern) {
                    MatchPattern::Wildcard => buf.push('_'),
                    MatchPattern::Binding(n) => buf.push_str(name(n)),
                }
                buf.push_str(" then ");
                self.print_into(*then_branch, buf);
                buf.push_str(" else ");
                self.print_into(*else_branch, buf);
            }
            ExprKind::Let { name: n, value, body } => {
                buf.push_str("let ");
                buf.push_str(name(*n));
                buf.push_str(" = ");
                self.print_into(*value, buf);
                buf.push_str(" in ");
                self.print_into(*body, buf);
            }
        }
    }

    /// Callees that need no parentheses: names, tags and other calls.
    fn is_atomic_callee(&self, expr: ExprId) -> bool {
        matches!(
            self.arena.get_expr(expr).kind,
            ExprKind::Var(_) | ExprKind::Tag { .. } | ExprKind::App { .. }
        )
    }

    fn print_type(&self, ty: &ParsedType, buf: &mut String) {
        ensure_sufficient_stack(|| self.print_parsed_type(ty, buf));
    }

    fn print_parsed_type(&self, ty: &ParsedType, buf: &mut String) {
        match ty {
            ParsedType::Int => buf.push_str("Int"),
            ParsedType::Double => buf.push_str("Double"),
            ParsedType::Str => buf.push_str("String"),
            ParsedType::Char => buf.push_str("Char"),
            ParsedType::Unit => buf.push_str("Unit"),
            ParsedType::Bool => buf.push_str("Bool"),
            ParsedType::Fun(arg, ret) => {
                if matches!(**arg, ParsedType::Fun(..)) {
                    buf.push('(');
                    self.print_type(arg, buf);
                    buf.push(')');
                } else {
                    self.print_type(arg, buf);
                }
                buf.push_str(" -> ");
                self.print_type(ret, buf);
            }
            ParsedType::Named { name, args } => {
                buf.push_str(self.interner.lookup(*name));
                if !args.is_empty() {
                    buf.push('<');
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            buf.push_str(", ");
                        }
                        self.print_type(arg, buf);
                    }
                    buf.push('>');
                }
            }
            ParsedType::Infer => buf.push('_'),
        }
    }
}
