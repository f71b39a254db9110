//! Expression and pattern nodes.

use crate::{ExprId, Name, ParsedType, PatId};

/// An expression node. Children are referenced by id.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr { kind }
    }
}

/// The closed set of expression forms the checker understands.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Double(f64),
    /// String literal, interned.
    Str(Name),
    Char(char),
    Unit,
    Bool(bool),

    /// Tag construction: `Name(args…)`.
    Tag { name: Name, args: Vec<ExprId> },

    /// Variable reference.
    Var(Name),

    /// `(param: param_ty) -> body`. `param_ty` is [`ParsedType::Infer`] when
    /// the parameter has no annotation.
    Lambda {
        param: Name,
        param_ty: ParsedType,
        body: ExprId,
    },

    /// Single-argument application `func(arg)`.
    App { func: ExprId, arg: ExprId },

    If {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },

    /// Guarded match: `match scrutinee as pattern then … else …`.
    ///
    /// Bindings introduced by `pattern` are visible in `then_branch` only.
    Match {
        scrutinee: ExprId,
        pattern: PatId,
        then_branch: ExprId,
        else_branch: ExprId,
    },

    /// `let name = value in body`. `name` is generalized before `body`.
    Let {
        name: Name,
        value: ExprId,
        body: ExprId,
    },
}

/// Pattern forms.
///
/// Only wildcard and binding patterns exist today. Constructor and literal
/// patterns would be added here; every consumer matches exhaustively.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MatchPattern {
    /// `_`
    Wildcard,
    /// `x`: binds the scrutinee monomorphically.
    Binding(Name),
}
