//! Errors raised while checking one top-level form.
//!
//! Every error aborts the form it occurs in. Bindings made before the
//! failure stay in the pool.

use kiln_diagnostic::{Diagnostic, ErrorCode};
use kiln_ir::{ExprId, Name, StringInterner};
use thiserror::Error;

use crate::{Pool, TypeFormatter, UnifyError};

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TypeErrorKind {
    #[error(transparent)]
    Unify(#[from] UnifyError),

    #[error("undefined tag")]
    UndefinedTag { name: Name },

    #[error("tag expects {expected} argument(s) but {found} were supplied")]
    TagArityMismatch {
        tag: Name,
        expected: usize,
        found: usize,
    },

    #[error("undefined variable")]
    UndefinedVariable { name: Name },
}

/// A type error, tagged with the expression being checked when it occurred.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind}")]
pub struct TypeCheckError {
    pub kind: TypeErrorKind,
    pub expr: Option<ExprId>,
}

impl TypeCheckError {
    pub fn undefined_tag(expr: ExprId, name: Name) -> Self {
        TypeErrorKind::UndefinedTag { name }.at(expr)
    }

    pub fn undefined_variable(expr: ExprId, name: Name) -> Self {
        TypeErrorKind::UndefinedVariable { name }.at(expr)
    }

    pub fn tag_arity(expr: ExprId, tag: Name, expected: usize, found: usize) -> Self {
        TypeErrorKind::TagArityMismatch {
            tag,
            expected,
            found,
        }
        .at(expr)
    }

    /// Diagnostic code for this error.
    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            TypeErrorKind::Unify(UnifyError::Mismatch { .. }) => ErrorCode::E2001,
            TypeErrorKind::Unify(UnifyError::InfiniteType { .. }) => ErrorCode::E2005,
            TypeErrorKind::UndefinedVariable { .. } => ErrorCode::E2003,
            TypeErrorKind::TagArityMismatch { .. } => ErrorCode::E2004,
            TypeErrorKind::UndefinedTag { .. } => ErrorCode::E2006,
        }
    }

    /// Render as a user-facing diagnostic.
    ///
    /// Types are printed as they stand in `pool`, so bindings made after the
    /// failure show up in the message.
    pub fn to_diagnostic(&self, pool: &Pool, interner: &StringInterner) -> Diagnostic {
        let fmt = TypeFormatter::new(pool, interner);
        let diag = Diagnostic::error(self.code());
        let diag = match &self.kind {
            TypeErrorKind::Unify(UnifyError::Mismatch { expected, found }) => diag
                .with_message(format!(
                    "type mismatch: expected `{}`, found `{}`",
                    fmt.format(*expected),
                    fmt.format(*found)
                )),
            TypeErrorKind::Unify(UnifyError::InfiniteType { var, containing }) => diag
                .with_message(format!(
                    "infinite type: `{var:?}` occurs in `{}`",
                    fmt.format(*containing)
                ))
                .with_note("a type variable cannot be bound to a type containing itself"),
            TypeErrorKind::UndefinedTag { name } => {
                diag.with_message(format!("undefined tag `{}`", interner.lookup(*name)))
            }
            TypeErrorKind::TagArityMismatch {
                tag,
                expected,
                found,
            } => diag
                .with_message(format!(
                    "tag `{}` expects {expected} argument{} but {found} {} supplied",
                    interner.lookup(*tag),
                    if *expected == 1 { "" } else { "s" },
                    if *found == 1 { "was" } else { "were" },
                ))
                .with_note(format!(
                    "`{}` is declared with {expected} argument type{}",
                    interner.lookup(*tag),
                    if *expected == 1 { "" } else { "s" },
                )),
            TypeErrorKind::UndefinedVariable { name } => {
                diag.with_message(format!("undefined variable `{}`", interner.lookup(*name)))
            }
        };
        match self.expr {
            Some(expr) => diag.with_note(format!("while checking expression #{}", expr.raw())),
            None => diag,
        }
    }
}

impl TypeErrorKind {
    pub fn at(self, expr: ExprId) -> TypeCheckError {
        TypeCheckError {
            kind: self,
            expr: Some(expr),
        }
    }
}

impl From<UnifyError> for TypeCheckError {
    fn from(err: UnifyError) -> Self {
        TypeCheckError {
            kind: TypeErrorKind::Unify(err),
            expr: None,
        }
    }
}
