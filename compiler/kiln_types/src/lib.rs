//! Type inference for Kiln.
//!
//! Algorithm M Hindley–Milner inference over a small functional language
//! with user-defined variant types ("tags"):
//! - `Pool`: every type is a 32-bit `Idx`; primitives pre-interned,
//!   compound types hash-consed, variables bound write-once
//! - `UnifyEngine`: structural unification with occurs check, plus
//!   generalization and instantiation
//! - `build_catalogue`: turns a type definition into arity and tag tables
//! - `infer_expr`: pushes an expected type down through an expression
//! - `Checker`: checks a program's forms in order against a running
//!   `InferenceContext`

mod catalogue;
mod check;
mod context;
mod env;
mod error;
mod flags;
mod idx;
pub mod infer;
mod kind;
mod pool;
mod resolve;
mod scheme;
mod unify;

pub use catalogue::{build_catalogue, Catalogue, Tag};
pub use check::{CheckedForm, Checker, FormOutcome};
pub use context::{InferenceContext, PRELUDE_OPERATORS};
pub use env::{Env, Iter as EnvIter, TypeEnv};
pub use error::{TypeCheckError, TypeErrorKind};
pub use flags::TypeFlags;
pub use idx::Idx;
pub use infer::{ExprTypes, InferEngine};
pub use kind::Kind;
pub use pool::{Pool, TypeFormatter, VarId, VarState};
pub use resolve::{resolve_parsed_type, TypeParams};
pub use scheme::TypeScheme;
pub use unify::{UnifyEngine, UnifyError};

// Handles are copied everywhere; keep them one word.
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Idx, VarId};
    const _: () = assert!(std::mem::size_of::<Idx>() == 4);
    const _: () = assert!(std::mem::size_of::<VarId>() == 4);
}
