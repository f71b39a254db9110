//! Intermediate representation consumed by the Kiln type checker.
//!
//! A parser collaborator builds a [`Program`] through [`ExprArena`] and
//! [`StringInterner`]; nothing in this crate knows about types beyond the
//! surface syntax in [`ParsedType`].
//!
//! Expressions are flat: children are [`ExprId`] handles into the arena
//! rather than boxed nodes, so inference results can be stored in side
//! tables keyed by id.

mod arena;
mod ast;
mod expr_id;
mod interner;
mod name;
mod parsed_type;
mod program;

pub use arena::ExprArena;
pub use ast::{Expr, ExprKind, MatchPattern};
pub use expr_id::{ExprId, PatId};
pub use interner::StringInterner;
pub use name::Name;
pub use parsed_type::ParsedType;
pub use program::{Program, TagDecl, TopForm, TypeDef, TypeDefItem};
