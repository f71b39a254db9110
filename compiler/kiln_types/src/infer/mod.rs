//! Algorithm M inference over one expression tree.
//!
//! # Architecture
//!
//! `InferEngine` wraps `UnifyEngine` and adds the per-node side tables
//! (`ExprTypes`) that stand in for type slots on AST nodes:
//!
//! ```text
//! InferEngine
//! ├── UnifyEngine (unification, generalization, instantiation)
//! │   └── Pool
//! └── ExprTypes
//!     ├── exprs       ExprId → type the node was checked against
//!     ├── var_slots   ExprId → a variable reference's own slot
//!     ├── tag_indices ExprId → declared index of the constructed tag
//!     └── pats        PatId  → pattern type
//! ```
//!
//! Every rule pushes the expected type down into sub-expressions and
//! unifies at the leaves; nothing is synthesized bottom-up.

mod expr;
mod pattern;

pub use expr::infer_expr;
pub use pattern::infer_pat;

use kiln_ir::{ExprId, PatId};
use rustc_hash::FxHashMap;

use crate::{Idx, Pool, TypeCheckError, TypeErrorKind, UnifyEngine};

/// Types recorded for the nodes of one form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExprTypes {
    exprs: FxHashMap<ExprId, Idx>,
    var_slots: FxHashMap<ExprId, Idx>,
    tag_indices: FxHashMap<ExprId, usize>,
    pats: FxHashMap<PatId, Idx>,
}

impl ExprTypes {
    /// Type an expression was checked against.
    pub fn expr_type(&self, expr: ExprId) -> Option<Idx> {
        self.exprs.get(&expr).copied()
    }

    /// Own slot of a variable reference, unified with its instance.
    pub fn var_slot(&self, expr: ExprId) -> Option<Idx> {
        self.var_slots.get(&expr).copied()
    }

    /// Declared index of the tag a construction expression builds.
    pub fn tag_index(&self, expr: ExprId) -> Option<usize> {
        self.tag_indices.get(&expr).copied()
    }

    pub fn pat_type(&self, pat: PatId) -> Option<Idx> {
        self.pats.get(&pat).copied()
    }

    /// Number of expressions with a recorded type.
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

/// The inference engine for one top-level form.
pub struct InferEngine<'pool> {
    unify: UnifyEngine<'pool>,
    types: ExprTypes,
}

impl<'pool> InferEngine<'pool> {
    pub fn new(pool: &'pool mut Pool) -> Self {
        Self {
            unify: UnifyEngine::new(pool),
            types: ExprTypes::default(),
        }
    }

    // ========================================
    // Pool Access
    // ========================================

    #[inline]
    pub fn pool(&self) -> &Pool {
        self.unify.pool()
    }

    #[inline]
    pub fn pool_mut(&mut self) -> &mut Pool {
        self.unify.pool_mut()
    }

    #[inline]
    pub fn unify_engine(&mut self) -> &mut UnifyEngine<'pool> {
        &mut self.unify
    }

    #[inline]
    pub fn fresh_var(&mut self) -> Idx {
        self.unify.fresh_var()
    }

    /// Recorded types so far, unresolved.
    pub fn types(&self) -> &ExprTypes {
        &self.types
    }

    // ========================================
    // Unification
    // ========================================

    /// Unify, attributing a failure to `expr`.
    pub fn unify_at(&mut self, expected: Idx, found: Idx, expr: ExprId) -> Result<(), TypeCheckError> {
        self.unify
            .unify(expected, found)
            .map_err(|err| TypeErrorKind::from(err).at(expr))
    }

    // ========================================
    // Side Tables
    // ========================================

    pub(crate) fn record_expr(&mut self, expr: ExprId, ty: Idx) {
        self.types.exprs.insert(expr, ty);
    }

    pub(crate) fn record_var_slot(&mut self, expr: ExprId, ty: Idx) {
        self.types.var_slots.insert(expr, ty);
    }

    pub(crate) fn record_tag_index(&mut self, expr: ExprId, index: usize) {
        self.types.tag_indices.insert(expr, index);
    }

    pub(crate) fn record_pat(&mut self, pat: PatId, ty: Idx) {
        self.types.pats.insert(pat, ty);
    }

    /// Consume the engine, returning the side tables with every type
    /// resolved through its bindings.
    pub fn finish(mut self) -> ExprTypes {
        let mut types = std::mem::take(&mut self.types);
        self.unify.resolve_deep_all(
            types
                .exprs
                .values_mut()
                .chain(types.var_slots.values_mut())
                .chain(types.pats.values_mut()),
        );
        types
    }
}
