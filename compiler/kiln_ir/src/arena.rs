//! Flat storage for expressions and patterns.

use crate::{Expr, ExprId, ExprKind, MatchPattern, PatId};

/// Owns every expression and pattern of a program.
///
/// Ids are dense and allocation order is preserved, so a child is always
/// allocated before the parent that references it.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    patterns: Vec<MatchPattern>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression and return its id.
    pub fn alloc_expr(&mut self, kind: ExprKind) -> ExprId {
        let id = ExprId::new(Self::next_index(self.exprs.len()));
        self.exprs.push(Expr::new(kind));
        id
    }

    /// Allocate a pattern and return its id.
    pub fn alloc_pat(&mut self, pattern: MatchPattern) -> PatId {
        let id = PatId::new(Self::next_index(self.patterns.len()));
        self.patterns.push(pattern);
        id
    }

    /// Get an expression by id.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Get a pattern by id.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[inline]
    pub fn get_pat(&self, id: PatId) -> MatchPattern {
        self.patterns[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn pat_count(&self) -> usize {
        self.patterns.len()
    }

    fn next_index(len: usize) -> u32 {
        u32::try_from(len).unwrap_or_else(|_| panic!("expression arena exceeded {} nodes", u32::MAX))
    }
}
