//! Type unification engine.
//!
//! Variables are solved by linking them to the type they were unified with.
//! Links are write-once and never compressed, so a variable's binding chain
//! only ever grows at its unbound end. The occurs check keeps chains
//! acyclic.
//!
//! # Usage
//!
//! ```ignore
//! let mut pool = Pool::new();
//! let mut engine = UnifyEngine::new(&mut pool);
//!
//! let var = engine.fresh_var();
//! engine.unify(var, Idx::INT)?;
//! assert_eq!(engine.resolve(var), Idx::INT);
//! ```

mod error;
mod poly;

pub use error::UnifyError;

use kiln_stack::ensure_sufficient_stack;

use crate::{Idx, Kind, Pool, VarId, VarState};

/// The unification engine.
///
/// Borrows the pool mutably for the duration of one inference session.
pub struct UnifyEngine<'pool> {
    pool: &'pool mut Pool,
}

impl<'pool> UnifyEngine<'pool> {
    pub fn new(pool: &'pool mut Pool) -> Self {
        Self { pool }
    }

    /// Create a fresh unbound type variable.
    #[inline]
    pub fn fresh_var(&mut self) -> Idx {
        self.pool.fresh_var()
    }

    #[inline]
    pub fn pool(&self) -> &Pool {
        self.pool
    }

    #[inline]
    pub fn pool_mut(&mut self) -> &mut Pool {
        self.pool
    }

    /// Resolve a type by following links.
    #[inline]
    pub fn resolve(&self, idx: Idx) -> Idx {
        self.pool.resolve(idx)
    }

    // ========================================
    // Unification
    // ========================================

    /// Unify two types, making them equivalent.
    ///
    /// `expected` and `found` only decide how a mismatch is reported; the
    /// outcome and the bindings made do not depend on argument order. When
    /// both sides are distinct unbound variables the younger one (higher id)
    /// is linked to the older one.
    ///
    /// On failure, bindings already made for earlier subterms stay in place.
    pub fn unify(&mut self, expected: Idx, found: Idx) -> Result<(), UnifyError> {
        ensure_sufficient_stack(|| self.unify_inner(expected, found))
    }

    fn unify_inner(&mut self, expected: Idx, found: Idx) -> Result<(), UnifyError> {
        // Hash-consing makes identical structure identical indices
        if expected == found {
            return Ok(());
        }

        let a = self.pool.resolve(expected);
        let b = self.pool.resolve(found);
        if a == b {
            return Ok(());
        }

        tracing::trace!(
            expected = ?a,
            found = ?b,
            "unify"
        );

        match (self.pool.kind(a), self.pool.kind(b)) {
            (Kind::Var, Kind::Var) => {
                let (va, vb) = (self.pool.var_id(a), self.pool.var_id(b));
                if va < vb {
                    self.bind(vb, a)
                } else {
                    self.bind(va, b)
                }
            }
            (Kind::Var, _) => self.bind(self.pool.var_id(a), b),
            (_, Kind::Var) => self.bind(self.pool.var_id(b), a),
            _ => self.unify_structural(a, b),
        }
    }

    /// Link an unbound variable to `ty` after the occurs check.
    fn bind(&mut self, var: VarId, ty: Idx) -> Result<(), UnifyError> {
        if self.occurs(var, ty) {
            return Err(UnifyError::InfiniteType {
                var,
                containing: ty,
            });
        }
        tracing::trace!(var = ?var, ty = ?ty, "bind");
        self.pool.link_var(var, ty);
        Ok(())
    }

    /// Unify two resolved, non-variable types.
    fn unify_structural(&mut self, a: Idx, b: Idx) -> Result<(), UnifyError> {
        let mismatch = || UnifyError::Mismatch {
            expected: a,
            found: b,
        };

        match (self.pool.kind(a), self.pool.kind(b)) {
            (Kind::Fun, Kind::Fun) => {
                let (arg_a, arg_b) = (self.pool.fun_arg(a), self.pool.fun_arg(b));
                let (ret_a, ret_b) = (self.pool.fun_ret(a), self.pool.fun_ret(b));
                self.unify(arg_a, arg_b)?;
                self.unify(ret_a, ret_b)
            }

            (Kind::User, Kind::User) => {
                if self.pool.user_name(a) != self.pool.user_name(b) {
                    return Err(mismatch());
                }
                let args_a = self.pool.user_args(a);
                let args_b = self.pool.user_args(b);
                if args_a.len() != args_b.len() {
                    return Err(mismatch());
                }
                for (&x, &y) in args_a.iter().zip(args_b.iter()) {
                    self.unify(x, y)?;
                }
                Ok(())
            }

            // Primitives are pre-interned, so equal kinds were caught by
            // index equality in `unify`.
            (ka, kb) if ka.is_primitive() && ka == kb => Ok(()),

            _ => Err(mismatch()),
        }
    }

    // ========================================
    // Occurs Check
    // ========================================

    /// Check if variable `var` occurs in `ty`, looking through bindings.
    ///
    /// Types built without any variable are skipped without traversal.
    pub fn occurs(&self, var: VarId, ty: Idx) -> bool {
        if !self.pool.flags(ty).has_vars() {
            return false;
        }
        ensure_sufficient_stack(|| self.occurs_inner(var, ty))
    }

    fn occurs_inner(&self, var: VarId, ty: Idx) -> bool {
        match self.pool.kind(ty) {
            Kind::Var => {
                let other = self.pool.var_id(ty);
                if other == var {
                    return true;
                }
                match self.pool.var_state(other) {
                    VarState::Link { target } => self.occurs(var, target),
                    VarState::Unbound => false,
                }
            }
            Kind::Fun => {
                self.occurs(var, self.pool.fun_arg(ty)) || self.occurs(var, self.pool.fun_ret(ty))
            }
            Kind::User => self
                .pool
                .user_args(ty)
                .iter()
                .any(|&arg| self.occurs(var, arg)),
            Kind::Int | Kind::Double | Kind::String | Kind::Char | Kind::Unit | Kind::Bool => false,
        }
    }
}
