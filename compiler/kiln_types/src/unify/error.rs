//! Unification error types.

use thiserror::Error;

use crate::{Idx, VarId};

/// Error from type unification.
///
/// The types carried are the subterms where unification actually failed,
/// already resolved through variable bindings.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum UnifyError {
    /// Incompatible shapes, primitive kinds, user type names or arities.
    #[error("type mismatch")]
    Mismatch {
        /// The type required by context.
        expected: Idx,
        /// The type actually found.
        found: Idx,
    },

    /// Occurs check failed: binding `var` to `containing` would build an
    /// infinite type.
    #[error("infinite type: variable {var:?} occurs in its own definition")]
    InfiniteType { var: VarId, containing: Idx },
}
