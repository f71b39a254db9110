//! Pattern inference.
//!
//! Only wildcard and binding patterns exist. Each gets its own slot,
//! unified with the scrutinee type. Bindings are monomorphic.

use kiln_ir::{ExprArena, ExprId, MatchPattern, PatId};

use super::InferEngine;
use crate::{Idx, TypeCheckError, TypeEnv, TypeScheme};

/// Check `pat_id` against `scrutinee`, returning the bindings it introduces.
///
/// Failures are attributed to the enclosing `match` expression `owner`.
pub fn infer_pat(
    engine: &mut InferEngine<'_>,
    arena: &ExprArena,
    owner: ExprId,
    pat_id: PatId,
    scrutinee: Idx,
) -> Result<TypeEnv, TypeCheckError> {
    let slot = engine.fresh_var();
    engine.record_pat(pat_id, slot);
    engine.unify_at(slot, scrutinee, owner)?;

    Ok(match arena.get_pat(pat_id) {
        MatchPattern::Wildcard => TypeEnv::new(),
        MatchPattern::Binding(name) => TypeEnv::new().prepend(name, TypeScheme::mono(scrutinee)),
    })
}
