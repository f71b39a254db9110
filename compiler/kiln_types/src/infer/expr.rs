//! Expression inference: one rule per `ExprKind`.

use kiln_ir::{ExprArena, ExprId, ExprKind, Name, ParsedType, PatId};
use kiln_stack::ensure_sufficient_stack;

use super::{infer_pat, InferEngine};
use crate::resolve::{resolve_parsed_type, TypeParams};
use crate::{Idx, InferenceContext, TypeCheckError, TypeEnv, TypeScheme};

/// Check `expr_id` against `expected` in variable environment `env`.
///
/// `ctx` supplies the tag table; variables are looked up in `env` only.
/// Bindings made before a failure are kept.
#[tracing::instrument(level = "trace", skip(engine, arena, ctx, env))]
pub fn infer_expr(
    engine: &mut InferEngine<'_>,
    arena: &ExprArena,
    ctx: &InferenceContext,
    env: &TypeEnv,
    expr_id: ExprId,
    expected: Idx,
) -> Result<(), TypeCheckError> {
    ensure_sufficient_stack(|| infer_expr_inner(engine, arena, ctx, env, expr_id, expected))
}

fn infer_expr_inner(
    engine: &mut InferEngine<'_>,
    arena: &ExprArena,
    ctx: &InferenceContext,
    env: &TypeEnv,
    expr_id: ExprId,
    expected: Idx,
) -> Result<(), TypeCheckError> {
    engine.record_expr(expr_id, expected);

    match &arena.get_expr(expr_id).kind {
        // === Literals ===
        ExprKind::Int(_) => engine.unify_at(expected, Idx::INT, expr_id),
        ExprKind::Double(_) => engine.unify_at(expected, Idx::DOUBLE, expr_id),
        ExprKind::Str(_) => engine.unify_at(expected, Idx::STRING, expr_id),
        ExprKind::Char(_) => engine.unify_at(expected, Idx::CHAR, expr_id),
        ExprKind::Unit => engine.unify_at(expected, Idx::UNIT, expr_id),
        ExprKind::Bool(_) => engine.unify_at(expected, Idx::BOOL, expr_id),

        ExprKind::Tag { name, args } => {
            infer_tag(engine, arena, ctx, env, expr_id, *name, args, expected)
        }

        ExprKind::Var(name) => infer_var(engine, env, expr_id, *name, expected),

        ExprKind::Lambda {
            param,
            param_ty,
            body,
        } => infer_lambda(engine, arena, ctx, env, expr_id, *param, param_ty, *body, expected),

        ExprKind::App { func, arg } => {
            // The expected result is pushed into the function position.
            let arg_ty = engine.fresh_var();
            let fun_ty = engine.pool_mut().function(arg_ty, expected);
            infer_expr(engine, arena, ctx, env, *func, fun_ty)?;
            infer_expr(engine, arena, ctx, env, *arg, arg_ty)
        }

        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            infer_expr(engine, arena, ctx, env, *cond, Idx::BOOL)?;
            infer_expr(engine, arena, ctx, env, *then_branch, expected)?;
            infer_expr(engine, arena, ctx, env, *else_branch, expected)
        }

        ExprKind::Match {
            scrutinee,
            pattern,
            then_branch,
            else_branch,
        } => infer_match(
            engine,
            arena,
            ctx,
            env,
            expr_id,
            MatchParts {
                scrutinee: *scrutinee,
                pattern: *pattern,
                then_branch: *then_branch,
                else_branch: *else_branch,
            },
            expected,
        ),

        ExprKind::Let { name, value, body } => {
            let value_ty = engine.fresh_var();
            infer_expr(engine, arena, ctx, env, *value, value_ty)?;
            let scheme = engine.unify_engine().generalize(env, value_ty);
            tracing::trace!(bounded = scheme.bounded().len(), "generalized local let");
            let inner = env.prepend(*name, scheme);
            infer_expr(engine, arena, ctx, &inner, *body, expected)
        }
    }
}

#[expect(clippy::too_many_arguments, reason = "matches ExprKind::Tag structure")]
fn infer_tag(
    engine: &mut InferEngine<'_>,
    arena: &ExprArena,
    ctx: &InferenceContext,
    env: &TypeEnv,
    expr_id: ExprId,
    name: Name,
    args: &[ExprId],
    expected: Idx,
) -> Result<(), TypeCheckError> {
    let Some(tag) = ctx.lookup_tag(name) else {
        return Err(TypeCheckError::undefined_tag(expr_id, name));
    };
    let tag = engine.unify_engine().instantiate_tag(tag);
    engine.record_tag_index(expr_id, tag.index);

    if args.len() != tag.arity() {
        return Err(TypeCheckError::tag_arity(expr_id, name, tag.arity(), args.len()));
    }
    for (&arg, &arg_ty) in args.iter().zip(&tag.arg_types) {
        infer_expr(engine, arena, ctx, env, arg, arg_ty)?;
    }
    engine.unify_at(expected, tag.result_type, expr_id)
}

fn infer_var(
    engine: &mut InferEngine<'_>,
    env: &TypeEnv,
    expr_id: ExprId,
    name: Name,
    expected: Idx,
) -> Result<(), TypeCheckError> {
    let Some(scheme) = env.lookup(name) else {
        return Err(TypeCheckError::undefined_variable(expr_id, name));
    };
    let instance = engine.unify_engine().instantiate(scheme);
    let slot = engine.fresh_var();
    engine.record_var_slot(expr_id, slot);
    engine.unify_at(slot, instance, expr_id)?;
    engine.unify_at(expected, instance, expr_id)
}

#[expect(clippy::too_many_arguments, reason = "matches ExprKind::Lambda structure")]
fn infer_lambda(
    engine: &mut InferEngine<'_>,
    arena: &ExprArena,
    ctx: &InferenceContext,
    env: &TypeEnv,
    expr_id: ExprId,
    param: Name,
    param_ty: &ParsedType,
    body: ExprId,
    expected: Idx,
) -> Result<(), TypeCheckError> {
    let param_ty = resolve_parsed_type(engine.pool_mut(), param_ty, &TypeParams::default());
    let inner = env.prepend(param, TypeScheme::mono(param_ty));
    let ret_ty = engine.fresh_var();
    infer_expr(engine, arena, ctx, &inner, body, ret_ty)?;
    let fun_ty = engine.pool_mut().function(param_ty, ret_ty);
    engine.unify_at(expected, fun_ty, expr_id)
}

struct MatchParts {
    scrutinee: ExprId,
    pattern: PatId,
    then_branch: ExprId,
    else_branch: ExprId,
}

fn infer_match(
    engine: &mut InferEngine<'_>,
    arena: &ExprArena,
    ctx: &InferenceContext,
    env: &TypeEnv,
    expr_id: ExprId,
    parts: MatchParts,
    expected: Idx,
) -> Result<(), TypeCheckError> {
    let scrutinee_ty = engine.fresh_var();
    let bindings = infer_pat(engine, arena, expr_id, parts.pattern, scrutinee_ty)?;
    // Pattern bindings are not visible in the scrutinee or the else branch.
    infer_expr(engine, arena, ctx, env, parts.scrutinee, scrutinee_ty)?;
    let then_env = bindings.append(env);
    infer_expr(engine, arena, ctx, &then_env, parts.then_branch, expected)?;
    infer_expr(engine, arena, ctx, env, parts.else_branch, expected)
}
