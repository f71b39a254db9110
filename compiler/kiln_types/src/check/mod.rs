//! Top-level driver: checks a program's forms in declaration order.
//!
//! The checker owns the pool and the running [`InferenceContext`]. A form
//! that fails leaves the context as it was before the form, so a caller may
//! keep going with the next one. Variable bindings made before the failure
//! are not rolled back.

use kiln_ir::{ExprArena, ExprId, Name, Program, StringInterner, TopForm, TypeDef};

use crate::infer::{infer_expr, ExprTypes, InferEngine};
use crate::{build_catalogue, Idx, InferenceContext, Pool, TypeCheckError, TypeScheme};

/// What checking one form produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormOutcome {
    /// A type definition registered these types and tags, in declaration
    /// order.
    TypeDefined { types: Vec<Name>, tags: Vec<Name> },
    /// An executable form and its fully resolved type.
    Evaluated { expr: ExprId, ty: Idx },
    /// A top-level `let` and the scheme it was generalized to.
    Bound { name: Name, scheme: TypeScheme },
}

/// A successfully checked form with the resolved types of its nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckedForm {
    pub outcome: FormOutcome,
    pub types: ExprTypes,
}

pub struct Checker {
    pool: Pool,
    ctx: InferenceContext,
}

impl Checker {
    /// A checker with an empty context.
    pub fn new() -> Self {
        Checker {
            pool: Pool::new(),
            ctx: InferenceContext::new(),
        }
    }

    /// A checker whose context starts with the arithmetic prelude.
    pub fn with_prelude(interner: &mut StringInterner) -> Self {
        let mut pool = Pool::new();
        let ctx = InferenceContext::with_prelude(&mut pool, interner);
        Checker { pool, ctx }
    }

    #[inline]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    #[inline]
    pub fn context(&self) -> &InferenceContext {
        &self.ctx
    }

    /// Check every form in order, stopping at the first failure.
    pub fn check_program(&mut self, program: &Program) -> Result<Vec<CheckedForm>, TypeCheckError> {
        program
            .forms
            .iter()
            .map(|form| self.check_form(&program.arena, form))
            .collect()
    }

    /// Check one form against the running context, extending it on success.
    #[tracing::instrument(level = "debug", skip_all, fields(form = form_kind(form)))]
    pub fn check_form(
        &mut self,
        arena: &ExprArena,
        form: &TopForm,
    ) -> Result<CheckedForm, TypeCheckError> {
        match form {
            TopForm::TypeDef(def) => Ok(self.define_types(def)),
            TopForm::Do(expr) => self.evaluate(arena, *expr),
            TopForm::Let { name, value } => self.bind(arena, *name, *value),
        }
    }

    fn define_types(&mut self, def: &TypeDef) -> CheckedForm {
        let catalogue = build_catalogue(&mut self.pool, def);
        self.ctx = self.ctx.with_catalogue(&catalogue);
        let types = catalogue.type_names();
        let tags = catalogue.tag_names();
        tracing::debug!(types = types.len(), tags = tags.len(), "registered type definition");
        CheckedForm {
            outcome: FormOutcome::TypeDefined { types, tags },
            types: ExprTypes::default(),
        }
    }

    fn evaluate(&mut self, arena: &ExprArena, expr: ExprId) -> Result<CheckedForm, TypeCheckError> {
        let mut engine = InferEngine::new(&mut self.pool);
        let result = engine.fresh_var();
        infer_expr(&mut engine, arena, &self.ctx, self.ctx.var_env(), expr, result)?;
        let ty = engine.unify_engine().resolve_deep(result);
        let types = engine.finish();
        tracing::debug!(?ty, "evaluated form checked");
        Ok(CheckedForm {
            outcome: FormOutcome::Evaluated { expr, ty },
            types,
        })
    }

    fn bind(
        &mut self,
        arena: &ExprArena,
        name: Name,
        value: ExprId,
    ) -> Result<CheckedForm, TypeCheckError> {
        let mut engine = InferEngine::new(&mut self.pool);
        let value_ty = engine.fresh_var();
        let env = self.ctx.var_env();
        infer_expr(&mut engine, arena, &self.ctx, env, value, value_ty)?;
        let resolved = engine.unify_engine().resolve_deep(value_ty);
        let scheme = engine.unify_engine().generalize(env, resolved);
        let types = engine.finish();
        tracing::debug!(bounded = scheme.bounded().len(), "generalized top-level let");

        self.ctx = self.ctx.with_binding(name, scheme.clone());
        Ok(CheckedForm {
            outcome: FormOutcome::Bound { name, scheme },
            types,
        })
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

fn form_kind(form: &TopForm) -> &'static str {
    match form {
        TopForm::TypeDef(_) => "type",
        TopForm::Do(_) => "do",
        TopForm::Let { .. } => "let",
    }
}
