//! Let-polymorphism: free variables, generalization and instantiation.
//!
//! Generalization is environment-based: a variable is quantified when it is
//! free in the candidate type and not free anywhere in the environment the
//! type was inferred in.

use std::collections::BTreeSet;

use kiln_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::UnifyEngine;
use crate::{Idx, Kind, Tag, TypeEnv, TypeScheme, VarId, VarState};

/// Fresh replacement for each quantified variable.
type Substitution = FxHashMap<VarId, Idx>;

impl UnifyEngine<'_> {
    // ========================================
    // Free Variables
    // ========================================

    /// Unbound variables reachable from `ty` through bindings.
    pub fn free_vars(&self, ty: Idx) -> BTreeSet<VarId> {
        let mut vars = BTreeSet::new();
        self.collect_free_vars(ty, &mut vars);
        vars
    }

    fn collect_free_vars(&self, ty: Idx, vars: &mut BTreeSet<VarId>) {
        let pool = self.pool();
        if !pool.flags(ty).has_vars() {
            return;
        }
        ensure_sufficient_stack(|| match pool.kind(ty) {
            Kind::Var => {
                let var = pool.var_id(ty);
                match pool.var_state(var) {
                    VarState::Unbound => {
                        vars.insert(var);
                    }
                    VarState::Link { target } => self.collect_free_vars(target, vars),
                }
            }
            Kind::Fun => {
                self.collect_free_vars(pool.fun_arg(ty), vars);
                self.collect_free_vars(pool.fun_ret(ty), vars);
            }
            Kind::User => {
                for arg in pool.user_args(ty) {
                    self.collect_free_vars(arg, vars);
                }
            }
            Kind::Int | Kind::Double | Kind::String | Kind::Char | Kind::Unit | Kind::Bool => {}
        });
    }

    /// Free variables of the body that the scheme does not quantify.
    pub fn free_vars_in_scheme(&self, scheme: &TypeScheme) -> BTreeSet<VarId> {
        let mut vars = self.free_vars(scheme.body());
        vars.retain(|v| !scheme.quantifies(*v));
        vars
    }

    /// Union of the free variables of every scheme in `env`, shadowed
    /// bindings included.
    pub fn free_vars_in_env(&self, env: &TypeEnv) -> BTreeSet<VarId> {
        env.iter()
            .flat_map(|(_, scheme)| self.free_vars_in_scheme(scheme))
            .collect()
    }

    // ========================================
    // Generalization & Instantiation
    // ========================================

    /// Quantify every variable free in `ty` but not free in `env`.
    ///
    /// `env` must be the environment `ty` was inferred in, before the name
    /// being generalized is added to it.
    pub fn generalize(&self, env: &TypeEnv, ty: Idx) -> TypeScheme {
        let env_vars = self.free_vars_in_env(env);
        let bounded: BTreeSet<VarId> = self
            .free_vars(ty)
            .into_iter()
            .filter(|v| !env_vars.contains(v))
            .collect();
        tracing::trace!(bounded = bounded.len(), "generalize");
        TypeScheme::new(bounded, ty)
    }

    /// A fresh instance of `scheme`: every quantified variable is replaced by
    /// a new variable. Other variables are shared with the scheme.
    pub fn instantiate(&mut self, scheme: &TypeScheme) -> Idx {
        if scheme.is_mono() {
            return scheme.body();
        }
        let subst = self.fresh_substitution(scheme.bounded());
        self.substitute(&mut Rewrite::new(subst), scheme.body())
    }

    /// A copy of `tag` whose quantified variables are replaced by fresh
    /// ones, consistently across argument and result types.
    pub fn instantiate_tag(&mut self, tag: &Tag) -> Tag {
        let mut rewrite = Rewrite::new(self.fresh_substitution(tag.bounded.iter().copied()));
        let arg_types = tag
            .arg_types
            .iter()
            .map(|&arg| self.substitute(&mut rewrite, arg))
            .collect();
        let result_type = self.substitute(&mut rewrite, tag.result_type);
        Tag {
            name: tag.name,
            index: tag.index,
            bounded: tag.bounded.clone(),
            arg_types,
            result_type,
        }
    }

    /// Rebuild `ty` with every bound variable replaced by what it resolves
    /// to. Unbound variables are kept.
    pub fn resolve_deep(&mut self, ty: Idx) -> Idx {
        self.substitute(&mut Rewrite::new(Substitution::default()), ty)
    }

    /// [`resolve_deep`](Self::resolve_deep) every type in place, sharing the
    /// work done on common subterms.
    pub fn resolve_deep_all<'a>(&mut self, types: impl IntoIterator<Item = &'a mut Idx>) {
        let mut rewrite = Rewrite::new(Substitution::default());
        for ty in types {
            *ty = self.substitute(&mut rewrite, *ty);
        }
    }

    fn fresh_substitution(&mut self, vars: impl Iterator<Item = VarId>) -> Substitution {
        vars.map(|var| (var, self.fresh_var())).collect()
    }

    /// Replace unbound variables in the substitution, resolving bound ones
    /// first.
    fn substitute(&mut self, rewrite: &mut Rewrite, ty: Idx) -> Idx {
        if !self.pool().flags(ty).has_vars() {
            return ty;
        }
        let ty = self.resolve(ty);
        if !self.pool().flags(ty).has_vars() {
            return ty;
        }
        if let Some(&done) = rewrite.done.get(&ty) {
            return done;
        }
        let out = ensure_sufficient_stack(|| self.substitute_inner(rewrite, ty));
        rewrite.done.insert(ty, out);
        out
    }

    fn substitute_inner(&mut self, rewrite: &mut Rewrite, ty: Idx) -> Idx {
        match self.pool().kind(ty) {
            Kind::Var => {
                let var = self.pool().var_id(ty);
                rewrite.subst.get(&var).copied().unwrap_or(ty)
            }
            Kind::Fun => {
                let arg = self.pool().fun_arg(ty);
                let ret = self.pool().fun_ret(ty);
                let arg = self.substitute(rewrite, arg);
                let ret = self.substitute(rewrite, ret);
                self.pool_mut().function(arg, ret)
            }
            Kind::User => {
                let name = self.pool().user_name(ty);
                let args: SmallVec<[Idx; 4]> = self
                    .pool()
                    .user_args(ty)
                    .into_iter()
                    .map(|arg| self.substitute(rewrite, arg))
                    .collect();
                self.pool_mut().user_type(name, &args)
            }
            Kind::Int | Kind::Double | Kind::String | Kind::Char | Kind::Unit | Kind::Bool => ty,
        }
    }
}

/// One substitution pass. Bindings do not change while a pass runs, so each
/// resolved subterm is rewritten once.
struct Rewrite {
    subst: Substitution,
    done: FxHashMap<Idx, Idx>,
}

impl Rewrite {
    fn new(subst: Substitution) -> Self {
        Rewrite {
            subst,
            done: FxHashMap::default(),
        }
    }
}
