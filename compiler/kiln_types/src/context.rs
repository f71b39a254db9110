//! The running inference context threaded through a program's forms.
//!
//! Holds three persistent tables: variable schemes, user type arities and
//! tags. Extension returns a new context and leaves the old one intact, so a
//! failed form never disturbs the context later forms are checked in.

use std::fmt::Write as _;

use kiln_ir::{Name, StringInterner};

use crate::{Catalogue, Env, Idx, Pool, Tag, TypeEnv, TypeFormatter, TypeScheme};

/// Names of the prelude operators, all `Int -> Int -> Int`.
pub const PRELUDE_OPERATORS: [&str; 4] = ["(+)", "(-)", "(*)", "(/)"];

#[derive(Clone, Debug, Default)]
pub struct InferenceContext {
    var_env: TypeEnv,
    type_arities: Env<usize>,
    tag_table: Env<Tag>,
}

impl InferenceContext {
    /// The empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context whose variable environment holds the integer arithmetic
    /// operators.
    pub fn with_prelude(pool: &mut Pool, interner: &mut StringInterner) -> Self {
        let binary_int = pool.curried(&[Idx::INT, Idx::INT], Idx::INT);
        let var_env = PRELUDE_OPERATORS
            .iter()
            .map(|op| (interner.intern(op), TypeScheme::mono(binary_int)))
            .collect();
        InferenceContext {
            var_env,
            ..Self::default()
        }
    }

    #[inline]
    pub fn var_env(&self) -> &TypeEnv {
        &self.var_env
    }

    pub fn lookup_var(&self, name: Name) -> Option<&TypeScheme> {
        self.var_env.lookup(name)
    }

    pub fn lookup_tag(&self, name: Name) -> Option<&Tag> {
        self.tag_table.lookup(name)
    }

    pub fn type_arity(&self, name: Name) -> Option<usize> {
        self.type_arities.lookup(name).copied()
    }

    /// Append a type definition's tables behind this context's. A type or
    /// tag already registered keeps its meaning; the new entry is only
    /// found for names not seen before.
    #[must_use]
    pub fn with_catalogue(&self, catalogue: &Catalogue) -> Self {
        InferenceContext {
            var_env: self.var_env.clone(),
            type_arities: self.type_arities.append(&catalogue.type_arities),
            tag_table: self.tag_table.append(&catalogue.tags),
        }
    }

    #[must_use]
    pub fn with_binding(&self, name: Name, scheme: TypeScheme) -> Self {
        InferenceContext {
            var_env: self.var_env.prepend(name, scheme),
            ..self.clone()
        }
    }

    /// Multi-line dump of the tables, innermost binding first.
    ///
    /// ```text
    /// types:
    ///   List/0
    /// tags:
    ///   Cons#1(Int, List) : List
    ///   Nil#0 : List
    /// vars:
    ///   id : forall $t0. $t0 -> $t0
    /// ```
    pub fn render(&self, pool: &Pool, interner: &StringInterner) -> String {
        let fmt = TypeFormatter::new(pool, interner);
        let mut out = String::from("types:\n");
        for (name, arity) in self.type_arities.iter() {
            let _ = writeln!(out, "  {}/{arity}", interner.lookup(name));
        }

        out.push_str("tags:\n");
        for (name, tag) in self.tag_table.iter() {
            let _ = write!(out, "  {}#{}", interner.lookup(name), tag.index);
            if !tag.arg_types.is_empty() {
                let args: Vec<String> = tag.arg_types.iter().map(|&a| fmt.format(a)).collect();
                let _ = write!(out, "({})", args.join(", "));
            }
            let _ = writeln!(out, " : {}", fmt.format(tag.result_type));
        }

        out.push_str("vars:\n");
        for (name, scheme) in self.var_env.iter() {
            let _ = writeln!(
                out,
                "  {} : {}",
                interner.lookup(name),
                fmt.format_scheme(scheme)
            );
        }
        out
    }
}
