//! Tag catalogue: user type arities and tag signatures.
//!
//! A type definition is processed in two passes over its items:
//! 1. record each item's arity (parameter count),
//! 2. give each item a private set of fresh variables for its parameters
//!    and build one [`Tag`] per declared tag, numbered in declaration order.
//!
//! Nothing here can fail. A misspelled parameter, or a parameter used with
//! arguments, is resolved as a literal user type. An unannotated argument
//! (`_`) becomes a variable quantified in its tag only.

use std::collections::BTreeSet;

use kiln_ir::{Name, TypeDef, TypeDefItem};

use crate::resolve::{resolve_parsed_type, TypeParams};
use crate::{Env, Idx, Pool, VarId};

/// Signature of one tag (variant constructor).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tag {
    pub name: Name,
    /// Position among the owning type's tags, in declaration order.
    pub index: usize,
    /// The owning type's parameter variables, plus one per `_` argument.
    pub bounded: BTreeSet<VarId>,
    pub arg_types: Vec<Idx>,
    /// `Owner<params…>`
    pub result_type: Idx,
}

impl Tag {
    /// Number of arguments every construction must supply.
    pub fn arity(&self) -> usize {
        self.arg_types.len()
    }
}

/// Tables produced by one type definition, to be appended behind the
/// running context's tables.
#[derive(Clone, Debug, Default)]
pub struct Catalogue {
    pub type_arities: Env<usize>,
    pub tags: Env<Tag>,
    declared_tags: Vec<Name>,
}

impl Catalogue {
    /// Names of the registered types, in declaration order.
    pub fn type_names(&self) -> Vec<Name> {
        let mut names: Vec<_> = self.type_arities.iter().map(|(n, _)| n).collect();
        names.reverse();
        names
    }

    /// Names of the declared tags, in declaration order.
    pub fn tag_names(&self) -> Vec<Name> {
        self.declared_tags.clone()
    }
}

/// Build the arity and tag tables for `def`.
///
/// Within one item a later declaration of the same tag name shadows an
/// earlier one. Across items the earlier item's tag wins.
pub fn build_catalogue(pool: &mut Pool, def: &TypeDef) -> Catalogue {
    let type_arities = def
        .items
        .iter()
        .fold(Env::new(), |env, item| env.prepend(item.name, item.params.len()));

    let mut tags = Env::new();
    let mut declared_tags = Vec::new();
    for item in &def.items {
        let item_tags = build_item_tags(pool, item)
            .into_iter()
            .fold(Env::new(), |env, tag| env.prepend(tag.name, tag));
        declared_tags.extend(item.tags.iter().map(|decl| decl.name));
        tags = tags.append(&item_tags);
    }

    Catalogue {
        type_arities,
        tags,
        declared_tags,
    }
}

fn build_item_tags(pool: &mut Pool, item: &TypeDefItem) -> Vec<Tag> {
    let vars: Vec<Idx> = item.params.iter().map(|_| pool.fresh_var()).collect();
    let params: TypeParams = item.params.iter().copied().zip(vars.iter().copied()).collect();
    let bounded: BTreeSet<VarId> = vars.iter().map(|&v| pool.var_id(v)).collect();
    let result_type = pool.user_type(item.name, &vars);

    item.tags
        .iter()
        .enumerate()
        .map(|(index, decl)| {
            // `_` in an argument type is quantified like a parameter, so
            // each construction picks its own type for it.
            let first_var = pool.var_count();
            let arg_types: Vec<Idx> = decl
                .args
                .iter()
                .map(|arg| resolve_parsed_type(pool, arg, &params))
                .collect();
            let mut bounded = bounded.clone();
            bounded.extend(pool.vars_since(first_var));
            Tag {
                name: decl.name,
                index,
                bounded,
                arg_types,
                result_type,
            }
        })
        .collect()
}
