//! Resolution of surface type syntax into pool types.

use kiln_ir::{Name, ParsedType};
use kiln_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use crate::{Idx, Pool};

/// Type-parameter names in scope, mapped to the variables standing for them.
pub type TypeParams = FxHashMap<Name, Idx>;

/// Build the pool type for `ty`.
///
/// A zero-argument `Named` reference whose name is in `params` becomes the
/// parameter's variable. Anything else named, including a parameter name
/// applied to arguments, is taken literally as a user type. `Infer` gets a
/// fresh variable.
pub fn resolve_parsed_type(pool: &mut Pool, ty: &ParsedType, params: &TypeParams) -> Idx {
    ensure_sufficient_stack(|| resolve_inner(pool, ty, params))
}

fn resolve_inner(pool: &mut Pool, ty: &ParsedType, params: &TypeParams) -> Idx {
    match ty {
        ParsedType::Int => Idx::INT,
        ParsedType::Double => Idx::DOUBLE,
        ParsedType::Str => Idx::STRING,
        ParsedType::Char => Idx::CHAR,
        ParsedType::Unit => Idx::UNIT,
        ParsedType::Bool => Idx::BOOL,
        ParsedType::Fun(arg, ret) => {
            let arg = resolve_parsed_type(pool, arg, params);
            let ret = resolve_parsed_type(pool, ret, params);
            pool.function(arg, ret)
        }
        ParsedType::Named { name, args } => {
            if args.is_empty() {
                if let Some(&var) = params.get(name) {
                    return var;
                }
            }
            let args: Vec<Idx> = args
                .iter()
                .map(|arg| resolve_parsed_type(pool, arg, params))
                .collect();
            pool.user_type(*name, &args)
        }
        ParsedType::Infer => pool.fresh_var(),
    }
}
