//! Type annotations as written in source.
//!
//! `ParsedType` is what a parser produces for tag argument types and lambda
//! parameter annotations. The checker resolves it into pool types, turning
//! type-parameter references into type variables along the way.

use crate::Name;

/// A parsed type expression.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParsedType {
    Int,
    Double,
    Str,
    Char,
    Unit,
    Bool,

    /// `arg -> ret`
    Fun(Box<ParsedType>, Box<ParsedType>),

    /// A user type reference, e.g. `List` or `Pair<Int, a>`.
    ///
    /// Inside a type definition a zero-argument reference whose name is one
    /// of the item's parameters denotes that parameter.
    Named { name: Name, args: Vec<ParsedType> },

    /// No annotation; the checker allocates a fresh type variable.
    Infer,
}

impl ParsedType {
    /// `arg -> ret`
    pub fn fun(arg: ParsedType, ret: ParsedType) -> Self {
        ParsedType::Fun(Box::new(arg), Box::new(ret))
    }

    /// A reference to a user type with no arguments.
    pub fn named(name: Name) -> Self {
        ParsedType::Named {
            name,
            args: Vec::new(),
        }
    }

    /// A reference to a user type applied to arguments.
    pub fn applied(name: Name, args: Vec<ParsedType>) -> Self {
        ParsedType::Named { name, args }
    }
}
