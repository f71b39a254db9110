//! Top-level forms.

use crate::{ExprArena, ExprId, Name, ParsedType};

/// A parsed program: every expression lives in `arena`, `forms` are checked
/// in order.
#[derive(Clone, Debug, Default)]
pub struct Program {
    pub arena: ExprArena,
    pub forms: Vec<TopForm>,
}

impl Program {
    pub fn new(arena: ExprArena, forms: Vec<TopForm>) -> Self {
        Program { arena, forms }
    }
}

/// One top-level form.
#[derive(Clone, Debug, PartialEq)]
pub enum TopForm {
    /// `type A<p…> = Tag(…) | … and B = …`
    TypeDef(TypeDef),
    /// An expression evaluated for its value.
    Do(ExprId),
    /// `let name = value`: the binding is generalized and visible to later
    /// forms.
    Let { name: Name, value: ExprId },
}

/// A group of type items defined together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDef {
    pub items: Vec<TypeDefItem>,
}

/// One user type: its name, parameter names and tags in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDefItem {
    pub name: Name,
    pub params: Vec<Name>,
    pub tags: Vec<TagDecl>,
}

/// A tag declaration: `Cons(a, List<a>)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagDecl {
    pub name: Name,
    pub args: Vec<ParsedType>,
}
