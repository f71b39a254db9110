//! Type kind discriminant stored with every pool item.

use std::fmt;

/// What a pool item is. Determines how its `data` field is read.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Kind {
    // === Primitives ===
    // data: unused
    Int = 0,
    Double = 1,
    String = 2,
    Char = 3,
    Unit = 4,
    Bool = 5,

    // === Compound ===
    // data: index into extra[]
    /// `arg -> ret`; extra: `[arg, ret]`
    Fun = 16,
    /// `Name<args…>`; extra: `[name, len, args…]`
    User = 17,

    // === Variables ===
    // data: var id
    Var = 32,
}

impl Kind {
    /// Check if this is a primitive kind.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        (self as u8) < 16
    }

    pub const fn name(self) -> &'static str {
        match self {
            Kind::Int => "Int",
            Kind::Double => "Double",
            Kind::String => "String",
            Kind::Char => "Char",
            Kind::Unit => "Unit",
            Kind::Bool => "Bool",
            Kind::Fun => "Fun",
            Kind::User => "User",
            Kind::Var => "Var",
        }
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind::{}", self.name())
    }
}
