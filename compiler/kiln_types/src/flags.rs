//! Pre-computed type metadata flags.
//!
//! Computed once when a type is built and cached alongside it, so the
//! occurs check and free-variable walks can skip variable-free types
//! without traversing them.

use bitflags::bitflags;

use crate::Kind;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u8 {
        /// Structurally contains a type variable (bound or not).
        const HAS_VAR = 1 << 0;

        const IS_PRIMITIVE = 1 << 4;
        const IS_FUNCTION = 1 << 5;
        const IS_USER = 1 << 6;
    }
}

impl TypeFlags {
    /// Flags inherited from child types via bitwise OR.
    pub const PROPAGATE_MASK: Self = Self::HAS_VAR;

    /// Category flag for a freshly built item of `kind`.
    pub(crate) fn for_kind(kind: Kind) -> Self {
        match kind {
            Kind::Int | Kind::Double | Kind::String | Kind::Char | Kind::Unit | Kind::Bool => {
                Self::IS_PRIMITIVE
            }
            Kind::Fun => Self::IS_FUNCTION,
            Kind::User => Self::IS_USER,
            Kind::Var => Self::HAS_VAR,
        }
    }

    /// Flags of a compound type built from `children`.
    pub(crate) fn compound(kind: Kind, children: impl IntoIterator<Item = Self>) -> Self {
        children
            .into_iter()
            .fold(Self::for_kind(kind), |acc, child| {
                acc | (child & Self::PROPAGATE_MASK)
            })
    }

    #[inline]
    pub const fn has_vars(self) -> bool {
        self.contains(Self::HAS_VAR)
    }
}
