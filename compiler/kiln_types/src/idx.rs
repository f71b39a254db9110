//! Type handle.
//!
//! Every type lives in a [`Pool`](crate::Pool) and is referenced by a 32-bit
//! `Idx`. Primitives have fixed indices so they can be named without a pool.

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types (indices 0-5) ===
    // Pre-interned at pool creation.

    /// `Int`
    pub const INT: Self = Self(0);
    /// `Double`
    pub const DOUBLE: Self = Self(1);
    /// `String`
    pub const STRING: Self = Self(2);
    /// `Char`
    pub const CHAR: Self = Self(3);
    /// `Unit`
    pub const UNIT: Self = Self(4);
    /// `Bool`
    pub const BOOL: Self = Self(5);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 6;

    /// Every primitive, in index order.
    pub const PRIMITIVES: [Self; 6] = [
        Self::INT,
        Self::DOUBLE,
        Self::STRING,
        Self::CHAR,
        Self::UNIT,
        Self::BOOL,
    ];

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is one of the pre-interned primitives.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }

    /// Display name of a primitive, `None` for pool-allocated types.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("Int"),
            1 => Some("Double"),
            2 => Some("String"),
            3 => Some("Char"),
            4 => Some("Unit"),
            5 => Some("Bool"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Idx::{name}"),
            None => write!(f, "Idx({})", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_are_dense_and_named() {
        for (i, idx) in Idx::PRIMITIVES.iter().enumerate() {
            assert_eq!(idx.index(), i);
            assert!(idx.is_primitive());
            assert!(idx.name().is_some());
        }
        assert!(!Idx::from_raw(Idx::PRIMITIVE_COUNT).is_primitive());
        assert_eq!(Idx::from_raw(40).name(), None);
    }

    #[test]
    fn debug_uses_primitive_names() {
        assert_eq!(format!("{:?}", Idx::BOOL), "Idx::Bool");
        assert_eq!(format!("{:?}", Idx::from_raw(9)), "Idx(9)");
    }
}
