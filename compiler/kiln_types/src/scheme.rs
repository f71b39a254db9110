//! Polymorphic type schemes.

use std::collections::BTreeSet;

use crate::{Idx, VarId};

/// `forall bounded. body`
///
/// `bounded` is ordered so schemes print deterministically.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeScheme {
    bounded: BTreeSet<VarId>,
    body: Idx,
}

impl TypeScheme {
    /// A scheme quantifying over `bounded`.
    pub fn new(bounded: BTreeSet<VarId>, body: Idx) -> Self {
        TypeScheme { bounded, body }
    }

    /// A monomorphic scheme: nothing is quantified.
    pub fn mono(body: Idx) -> Self {
        TypeScheme {
            bounded: BTreeSet::new(),
            body,
        }
    }

    pub fn body(&self) -> Idx {
        self.body
    }

    /// Quantified variables in ascending id order.
    pub fn bounded(&self) -> impl ExactSizeIterator<Item = VarId> + '_ {
        self.bounded.iter().copied()
    }

    pub fn bounded_set(&self) -> &BTreeSet<VarId> {
        &self.bounded
    }

    pub fn is_mono(&self) -> bool {
        self.bounded.is_empty()
    }

    pub fn quantifies(&self, var: VarId) -> bool {
        self.bounded.contains(&var)
    }
}
