//! Type pool: the arena every type and type variable lives in.
//!
//! - Primitives are pre-interned at fixed indices (see [`Idx`]).
//! - `Fun` and `User` types are hash-consed: building the same structure
//!   twice returns the same `Idx`.
//! - Each type variable is its own item carrying a dense [`VarId`]; its
//!   binding lives in a side table of [`VarState`] and is written at most
//!   once.

mod format;

pub use format::TypeFormatter;

use std::fmt;

use kiln_ir::Name;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{Idx, Kind, TypeFlags};

/// Identity of a type variable. Unique within one pool and issued in
/// increasing order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VarId(u32);

impl VarId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$t{}", self.0)
    }
}

/// Binding state of a type variable.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VarState {
    /// Not yet solved.
    Unbound,
    /// Solved: the variable stands for `target`. Never overwritten.
    Link { target: Idx },
}

#[derive(Copy, Clone, Debug)]
struct Item {
    kind: Kind,
    data: u32,
}

/// Structural key for hash-consing compound types.
type InternKey = (Kind, SmallVec<[u32; 4]>);

/// Storage for all types of one checking session.
pub struct Pool {
    items: Vec<Item>,
    flags: Vec<TypeFlags>,
    /// Variable-length payloads of compound items.
    extra: Vec<u32>,
    var_states: Vec<VarState>,
    interned: FxHashMap<InternKey, Idx>,
}

impl Pool {
    /// Create a pool with the primitive types pre-interned.
    pub fn new() -> Self {
        let mut pool = Pool {
            items: Vec::with_capacity(256),
            flags: Vec::with_capacity(256),
            extra: Vec::with_capacity(512),
            var_states: Vec::new(),
            interned: FxHashMap::default(),
        };
        for kind in [
            Kind::Int,
            Kind::Double,
            Kind::String,
            Kind::Char,
            Kind::Unit,
            Kind::Bool,
        ] {
            pool.push_item(kind, 0, TypeFlags::for_kind(kind));
        }
        debug_assert_eq!(pool.items.len(), Idx::PRIMITIVE_COUNT as usize);
        pool
    }

    fn push_item(&mut self, kind: Kind, data: u32, flags: TypeFlags) -> Idx {
        let idx = Idx::from_raw(to_u32(self.items.len(), "type pool"));
        self.items.push(Item { kind, data });
        self.flags.push(flags);
        idx
    }

    // ========================================
    // Construction
    // ========================================

    /// Allocate a fresh unbound type variable.
    pub fn fresh_var(&mut self) -> Idx {
        let id = to_u32(self.var_states.len(), "type variable table");
        self.var_states.push(VarState::Unbound);
        self.push_item(Kind::Var, id, TypeFlags::for_kind(Kind::Var))
    }

    /// `arg -> ret`
    pub fn function(&mut self, arg: Idx, ret: Idx) -> Idx {
        let key: InternKey = (Kind::Fun, SmallVec::from_slice(&[arg.raw(), ret.raw()]));
        if let Some(&idx) = self.interned.get(&key) {
            return idx;
        }
        let flags = TypeFlags::compound(Kind::Fun, [self.flags(arg), self.flags(ret)]);
        let start = to_u32(self.extra.len(), "type pool extra");
        self.extra.extend_from_slice(&key.1);
        let idx = self.push_item(Kind::Fun, start, flags);
        self.interned.insert(key, idx);
        idx
    }

    /// Curried function `a1 -> a2 -> … -> ret`.
    pub fn curried(&mut self, args: &[Idx], ret: Idx) -> Idx {
        args.iter()
            .rev()
            .fold(ret, |acc, &arg| self.function(arg, acc))
    }

    /// `name<args…>`
    pub fn user_type(&mut self, name: Name, args: &[Idx]) -> Idx {
        let mut payload: SmallVec<[u32; 4]> = SmallVec::with_capacity(args.len() + 2);
        payload.push(name.raw());
        payload.push(to_u32(args.len(), "type argument list"));
        payload.extend(args.iter().map(|a| a.raw()));

        let key: InternKey = (Kind::User, payload);
        if let Some(&idx) = self.interned.get(&key) {
            return idx;
        }
        let flags = TypeFlags::compound(Kind::User, args.iter().map(|&a| self.flags(a)));
        let start = to_u32(self.extra.len(), "type pool extra");
        self.extra.extend_from_slice(&key.1);
        let idx = self.push_item(Kind::User, start, flags);
        self.interned.insert(key, idx);
        idx
    }

    // ========================================
    // Queries
    // ========================================

    #[inline]
    pub fn kind(&self, idx: Idx) -> Kind {
        self.items[idx.index()].kind
    }

    #[inline]
    pub fn flags(&self, idx: Idx) -> TypeFlags {
        self.flags[idx.index()]
    }

    /// Number of items (primitives included).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: primitives are pre-interned.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of type variables allocated so far.
    pub fn var_count(&self) -> usize {
        self.var_states.len()
    }

    /// Argument type of a `Fun` item.
    pub fn fun_arg(&self, idx: Idx) -> Idx {
        debug_assert_eq!(self.kind(idx), Kind::Fun);
        Idx::from_raw(self.extra[self.items[idx.index()].data as usize])
    }

    /// Return type of a `Fun` item.
    pub fn fun_ret(&self, idx: Idx) -> Idx {
        debug_assert_eq!(self.kind(idx), Kind::Fun);
        Idx::from_raw(self.extra[self.items[idx.index()].data as usize + 1])
    }

    /// Name of a `User` item.
    pub fn user_name(&self, idx: Idx) -> Name {
        debug_assert_eq!(self.kind(idx), Kind::User);
        Name::from_raw(self.extra[self.items[idx.index()].data as usize])
    }

    /// Type arguments of a `User` item.
    pub fn user_args(&self, idx: Idx) -> SmallVec<[Idx; 4]> {
        debug_assert_eq!(self.kind(idx), Kind::User);
        let start = self.items[idx.index()].data as usize;
        let len = self.extra[start + 1] as usize;
        self.extra[start + 2..start + 2 + len]
            .iter()
            .map(|&raw| Idx::from_raw(raw))
            .collect()
    }

    /// Variable id of a `Var` item.
    pub fn var_id(&self, idx: Idx) -> VarId {
        debug_assert_eq!(self.kind(idx), Kind::Var);
        VarId(self.items[idx.index()].data)
    }

    /// Variables allocated after the first `mark` ones.
    pub fn vars_since(&self, mark: usize) -> impl Iterator<Item = VarId> {
        (mark..self.var_states.len()).map(|i| VarId(to_u32(i, "type variable table")))
    }

    pub fn var_state(&self, var: VarId) -> VarState {
        self.var_states[var.index()]
    }

    /// Bind an unbound variable to `target`.
    ///
    /// # Panics
    /// Panics if `var` is already bound: bindings are write-once.
    pub fn link_var(&mut self, var: VarId, target: Idx) {
        let state = &mut self.var_states[var.index()];
        assert!(
            matches!(state, VarState::Unbound),
            "type variable {var:?} is already bound"
        );
        *state = VarState::Link { target };
    }

    /// Follow variable bindings until an unbound variable or a non-variable
    /// type is reached. Read-only: chains are not compressed.
    pub fn resolve(&self, mut idx: Idx) -> Idx {
        while self.kind(idx) == Kind::Var {
            match self.var_state(self.var_id(idx)) {
                VarState::Link { target } => idx = target,
                VarState::Unbound => break,
            }
        }
        idx
    }

    /// If `idx` resolves to an unbound variable, return its id.
    pub fn unbound_var(&self, idx: Idx) -> Option<VarId> {
        let resolved = self.resolve(idx);
        (self.kind(resolved) == Kind::Var).then(|| self.var_id(resolved))
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("{what} exceeded {} entries", u32::MAX))
}
