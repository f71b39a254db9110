//! Persistent, shadowing environments.
//!
//! An [`Env`] is an immutable cons list of `(name, value)` pairs shared
//! through `Rc`. Extending returns a new environment in O(1) and leaves the
//! original intact, so an inference step can hand a scope to a child and
//! keep using its own.
//!
//! Lookup walks front to back: the most recently prepended binding for a
//! name wins.

use std::fmt;
use std::rc::Rc;

use kiln_ir::Name;

use crate::TypeScheme;

/// Variable environment: name → type scheme.
pub type TypeEnv = Env<TypeScheme>;

struct Node<T> {
    name: Name,
    value: T,
    next: Option<Rc<Node<T>>>,
}

/// Persistent association list from names to `T`.
pub struct Env<T> {
    head: Option<Rc<Node<T>>>,
    len: usize,
}

impl<T> Env<T> {
    /// The empty environment.
    pub fn new() -> Self {
        Env { head: None, len: 0 }
    }

    /// A new environment where `name` maps to `value`, shadowing any
    /// existing binding of `name`.
    #[must_use]
    pub fn prepend(&self, name: Name, value: T) -> Self {
        Env {
            head: Some(Rc::new(Node {
                name,
                value,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Innermost binding of `name`.
    pub fn lookup(&self, name: Name) -> Option<&T> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: Name) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of bindings, shadowed ones included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Bindings from innermost to outermost, shadowed ones included.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            node: self.head.as_deref(),
        }
    }
}

impl<T: Clone> Env<T> {
    /// Concatenate: every binding of `self` followed by every binding of
    /// `back`. Bindings in `self` shadow same-named bindings in `back`.
    ///
    /// Shares `back` and copies only `self`'s spine.
    #[must_use]
    pub fn append(&self, back: &Env<T>) -> Self {
        let front: Vec<_> = self.iter().collect();
        front
            .into_iter()
            .rev()
            .fold(back.clone(), |env, (name, value)| {
                env.prepend(name, value.clone())
            })
    }
}

impl<T> Clone for Env<T> {
    fn clone(&self) -> Self {
        Env {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

impl<T> Drop for Env<T> {
    // Unlink uniquely owned nodes one at a time; a long chain would
    // otherwise be dropped recursively.
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Rc::try_unwrap(node) {
                Ok(mut node) => next = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T> Default for Env<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Env<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone> FromIterator<(Name, T)> for Env<T> {
    /// Later items shadow earlier ones, as if prepended in order.
    fn from_iter<I: IntoIterator<Item = (Name, T)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Env::new(), |env, (name, value)| env.prepend(name, value))
    }
}

/// Iterator over an environment's bindings, innermost first.
pub struct Iter<'a, T> {
    node: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Name, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node?;
        self.node = node.next.as_deref();
        Some((node.name, &node.value))
    }
}
