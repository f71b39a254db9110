//! Stack growth for Kiln's recursive walks.
//!
//! Expression inference, unification, the occurs check, substitution and
//! type printing all recurse once per nesting level. A program of nested
//! lambdas builds a function type as deep as the program itself, so every
//! one of those walks wraps its recursive step in [`ensure_sufficient_stack`].
//!
//! On native targets the stack is grown with `stacker` when less than the
//! red zone remains; on WASM the closure is called directly.

/// Grow the stack when less than this remains (100KB).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
