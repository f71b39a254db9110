//! Type formatting for diagnostics and reports.

use std::fmt::Write as _;

use kiln_ir::StringInterner;
use kiln_stack::ensure_sufficient_stack;

use crate::{Idx, Kind, Pool, TypeScheme, VarState};

/// Renders pool types as source-like text.
///
/// Bound variables print as what they are bound to; unbound ones print as
/// `$t<id>`. Function arrows associate to the right, so a function-typed
/// argument is parenthesized.
pub struct TypeFormatter<'a> {
    pool: &'a Pool,
    interner: &'a StringInterner,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(pool: &'a Pool, interner: &'a StringInterner) -> Self {
        TypeFormatter { pool, interner }
    }

    pub fn format(&self, idx: Idx) -> String {
        let mut buf = String::new();
        self.format_into(idx, &mut buf);
        buf
    }

    /// `forall $t0 $t1. body`, or just the body for a monomorphic scheme.
    pub fn format_scheme(&self, scheme: &TypeScheme) -> String {
        let mut buf = String::new();
        if !scheme.is_mono() {
            buf.push_str("forall");
            for var in scheme.bounded() {
                let _ = write!(buf, " {var:?}");
            }
            buf.push_str(". ");
        }
        self.format_into(scheme.body(), &mut buf);
        buf
    }

    pub fn format_into(&self, idx: Idx, buf: &mut String) {
        ensure_sufficient_stack(|| self.format_item(idx, buf));
    }

    fn format_item(&self, idx: Idx, buf: &mut String) {
        let pool = self.pool;
        match pool.kind(idx) {
            Kind::Int => buf.push_str("Int"),
            Kind::Double => buf.push_str("Double"),
            Kind::String => buf.push_str("String"),
            Kind::Char => buf.push_str("Char"),
            Kind::Unit => buf.push_str("Unit"),
            Kind::Bool => buf.push_str("Bool"),

            Kind::Fun => {
                let arg = pool.fun_arg(idx);
                let ret = pool.fun_ret(idx);
                if pool.kind(pool.resolve(arg)) == Kind::Fun {
                    buf.push('(');
                    self.format_into(arg, buf);
                    buf.push(')');
                } else {
                    self.format_into(arg, buf);
                }
                buf.push_str(" -> ");
                self.format_into(ret, buf);
            }

            Kind::User => {
                buf.push_str(self.interner.lookup(pool.user_name(idx)));
                let args = pool.user_args(idx);
                if !args.is_empty() {
                    buf.push('<');
                    for (i, &arg) in args.iter().enumerate() {
                        if i > 0 {
                            buf.push_str(", ");
                        }
                        self.format_into(arg, buf);
                    }
                    buf.push('>');
                }
            }

            Kind::Var => {
                let var = pool.var_id(idx);
                match pool.var_state(var) {
                    VarState::Link { target } => self.format_into(target, buf),
                    VarState::Unbound => {
                        let _ = write!(buf, "{var:?}");
                    }
                }
            }
        }
    }
}

impl Pool {
    /// Format a type as a human-readable string.
    pub fn format_type(&self, idx: Idx, interner: &StringInterner) -> String {
        TypeFormatter::new(self, interner).format(idx)
    }

    /// Format a type scheme as a human-readable string.
    pub fn format_scheme(&self, scheme: &TypeScheme, interner: &StringInterner) -> String {
        TypeFormatter::new(self, interner).format_scheme(scheme)
    }
}
