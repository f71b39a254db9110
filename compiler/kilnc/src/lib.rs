//! Checking sessions for Kiln.
//!
//! A [`Session`] owns a [`Checker`](kiln_types::Checker), runs it over a
//! parsed [`Program`](kiln_ir::Program) form by form, and collects a
//! [`Report`]: one entry per form, either what the form produced or the
//! diagnostic it failed with.
//!
//! Parsing and the command-line surface live elsewhere; this crate starts
//! from an already-built program.

mod config;
mod print;
mod report;
mod session;

pub use config::{ConfigError, ErrorPolicy, SessionConfig};
pub use print::ExprPrinter;
pub use report::{Report, ReportEntry};
pub use session::Session;

use std::sync::Once;

use tracing_subscriber::{prelude::*, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical tracing subscriber.
///
/// The filter comes from `KILN_LOG`, falling back to `RUST_LOG`. Nothing is
/// installed when neither is set. Later calls are no-ops.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("KILN_LOG").or_else(|_| EnvFilter::try_from_default_env());
        if let Ok(filter) = filter {
            install_subscriber(filter);
        }
    });
}

/// Returns `false` when a global subscriber is already installed; that one
/// is kept.
fn install_subscriber(filter: EnvFilter) -> bool {
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true),
        )
        .try_init();
    match installed {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(%err, "keeping the existing tracing subscriber");
            false
        }
    }
}
