//! Diagnostic reporting for the Kiln type checker.
//!
//! Every user-facing failure becomes a [`Diagnostic`]:
//! - an error code for searchability
//! - a message saying what went wrong
//! - notes with context

mod diagnostic;
mod error_code;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
