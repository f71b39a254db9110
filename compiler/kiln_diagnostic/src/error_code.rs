use std::fmt;

/// Error codes for checker diagnostics.
///
/// All checker codes live in the E2xxx (type error) range.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Type mismatch
    E2001,
    /// Unknown identifier
    E2003,
    /// Wrong number of tag arguments
    E2004,
    /// Infinite type (occurs check)
    E2005,
    /// Unknown tag
    E2006,
}

impl ErrorCode {
    /// Get the code as a string (e.g., "E2001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
