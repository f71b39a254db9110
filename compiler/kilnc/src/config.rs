//! Session configuration.

use thiserror::Error;

/// What a session does after a form fails to check.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ErrorPolicy {
    /// Stop at the first failing form.
    #[default]
    Halt,
    /// Report the failure and check the remaining forms against the context
    /// as it stood before the failing form.
    Continue,
}

impl std::str::FromStr for ErrorPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "halt" => Ok(ErrorPolicy::Halt),
            "continue" => Ok(ErrorPolicy::Continue),
            _ => Err(ConfigError::InvalidErrorPolicy(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid KILN_ERROR_POLICY `{0}`: expected `halt` or `continue`")]
    InvalidErrorPolicy(String),
}

/// Knobs for a checking session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionConfig {
    pub error_policy: ErrorPolicy,
    /// Seed the context with the arithmetic operators.
    pub prelude: bool,
    /// Install the tracing subscriber when the session starts.
    pub trace: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            error_policy: ErrorPolicy::Halt,
            prelude: true,
            trace: false,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    #[must_use]
    pub fn with_prelude(mut self, prelude: bool) -> Self {
        self.prelude = prelude;
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Read `KILN_ERROR_POLICY`, `KILN_NO_PRELUDE` and `KILN_LOG` from the
    /// process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unset variables
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = SessionConfig::default();
        if let Some(policy) = lookup("KILN_ERROR_POLICY") {
            config.error_policy = policy.parse()?;
        }
        if lookup("KILN_NO_PRELUDE").is_some_and(|v| is_truthy(&v)) {
            config.prelude = false;
        }
        if lookup("KILN_LOG").is_some_and(|v| !v.is_empty()) {
            config.trace = true;
        }
        Ok(config)
    }
}

fn is_truthy(value: &str) -> bool {
    !matches!(value.trim(), "" | "0" | "false" | "no")
}
