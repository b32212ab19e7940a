//! Error category classification.
//!
//! Categories decide how a failure is handled: most are absorbed at the
//! boundary where they happen, a few abort startup.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// State fetch failed (unreachable, timeout, malformed).
    /// Recovered by installing a logged-out snapshot.
    Source,

    /// Icon or background could not be loaded or decoded.
    /// The layer is omitted and the rest of the bitmap still draws.
    Asset,

    /// Pushing to one button instance failed.
    /// Logged and isolated; other instances are unaffected.
    Sink,

    /// A state subscriber panicked.
    /// Logged; the remaining subscribers still run.
    Listener,

    /// Invalid environment or launch arguments. Fatal at startup.
    Configuration,

    /// OS, socket and encoding failures.
    System,
}

impl ErrorCategory {
    /// Whether the plugin keeps running after an error of this category.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCategory::Source
                | ErrorCategory::Asset
                | ErrorCategory::Sink
                | ErrorCategory::Listener
        )
    }

    /// Short label suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Source => "source",
            ErrorCategory::Asset => "asset",
            ErrorCategory::Sink => "sink",
            ErrorCategory::Listener => "listener",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::System => "system",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Source => "Game state unavailable",
            ErrorCategory::Asset => "Button asset unavailable",
            ErrorCategory::Sink => "Device update failed",
            ErrorCategory::Listener => "State listener failed",
            ErrorCategory::Configuration => "Configuration problem",
            ErrorCategory::System => "System error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
