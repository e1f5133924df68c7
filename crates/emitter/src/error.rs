//! Error types for the emitter

use std::fmt;

/// The public call that rejected its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    On,
    Once,
    Off,
    Trigger,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::On => "on",
            Operation::Once => "once",
            Operation::Off => "off",
            Operation::Trigger => "trigger",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract violations raised at the call that received the bad argument.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidArgument {
    /// The event name is not a non-empty string
    #[error("{operation}(eventName, ..): {found} should be a non-empty string")]
    EventName { operation: Operation, found: String },

    /// The listener does not resolve to a callable
    #[error("{operation}(eventName, fn): {found} should be a function")]
    Listener { operation: Operation, found: String },
}

impl InvalidArgument {
    pub fn operation(&self) -> Operation {
        match self {
            InvalidArgument::EventName { operation, .. } => *operation,
            InvalidArgument::Listener { operation, .. } => *operation,
        }
    }
}

/// Main error type for the emitter
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitterError {
    /// A caller passed an argument that breaks the operation's contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// A listener reported a failure during dispatch
    #[error("Listener failed: {0}")]
    ListenerFailed(String),

    /// A command script could not be parsed
    #[error("Script error: {0}")]
    Script(String),
}

impl EmitterError {
    /// Shorthand for listeners that want to abort a dispatch.
    pub fn listener(message: impl Into<String>) -> Self {
        EmitterError::ListenerFailed(message.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, EmitterError::InvalidArgument(_))
    }

    pub(crate) fn event_name(operation: Operation, found: impl Into<String>) -> Self {
        InvalidArgument::EventName {
            operation,
            found: found.into(),
        }
        .into()
    }

    pub(crate) fn bad_listener(operation: Operation, found: impl Into<String>) -> Self {
        InvalidArgument::Listener {
            operation,
            found: found.into(),
        }
        .into()
    }
}

impl From<serde_json::Error> for EmitterError {
    fn from(err: serde_json::Error) -> Self {
        EmitterError::Script(err.to_string())
    }
}

impl From<toml::de::Error> for EmitterError {
    fn from(err: toml::de::Error) -> Self {
        EmitterError::Script(err.to_string())
    }
}
