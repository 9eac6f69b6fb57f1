//! Error type shared by every console action.

use thiserror::Error;

/// Failure of a single user action. None of these are fatal to the process;
/// each is scoped to the action that triggered it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConsoleError {
    /// Missing or invalid input; no request was sent.
    #[error("{0}")]
    Validation(String),
    /// The action needs a logged-in session.
    #[error("Please log in first")]
    NotLoggedIn,
    /// The session's role may not perform the action; no request was sent.
    #[error("{0}")]
    Forbidden(String),
    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Remote { status: u32, message: String },
    /// The request never got an HTTP answer (DNS, refused connection, reset...).
    #[error("Error: {0}")]
    Transport(String),
    /// Transport failure while logging in.
    #[error("Connection error: {0}")]
    Connection(String),
    /// A 2xx answer whose body did not have the expected shape.
    #[error("Error parsing response: {0}")]
    Decode(String),
}

impl ConsoleError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ConsoleError::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ConsoleError::Forbidden(msg.into())
    }

    /// True when nothing was sent over the wire.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ConsoleError::Validation(_) | ConsoleError::NotLoggedIn | ConsoleError::Forbidden(_)
        )
    }
}
