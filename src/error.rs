//! Error types for roster operations.

use std::collections::TryReserveError;

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, SocialError>;

/// Coarse classification of a [`SocialError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field was absent or empty.
    InvalidInput,
    /// The password shape rule was violated.
    ValidationFailed,
    /// The username is already registered.
    Duplicate,
    /// A user or friend lookup missed.
    NotFound,
    /// Pop on an empty post stack.
    EmptyCollection,
    /// Memory could not be reserved for a new entry.
    Allocation,
    /// Reading the bulk source failed.
    Io,
    /// The configuration file could not be parsed.
    Config,
}

/// Errors returned by directory, loader and config operations.
///
/// Every business-rule rejection leaves the directory exactly as it was.
#[derive(Debug, Error)]
pub enum SocialError {
    #[error("missing {field}")]
    InvalidInput { field: &'static str },

    #[error("invalid password: {reason}")]
    ValidationFailed { reason: &'static str },

    #[error("username already exists: {username}")]
    Duplicate { username: String },

    #[error("user not found: {username}")]
    UserNotFound { username: String },

    #[error("{username} has no friend named {friend}")]
    FriendNotFound { username: String, friend: String },

    #[error("{username} has no posts")]
    EmptyCollection { username: String },

    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

impl SocialError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            Self::Duplicate { .. } => ErrorKind::Duplicate,
            Self::UserNotFound { .. } | Self::FriendNotFound { .. } => ErrorKind::NotFound,
            Self::EmptyCollection { .. } => ErrorKind::EmptyCollection,
            Self::Allocation(_) => ErrorKind::Allocation,
            Self::Io(_) => ErrorKind::Io,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns true for rejections a caller can simply report and move on from.
    ///
    /// Allocation and I/O failures are not business-rule rejections.
    pub fn is_recoverable(&self) -> bool {
        match self.kind() {
            ErrorKind::InvalidInput
            | ErrorKind::ValidationFailed
            | ErrorKind::Duplicate
            | ErrorKind::NotFound
            | ErrorKind::EmptyCollection => true,
            ErrorKind::Allocation | ErrorKind::Io | ErrorKind::Config => false,
        }
    }
}
