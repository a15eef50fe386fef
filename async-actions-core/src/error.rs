//! Error types shared across the crate

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Shared handle to the error a handler failed with.
///
/// This is the payload of every failure action built by the default async
/// creators. It is reference counted so the exact same error object can be
/// dispatched to the store and returned to the caller of
/// [`TryCatchDispatch::run`](crate::TryCatchDispatch::run).
///
/// Equality is identity: two `ActionError`s are equal only if they are clones
/// of the same handle.
///
/// # Example
///
/// ```
/// use async_actions_core::ActionError;
///
/// let err = ActionError::msg("boom");
/// let copy = err.clone();
/// assert!(err.ptr_eq(&copy));
/// assert_eq!(err.to_string(), "boom");
/// assert_ne!(err, ActionError::msg("boom"));
/// ```
#[derive(Clone)]
pub struct ActionError(Arc<dyn StdError + Send + Sync + 'static>);

#[derive(Debug, Error)]
#[error("{0}")]
struct Message(String);

impl ActionError {
    /// Wrap any error.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    /// Create an error carrying only a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(Message(message.into()))
    }

    /// Returns true if both handles point at the same error object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Borrow the wrapped error.
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.0
    }

    /// Attempt to downcast the wrapped error to a concrete type.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }
}

impl fmt::Debug for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl StdError for ActionError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl PartialEq for ActionError {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl From<Box<dyn StdError + Send + Sync + 'static>> for ActionError {
    fn from(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self(Arc::from(error))
    }
}

impl From<Arc<dyn StdError + Send + Sync + 'static>> for ActionError {
    fn from(error: Arc<dyn StdError + Send + Sync + 'static>) -> Self {
        Self(error)
    }
}

impl From<std::io::Error> for ActionError {
    fn from(error: std::io::Error) -> Self {
        Self::new(error)
    }
}

impl From<serde_json::Error> for ActionError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(error)
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self::msg(message)
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::msg(message)
    }
}

// Errors travel as their message in the plain record form.
impl Serialize for ActionError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ActionError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::msg)
    }
}

/// A status string that is not one of `START`, `SUCCESS` or `FAILURE`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action status {0:?}, expected START, SUCCESS or FAILURE")]
pub struct ParseStatusError(pub String);

/// Failure to split an action `type` string into id and status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseActionTypeError {
    #[error("action type {0:?} has no '/' separating id and status")]
    MissingSeparator(String),

    #[error("action type {0:?} has an empty id")]
    EmptyId(String),

    #[error(transparent)]
    Status(#[from] ParseStatusError),
}

/// Failure to narrow an erased action into a typed one.
#[derive(Debug, Error)]
pub enum NarrowError {
    #[error("action {found:?} does not belong to {expected:?}")]
    Mismatch { expected: String, found: String },

    #[error("action payload or meta did not decode: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_identity() {
        let err = ActionError::msg("boom");
        let same = err.clone();
        let other = ActionError::msg("boom");

        assert_eq!(err, same);
        assert_ne!(err, other);
        assert_eq!(err.to_string(), other.to_string());
    }

    #[test]
    fn test_action_error_downcast() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ActionError::from(io);

        let inner = err.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(inner.kind(), std::io::ErrorKind::NotFound);
        assert!(err.downcast_ref::<serde_json::Error>().is_none());
    }

    #[test]
    fn test_action_error_serializes_as_message() {
        let err = ActionError::msg("request timed out");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value, serde_json::json!("request timed out"));

        let back: ActionError = serde_json::from_value(value).unwrap();
        assert_eq!(back.to_string(), "request timed out");
    }

    #[test]
    fn test_parse_errors_display() {
        let err = ParseActionTypeError::from(ParseStatusError("DONE".into()));
        assert!(err.to_string().contains("\"DONE\""));

        let err = ParseActionTypeError::MissingSeparator("fetch".into());
        assert!(err.to_string().contains("no '/'"));
    }
}
