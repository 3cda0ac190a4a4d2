use crate::error_recursive_msg;
use serde::Serialize;
use std::{
    error::Error as StdError,
    fmt::{Debug, Display},
};

/// Boxed, thread-safe error accepted as the cause of a tagged error.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

//===========================
// region:      --- StdBoxError

/// Owns the cause of a [`crate::TaggedError`] and forwards `Debug`, `Display` and `source` to it.
pub struct StdBoxError(pub(crate) BoxError);

impl StdBoxError {
    pub fn new(inner: impl Into<BoxError>) -> Self {
        Self(inner.into())
    }

    pub fn as_dyn_std_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> BoxError {
        self.0
    }
}

impl Debug for StdBoxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for StdBoxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Serialize for StdBoxError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&error_recursive_msg(self.as_dyn_std_error()))
    }
}

// endregion:   --- StdBoxError
