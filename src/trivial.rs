use thiserror::Error;

/// Very simple error that simply encapsulates a `&static str`. Should only be used for tests and examples,
/// not recommended for production applications or libraries.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct TrivialError(pub &'static str);
