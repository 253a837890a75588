use thiserror::Error;

/// An error raised by the [QueryBuilder](crate::QueryBuilder).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuilderError {
    /// A variable was projected that was never introduced through the builder.
    #[error("The variable '?{0}' was not introduced by the builder.")]
    UnknownVariable(String),
}
