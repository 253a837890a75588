use kif_sparql::BuilderError;
use thiserror::Error;

/// An error raised when a filter cannot be compiled into a query.
///
/// Compile errors are permanent: compiling the same filter against the same registry fails
/// again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompileError {
    /// No mapping entry accepted the filter.
    #[error("No mapping entry accepts the property {property}.")]
    NoMatchingEntry { property: String },
    #[error(transparent)]
    Builder(#[from] BuilderError),
}
