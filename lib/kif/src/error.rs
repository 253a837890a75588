use crate::transport::TransportError;
use kif_compiler::CompileError;
use kif_results::DecodeError;
use thiserror::Error;

/// An error raised while evaluating a filter against a [SparqlStore](crate::store::SparqlStore).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The endpoint could not be queried.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The filter cannot be expressed in the vocabulary of the store.
    #[error(transparent)]
    Compile(#[from] CompileError),
    /// The endpoint answered with results of an unexpected shape.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl StoreError {
    /// Whether repeating the request may succeed.
    ///
    /// Only transport failures are transient. Compiling the same filter fails again, and so does
    /// decoding the same answer.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Transport(_))
    }
}
