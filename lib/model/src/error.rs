use thiserror::Error;

/// An error raised when converting between [Term](crate::term::Term)s and the statement model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TermError {
    /// The term contains variables where a closed term is required.
    #[error("The term '{0}' is not closed.")]
    Open(String),
    /// A variable remains unbound after instantiating a template.
    #[error("The variable '?{0}' is unbound.")]
    UnboundVariable(String),
    /// The term does not have the expected shape.
    #[error("Expected {expected}, found '{term}'.")]
    Unexpected { expected: &'static str, term: String },
    #[error("Invalid date time '{0}'.")]
    InvalidDateTime(String),
}
