use json_event_parser::JsonSyntaxError;
use sparesults::{QueryResultsParseError, QueryResultsSyntaxError};
use thiserror::Error;

/// An error raised when a result page or one of its rows does not have the expected shape.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("Cannot parse the query results: {0}")]
    Parse(#[from] QueryResultsParseError),
    #[error("Expected query solutions, found a boolean result.")]
    NotSolutions,
    #[error("Malformed query results: {message}")]
    MalformedDocument { message: String },
    #[error("Cannot parse the row: {message}")]
    MalformedRow { message: String },
    #[error("The variable '?{variable}' is not bound.")]
    MissingVariable { variable: String },
    #[error("Expected {expected} for '?{variable}', found {actual}.")]
    UnexpectedTermKind {
        variable: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("Expected a literal of datatype {expected} for '?{variable}', found <{actual}>.")]
    UnexpectedDatatype {
        variable: String,
        expected: &'static str,
        actual: String,
    },
    #[error("Invalid lexical form '{value}' for '?{variable}'.")]
    InvalidLexicalForm { variable: String, value: String },
    #[error("Unexpected IRI <{iri}> for '?{variable}'.")]
    UnexpectedIri { variable: String, iri: String },
}

impl DecodeError {
    /// The variable of the offending row, if the error concerns a single row.
    pub fn variable(&self) -> Option<&str> {
        match self {
            DecodeError::Parse(_)
            | DecodeError::NotSolutions
            | DecodeError::MalformedDocument { .. }
            | DecodeError::MalformedRow { .. } => None,
            DecodeError::MissingVariable { variable }
            | DecodeError::UnexpectedTermKind { variable, .. }
            | DecodeError::UnexpectedDatatype { variable, .. }
            | DecodeError::InvalidLexicalForm { variable, .. }
            | DecodeError::UnexpectedIri { variable, .. } => Some(variable),
        }
    }
}

impl From<JsonSyntaxError> for DecodeError {
    fn from(error: JsonSyntaxError) -> Self {
        DecodeError::Parse(QueryResultsSyntaxError::from(error).into())
    }
}
