//! Assembles the text of SPARQL queries.

mod builder;
mod error;
mod expression;

pub use builder::QueryBuilder;
pub use error::BuilderError;
pub use expression::Expression;
