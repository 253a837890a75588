mod error;
mod mask;
mod snak;
mod statement;
pub mod term;
mod value;
pub mod vocab;

pub use error::*;
pub use mask::{DatatypeMask, RankMask, SnakMask};
pub use snak::{Snak, SnakKind};
pub use statement::{AnnotationRecord, Rank, Statement};
pub use value::*;

// Re-export some oxrdf types.
pub use oxrdf::{
    BlankNode, BlankNodeRef, IriParseError, Literal, LiteralRef, NamedNode, NamedNodeRef,
    Term as RdfTerm, TermRef as RdfTermRef, Variable, VariableNameParseError,
};
pub use oxsdatatypes::{DateTime, Decimal};
pub use spargebra::term::{NamedNodePattern, TermPattern};
