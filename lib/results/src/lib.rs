//! Decodes SPARQL JSON results into KIF statements.
//!
//! Every row of a [ResultsPage] is decoded independently by the [ResultsDecoder]. The decoder
//! reads the well-known [columns] bound by compiled queries, so a row is self-describing apart
//! from the [DecodeHints] of the query it answers. The qualifiers and references of annotated
//! statements come from a separate query and are decoded by
//! [ResultsDecoder::decode_annotations].

mod annotation;
mod binding;
pub mod columns;
mod decoder;
mod error;
mod page;
mod policy;

pub use annotation::DecodedAnnotations;
pub use binding::Binding;
pub use decoder::{
    DecodeHints, DecodedPage, DecodedStatement, DecoderOptions, ResultsDecoder,
};
pub use error::DecodeError;
pub use page::ResultsPage;
pub use policy::SomeValuePolicy;
