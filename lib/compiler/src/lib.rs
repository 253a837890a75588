//! Compiles statement [filters](kif_filter::Filter) into SPARQL queries.
//!
//! The compiler is driven by a [MappingRegistry]: an ordered list of [MappingEntry]s, each of
//! which knows how to realize the statements of one property (or of any property) in the
//! vocabulary of a particular store. An entry may decline a concrete request by returning
//! [Skip], in which case the compiler moves on to the next candidate.

mod args;
mod compiler;
mod entry;
mod error;
pub mod mappings;
mod registry;
mod rewrite;
mod schema;

pub use args::RuleArgs;
pub use compiler::{CompileOptions, CompiledQuery, FilterCompiler};
pub use entry::{Applied, EntryParams, Handler, MappingEntry, PredicatePattern, Skip};
pub use error::CompileError;
pub use registry::{AnnotationRule, MappingRegistry, MappingRegistryBuilder};
pub use rewrite::IriPrefixRewrite;
pub use schema::{PropertySchema, StaticPropertySchema};
