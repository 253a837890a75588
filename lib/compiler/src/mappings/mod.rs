//! Ready-made mapping registries.
//!
//! - [wikidata]: the Wikibase RDF model, as served by the Wikidata query service.
//! - [pubchem]: a mirror of the PubChem RDF, exposing a few compound properties under the
//!   Wikidata vocabulary.

pub mod pubchem;
pub mod wikidata;
