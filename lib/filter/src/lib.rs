//! The fingerprint algebra and statement filters.
//!
//! A [Filter] describes which statements to search for. Its slots are [Fingerprint]s, boolean
//! combinations of atomic match predicates that normalize to a canonical form.

mod constraint;
mod filter;
mod fingerprint;

pub use constraint::SlotConstraint;
pub use filter::Filter;
pub use fingerprint::Fingerprint;
