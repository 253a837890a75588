use crate::{Applied, EntryParams, MappingEntry, PredicatePattern, RuleArgs, Skip};
use kif_model::{Datatype, NamedNode, Property, Variable};
use kif_sparql::QueryBuilder;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Adds the patterns reaching the qualifiers and references of the statement nodes bound to the
/// given variable.
///
/// The patterns must bind the annotation [columns](kif_results::columns::ANNOTATION).
pub type AnnotationRule = fn(&mut QueryBuilder, &Variable);

/// An immutable, ordered collection of [MappingEntry]s.
///
/// Entries are indexed by the IRI of their property. Entries without a property apply to every
/// property. Lookups return the candidates in registration order. A registry of a store with
/// statement nodes may also have an [AnnotationRule].
#[derive(Debug, Default)]
pub struct MappingRegistry {
    entries: Vec<MappingEntry>,
    by_property: FxHashMap<NamedNode, Vec<usize>>,
    wildcards: Vec<usize>,
    annotations: Option<AnnotationRule>,
}

impl MappingRegistry {
    pub fn builder() -> MappingRegistryBuilder {
        MappingRegistryBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn annotations(&self) -> Option<AnnotationRule> {
        self.annotations
    }

    /// Returns the entries that may realize statements of `property`, or all entries if the
    /// property is unknown.
    pub fn lookup(&self, property: Option<&Property>) -> Vec<&MappingEntry> {
        let Some(property) = property else {
            return self.entries.iter().collect();
        };
        let indexed = self
            .by_property
            .get(property.iri())
            .map_or(&[][..], Vec::as_slice);
        let mut indices = indexed
            .iter()
            .chain(&self.wildcards)
            .copied()
            .collect::<Vec<_>>();
        indices.sort_unstable();
        indices.into_iter().map(|index| &self.entries[index]).collect()
    }
}

/// Collects the entries of a [MappingRegistry].
#[derive(Debug, Default)]
pub struct MappingRegistryBuilder {
    entries: Vec<MappingEntry>,
    annotations: Option<AnnotationRule>,
}

impl MappingRegistryBuilder {
    /// Registers an entry after all previously registered ones.
    #[must_use]
    pub fn register(
        mut self,
        pattern: PredicatePattern,
        datatype: Option<Datatype>,
        params: EntryParams,
        handler: impl Fn(&mut QueryBuilder, &RuleArgs<'_>) -> Result<Applied, Skip>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.entries
            .push(MappingEntry::new(pattern, datatype, params, Arc::new(handler)));
        self
    }

    /// Sets the rule reaching the annotations of statements.
    #[must_use]
    pub fn annotations(self, rule: AnnotationRule) -> Self {
        Self {
            annotations: Some(rule),
            ..self
        }
    }

    pub fn build(self) -> MappingRegistry {
        let mut by_property = FxHashMap::<NamedNode, Vec<usize>>::default();
        let mut wildcards = Vec::new();
        for (index, entry) in self.entries.iter().enumerate() {
            match &entry.pattern().property {
                Some(property) => by_property
                    .entry(property.iri().clone())
                    .or_default()
                    .push(index),
                None => wildcards.push(index),
            }
        }
        MappingRegistry {
            entries: self.entries,
            by_property,
            wildcards,
            annotations: self.annotations,
        }
    }
}
