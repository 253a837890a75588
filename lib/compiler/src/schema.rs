use kif_model::{Datatype, NamedNode, Property};
use rustc_hash::FxHashMap;

/// Knows the declared range of properties.
///
/// The compiler consults the schema when a filter does not state the range of a property itself.
pub trait PropertySchema: Send + Sync {
    fn range(&self, property: &Property) -> Option<Datatype>;
}

/// A [PropertySchema] backed by a fixed table.
#[derive(Clone, Debug, Default)]
pub struct StaticPropertySchema {
    ranges: FxHashMap<NamedNode, Datatype>,
}

impl StaticPropertySchema {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_range(mut self, property: impl Into<NamedNode>, range: Datatype) -> Self {
        self.ranges.insert(property.into(), range);
        self
    }
}

impl PropertySchema for StaticPropertySchema {
    fn range(&self, property: &Property) -> Option<Datatype> {
        self.ranges.get(property.iri()).copied()
    }
}

impl FromIterator<(NamedNode, Datatype)> for StaticPropertySchema {
    fn from_iter<T: IntoIterator<Item = (NamedNode, Datatype)>>(iter: T) -> Self {
        Self {
            ranges: iter.into_iter().collect(),
        }
    }
}
