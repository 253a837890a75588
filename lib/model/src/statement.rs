use crate::vocab::wikibase;
use crate::{Entity, RankMask, Snak};
use oxrdf::NamedNodeRef;
use std::collections::BTreeSet;
use std::fmt;

/// The rank of a statement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Preferred,
    #[default]
    Normal,
    Deprecated,
}

impl Rank {
    #[must_use]
    pub const fn mask(self) -> RankMask {
        match self {
            Rank::Preferred => RankMask::PREFERRED,
            Rank::Normal => RankMask::NORMAL,
            Rank::Deprecated => RankMask::DEPRECATED,
        }
    }

    #[must_use]
    pub const fn iri(self) -> NamedNodeRef<'static> {
        match self {
            Rank::Preferred => wikibase::PREFERRED_RANK,
            Rank::Normal => wikibase::NORMAL_RANK,
            Rank::Deprecated => wikibase::DEPRECATED_RANK,
        }
    }

    pub fn from_iri(iri: NamedNodeRef<'_>) -> Option<Self> {
        [Rank::Preferred, Rank::Normal, Rank::Deprecated]
            .into_iter()
            .find(|rank| rank.iri() == iri)
    }
}

/// A statement: a [Snak] about a subject [Entity].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Statement {
    pub subject: Entity,
    pub snak: Snak,
}

impl Statement {
    pub fn new(subject: impl Into<Entity>, snak: Snak) -> Self {
        Self {
            subject: subject.into(),
            snak,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Statement({}, {})", self.subject, self.snak)
    }
}

/// The annotations of a statement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AnnotationRecord {
    pub qualifiers: BTreeSet<Snak>,
    pub references: BTreeSet<BTreeSet<Snak>>,
    pub rank: Rank,
}

impl AnnotationRecord {
    #[must_use]
    pub fn with_rank(self, rank: Rank) -> Self {
        Self { rank, ..self }
    }

    #[must_use]
    pub fn with_qualifier(mut self, qualifier: Snak) -> Self {
        self.qualifiers.insert(qualifier);
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: impl IntoIterator<Item = Snak>) -> Self {
        self.references.insert(reference.into_iter().collect());
        self
    }
}
