use crate::Fingerprint;
use kif_model::{DatatypeMask, Rank, RankMask, SnakMask, Statement, Value};

/// A statement filter: what to search for.
///
/// A filter constrains the subject, property and value slots of statements with [Fingerprint]s
/// and refines them with masks on the snak kind, the datatypes of each slot and the rank. An
/// absent slot is unconstrained, which is kept distinct from a slot set to [Fingerprint::Full].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Filter {
    subject: Option<Fingerprint>,
    property: Option<Fingerprint>,
    value: Option<Fingerprint>,
    snak_mask: SnakMask,
    subject_mask: DatatypeMask,
    property_mask: DatatypeMask,
    value_mask: DatatypeMask,
    language: Option<String>,
    rank_mask: RankMask,
    annotated: bool,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            subject: None,
            property: None,
            value: None,
            snak_mask: SnakMask::ALL,
            subject_mask: DatatypeMask::ENTITY,
            property_mask: DatatypeMask::PROPERTY,
            value_mask: DatatypeMask::ALL,
            language: None,
            rank_mask: RankMask::ALL,
            annotated: false,
        }
    }
}

impl Filter {
    /// Creates a filter that matches every statement.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_subject(self, subject: impl Into<Fingerprint>) -> Self {
        Self {
            subject: Some(subject.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_property(self, property: impl Into<Fingerprint>) -> Self {
        Self {
            property: Some(property.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_value(self, value: impl Into<Fingerprint>) -> Self {
        Self {
            value: Some(value.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_snak_mask(self, snak_mask: SnakMask) -> Self {
        Self { snak_mask, ..self }
    }

    #[must_use]
    pub fn with_subject_mask(self, subject_mask: DatatypeMask) -> Self {
        Self {
            subject_mask,
            ..self
        }
    }

    #[must_use]
    pub fn with_property_mask(self, property_mask: DatatypeMask) -> Self {
        Self {
            property_mask,
            ..self
        }
    }

    #[must_use]
    pub fn with_value_mask(self, value_mask: DatatypeMask) -> Self {
        Self { value_mask, ..self }
    }

    /// Restricts text values to the given language.
    #[must_use]
    pub fn with_language(self, language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_rank_mask(self, rank_mask: RankMask) -> Self {
        Self { rank_mask, ..self }
    }

    /// Requests the annotations (qualifiers, references and rank) of the matched statements.
    #[must_use]
    pub fn with_annotated(self, annotated: bool) -> Self {
        Self { annotated, ..self }
    }

    pub fn subject(&self) -> Option<&Fingerprint> {
        self.subject.as_ref()
    }

    pub fn property(&self) -> Option<&Fingerprint> {
        self.property.as_ref()
    }

    pub fn value(&self) -> Option<&Fingerprint> {
        self.value.as_ref()
    }

    pub fn snak_mask(&self) -> SnakMask {
        self.snak_mask
    }

    pub fn subject_mask(&self) -> DatatypeMask {
        self.subject_mask
    }

    pub fn property_mask(&self) -> DatatypeMask {
        self.property_mask
    }

    pub fn value_mask(&self) -> DatatypeMask {
        self.value_mask
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn rank_mask(&self) -> RankMask {
        self.rank_mask
    }

    pub fn is_annotated(&self) -> bool {
        self.annotated
    }

    /// Normalizes every slot under its mask.
    ///
    /// The subject is normalized under the entity datatypes, the property under
    /// [DatatypeMask::PROPERTY] and the value under the value mask. A value slot that requires a
    /// value restricts the snak mask to value snaks.
    #[must_use]
    pub fn normalize(&self) -> Filter {
        let subject_mask = self.subject_mask & DatatypeMask::ENTITY;
        let property_mask = self.property_mask & DatatypeMask::PROPERTY;
        let value = self
            .value
            .as_ref()
            .map(|value| value.normalize(self.value_mask));
        let snak_mask = match &value {
            Some(value) if !value.is_full() => self.snak_mask & SnakMask::VALUE_SNAK,
            _ => self.snak_mask,
        };
        Filter {
            subject: self
                .subject
                .as_ref()
                .map(|subject| subject.normalize(subject_mask)),
            property: self
                .property
                .as_ref()
                .map(|property| property.normalize(property_mask)),
            value,
            snak_mask,
            subject_mask,
            property_mask,
            value_mask: self.value_mask,
            language: self.language.clone(),
            rank_mask: self.rank_mask,
            annotated: self.annotated,
        }
    }

    /// Returns whether this filter statically matches nothing.
    pub fn is_empty(&self) -> bool {
        let normalized = self.normalize();
        let empty_slot = [
            &normalized.subject,
            &normalized.property,
            &normalized.value,
        ]
        .into_iter()
        .any(|slot| slot.as_ref().is_some_and(Fingerprint::is_empty));
        empty_slot
            || normalized.snak_mask.is_empty()
            || normalized.subject_mask.is_empty()
            || normalized.property_mask.is_empty()
            || normalized.value_mask.is_empty()
            || normalized.rank_mask.is_empty()
    }

    /// Returns whether this filter matches every statement.
    pub fn is_full(&self) -> bool {
        let normalized = self.normalize();
        let full_slot = |slot: &Option<Fingerprint>| slot.as_ref().map_or(true, Fingerprint::is_full);
        full_slot(&normalized.subject)
            && full_slot(&normalized.property)
            && full_slot(&normalized.value)
            && normalized.snak_mask.is_all()
            && normalized.subject_mask == DatatypeMask::ENTITY
            && normalized.property_mask == DatatypeMask::PROPERTY
            && normalized.value_mask.is_all()
            && normalized.language.is_none()
            && normalized.rank_mask.is_all()
    }

    /// The conjunction of two filters.
    ///
    /// Slots are conjoined and masks intersected. Conflicting languages exclude text values.
    #[must_use]
    pub fn combine(&self, other: &Filter) -> Filter {
        fn slot(lhs: &Option<Fingerprint>, rhs: &Option<Fingerprint>) -> Option<Fingerprint> {
            match (lhs, rhs) {
                (None, None) => None,
                (Some(slot), None) | (None, Some(slot)) => Some(slot.clone()),
                (Some(lhs), Some(rhs)) => Some(lhs.clone().and(rhs.clone())),
            }
        }

        let mut value_mask = self.value_mask & other.value_mask;
        let language = match (&self.language, &other.language) {
            (Some(lhs), Some(rhs)) if lhs != rhs => {
                value_mask = value_mask & !DatatypeMask::TEXT;
                Some(lhs.clone())
            }
            (Some(language), _) | (None, Some(language)) => Some(language.clone()),
            (None, None) => None,
        };
        Filter {
            subject: slot(&self.subject, &other.subject),
            property: slot(&self.property, &other.property),
            value: slot(&self.value, &other.value),
            snak_mask: self.snak_mask & other.snak_mask,
            subject_mask: self.subject_mask & other.subject_mask,
            property_mask: self.property_mask & other.property_mask,
            value_mask,
            language,
            rank_mask: self.rank_mask & other.rank_mask,
            annotated: self.annotated || other.annotated,
        }
    }

    /// Shallowly tests whether `statement` (with an optional known `rank`) satisfies this filter.
    ///
    /// Snak fingerprints are not checked, as the compiled query enforces them.
    pub fn matches(&self, statement: &Statement, rank: Option<Rank>) -> bool {
        let subject = Value::from(statement.subject.clone());
        let property = Value::Property(statement.snak.property().clone());
        let slot_matches = |slot: &Option<Fingerprint>, value: &Value| {
            slot.as_ref()
                .map_or(true, |fingerprint| fingerprint.matches(value))
        };

        if !self.subject_mask.contains(statement.subject.datatype())
            || !slot_matches(&self.subject, &subject)
            || !self.property_mask.contains(kif_model::Datatype::Property)
            || !slot_matches(&self.property, &property)
            || !self.snak_mask.contains(statement.snak.kind())
            || !rank.map_or(true, |rank| self.rank_mask.contains(rank))
        {
            return false;
        }

        match statement.snak.as_value() {
            Some(value) => {
                let language_matches = match (value, &self.language) {
                    (Value::Text(text), Some(language)) => &text.language == language,
                    _ => true,
                };
                self.value_mask.contains(value.datatype())
                    && slot_matches(&self.value, value)
                    && language_matches
            }
            None => self.value.as_ref().map_or(true, Fingerprint::is_full),
        }
    }
}
