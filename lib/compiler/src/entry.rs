use crate::{IriPrefixRewrite, RuleArgs};
use kif_filter::Fingerprint;
use kif_model::{Datatype, DatatypeMask, Item, NamedNode, Property, TimePrecision};
use kif_sparql::QueryBuilder;
use std::fmt;
use std::sync::Arc;

/// Returned by a handler that emitted the patterns of its entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Applied;

/// Returned by a handler whose entry does not apply to the request at hand.
///
/// Skipping is ordinary control flow: the compiler discards whatever the handler emitted and
/// tries the next entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skip {
    reason: String,
}

impl Skip {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Emits the patterns realizing the statements selected by the [RuleArgs].
pub type Handler =
    Arc<dyn Fn(&mut QueryBuilder, &RuleArgs<'_>) -> Result<Applied, Skip> + Send + Sync>;

/// The statements an entry is responsible for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredicatePattern {
    /// The property of the statements, or [None] for any property.
    pub property: Option<Property>,
    /// The subjects the entry can handle.
    pub subject: Fingerprint,
}

impl PredicatePattern {
    /// Any statement of any property.
    pub fn any() -> Self {
        Self {
            property: None,
            subject: Fingerprint::Full,
        }
    }

    /// The statements of `property` about entities.
    pub fn property(property: Property) -> Self {
        Self {
            property: Some(property),
            subject: Fingerprint::Datatype(DatatypeMask::ENTITY),
        }
    }

    #[must_use]
    pub fn with_subject(self, subject: impl Into<Fingerprint>) -> Self {
        Self {
            subject: subject.into(),
            ..self
        }
    }
}

/// The static parameters of an entry.
///
/// The value-related parameters describe how the store represents values: a fixed unit,
/// precision, timezone or calendar, and whether quantities carry bounds. A concrete value that
/// disagrees with them cannot be stored by the entry, which then skips.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryParams {
    pub unit: Option<Item>,
    pub bounds: bool,
    pub precision: Option<TimePrecision>,
    pub timezone: Option<i64>,
    pub calendar: Option<Item>,
    pub subject_rewrite: Option<IriPrefixRewrite>,
    pub value_rewrite: Option<IriPrefixRewrite>,
    /// The datatype to which value literals are converted on output.
    pub literal_datatype: Option<NamedNode>,
    /// The language tag attached to value literals on output.
    pub language: Option<String>,
}

impl Default for EntryParams {
    fn default() -> Self {
        Self {
            unit: None,
            bounds: true,
            precision: None,
            timezone: None,
            calendar: None,
            subject_rewrite: None,
            value_rewrite: None,
            literal_datatype: None,
            language: None,
        }
    }
}

impl EntryParams {
    #[must_use]
    pub fn with_unit(self, unit: Item) -> Self {
        Self {
            unit: Some(unit),
            ..self
        }
    }

    #[must_use]
    pub fn without_bounds(self) -> Self {
        Self {
            bounds: false,
            ..self
        }
    }

    #[must_use]
    pub fn with_precision(self, precision: TimePrecision) -> Self {
        Self {
            precision: Some(precision),
            ..self
        }
    }

    #[must_use]
    pub fn with_timezone(self, timezone: i64) -> Self {
        Self {
            timezone: Some(timezone),
            ..self
        }
    }

    #[must_use]
    pub fn with_calendar(self, calendar: Item) -> Self {
        Self {
            calendar: Some(calendar),
            ..self
        }
    }

    #[must_use]
    pub fn with_subject_rewrite(self, rewrite: IriPrefixRewrite) -> Self {
        Self {
            subject_rewrite: Some(rewrite),
            ..self
        }
    }

    #[must_use]
    pub fn with_value_rewrite(self, rewrite: IriPrefixRewrite) -> Self {
        Self {
            value_rewrite: Some(rewrite),
            ..self
        }
    }

    #[must_use]
    pub fn with_literal_datatype(self, datatype: impl Into<NamedNode>) -> Self {
        Self {
            literal_datatype: Some(datatype.into()),
            ..self
        }
    }

    #[must_use]
    pub fn with_language(self, language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..self
        }
    }
}

/// A mapping rule: the pattern and datatype it applies to, its static parameters and the
/// handler that emits its patterns.
#[derive(Clone)]
pub struct MappingEntry {
    pattern: PredicatePattern,
    datatype: Option<Datatype>,
    params: EntryParams,
    handler: Handler,
}

impl MappingEntry {
    pub fn new(
        pattern: PredicatePattern,
        datatype: Option<Datatype>,
        params: EntryParams,
        handler: Handler,
    ) -> Self {
        Self {
            pattern,
            datatype,
            params,
            handler,
        }
    }

    pub fn pattern(&self) -> &PredicatePattern {
        &self.pattern
    }

    /// The datatype of the values of the entry, or [None] if the entry handles any datatype.
    pub fn datatype(&self) -> Option<Datatype> {
        self.datatype
    }

    pub fn params(&self) -> &EntryParams {
        &self.params
    }

    pub fn apply(&self, builder: &mut QueryBuilder, args: &RuleArgs<'_>) -> Result<Applied, Skip> {
        (self.handler)(builder, args)
    }
}

impl fmt::Debug for MappingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingEntry")
            .field("pattern", &self.pattern)
            .field("datatype", &self.datatype)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
