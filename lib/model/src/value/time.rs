use crate::value::quantity::loose_eq;
use crate::Item;
use oxsdatatypes::DateTime;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The precision of a [Time], using the Wikibase precision codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TimePrecision {
    BillionYears = 0,
    HundredMillionYears = 1,
    TenMillionYears = 2,
    MillionYears = 3,
    HundredThousandYears = 4,
    TenThousandYears = 5,
    Millennia = 6,
    Century = 7,
    Decade = 8,
    Year = 9,
    Month = 10,
    Day = 11,
    Hour = 12,
    Minute = 13,
    Second = 14,
}

impl TimePrecision {
    const ALL: [TimePrecision; 15] = [
        TimePrecision::BillionYears,
        TimePrecision::HundredMillionYears,
        TimePrecision::TenMillionYears,
        TimePrecision::MillionYears,
        TimePrecision::HundredThousandYears,
        TimePrecision::TenThousandYears,
        TimePrecision::Millennia,
        TimePrecision::Century,
        TimePrecision::Decade,
        TimePrecision::Year,
        TimePrecision::Month,
        TimePrecision::Day,
        TimePrecision::Hour,
        TimePrecision::Minute,
        TimePrecision::Second,
    ];

    /// Returns the precision with the given Wikibase code.
    pub fn from_code(code: i64) -> Option<Self> {
        let index = usize::try_from(code).ok()?;
        Self::ALL.get(index).copied()
    }

    pub fn code(self) -> i64 {
        i64::from(self as u8)
    }
}

/// A point in time.
///
/// `time` holds the wall-clock value as stored in the knowledge graph, while `timezone` holds the
/// offset in minutes separately. Two times are only equal if their wall-clock representations are
/// equal, no matter which instant they denote.
#[derive(Clone, Debug)]
pub struct Time {
    pub time: DateTime,
    pub precision: Option<TimePrecision>,
    pub timezone: Option<i64>,
    pub calendar: Option<Item>,
}

impl Time {
    pub fn new(time: DateTime) -> Self {
        Self {
            time,
            precision: None,
            timezone: None,
            calendar: None,
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

    /// Returns the canonical lexical form of the wall-clock value.
    pub fn lexical(&self) -> String {
        self.time.to_string()
    }

    /// Returns whether `self`, seen as a loose pattern, matches `other`.
    ///
    /// The time must be equal. Precision, timezone and calendar are only compared if `self`
    /// specifies them.
    pub fn loosely_matches(&self, other: &Time) -> bool {
        self.lexical() == other.lexical()
            && loose_eq(self.precision.as_ref(), other.precision.as_ref())
            && loose_eq(self.timezone.as_ref(), other.timezone.as_ref())
            && loose_eq(self.calendar.as_ref(), other.calendar.as_ref())
    }

    fn key(&self) -> (String, Option<TimePrecision>, Option<i64>, Option<&Item>) {
        (
            self.lexical(),
            self.precision,
            self.timezone,
            self.calendar.as_ref(),
        )
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for Time {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time({}", self.time)?;
        if let Some(precision) = self.precision {
            write!(f, ", {precision:?}")?;
        }
        if let Some(timezone) = self.timezone {
            write!(f, ", {timezone}")?;
        }
        if let Some(calendar) = &self.calendar {
            write!(f, ", {calendar}")?;
        }
        f.write_str(")")
    }
}
