//! The names of the variables projected by compiled queries.

pub const SUBJECT: &str = "subject";
pub const PROPERTY: &str = "property";
/// The Wikibase datatype IRI of the property.
pub const DATATYPE: &str = "datatype";
/// The primary value column. Unbound for no-value snaks.
pub const VALUE: &str = "value";
pub const AMOUNT: &str = "amount";
pub const UNIT: &str = "unit";
pub const LOWER: &str = "lower";
pub const UPPER: &str = "upper";
pub const TIME: &str = "time";
pub const PRECISION: &str = "precision";
pub const TIMEZONE: &str = "timezone";
pub const CALENDAR: &str = "calendar";
pub const RANK: &str = "rank";

/// All columns in projection order.
pub const ALL: [&str; 13] = [
    SUBJECT, PROPERTY, DATATYPE, VALUE, AMOUNT, UNIT, LOWER, UPPER, TIME, PRECISION, TIMEZONE,
    CALENDAR, RANK,
];

/// The statement node, projected by queries of annotated filters.
pub const STATEMENT: &str = "statement";
/// The reference node of a reference snak. Unbound for qualifiers.
pub const REFERENCE: &str = "reference";

/// The columns of annotation queries, in projection order.
pub const ANNOTATION: [&str; 5] = [STATEMENT, REFERENCE, PROPERTY, DATATYPE, VALUE];
