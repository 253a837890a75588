use crate::term::{Atom, Functor, Sort, Term, Variable};
use crate::{
    Datatype, Entity, Item, Lexeme, Property, Quantity, Snak, Statement, TermError, Text, Time,
    TimePrecision, Value,
};
use oxrdf::NamedNode;
use oxsdatatypes::{DateTime, Decimal};
use std::str::FromStr;

fn iri(iri: &NamedNode) -> Term {
    Term::Atom(Atom::Iri(iri.clone()))
}

fn string(value: &str) -> Term {
    Term::Atom(Atom::String(value.to_owned()))
}

fn decimal(value: Decimal) -> Term {
    Term::Atom(Atom::Decimal(value))
}

fn optional<T>(value: Option<T>, lower: impl FnOnce(T) -> Term) -> Term {
    value.map_or(Term::Atom(Atom::None), lower)
}

/// Lowers an optional field, replacing an absent value by a fresh nullable variable.
fn optional_or_variable<T>(
    value: Option<T>,
    lower: impl FnOnce(T) -> Term,
    name: &str,
    sort: Sort,
) -> Term {
    value.map_or_else(|| Term::Variable(Variable::optional(name, sort)), lower)
}

impl Item {
    pub fn to_term(&self) -> Term {
        Term::Compound(Functor::Item, vec![iri(self.iri())])
    }
}

impl Property {
    pub fn to_term(&self) -> Term {
        Term::Compound(
            Functor::Property,
            vec![
                iri(self.iri()),
                optional(self.range(), |range| Term::Atom(Atom::Datatype(range))),
            ],
        )
    }

    /// Lowers this property leaving its range open, which matches the property by IRI only.
    pub fn to_pattern(&self) -> Term {
        Term::Compound(
            Functor::Property,
            vec![
                iri(self.iri()),
                Term::Variable(Variable::optional("_range", Sort::DatatypeAtom)),
            ],
        )
    }
}

impl Lexeme {
    pub fn to_term(&self) -> Term {
        Term::Compound(Functor::Lexeme, vec![iri(self.iri())])
    }
}

impl Entity {
    pub fn to_term(&self) -> Term {
        match self {
            Entity::Item(item) => item.to_term(),
            Entity::Property(property) => property.to_term(),
            Entity::Lexeme(lexeme) => lexeme.to_term(),
        }
    }
}

impl Value {
    /// Lowers this value to a closed term.
    pub fn to_term(&self) -> Term {
        match self {
            Value::Item(item) => item.to_term(),
            Value::Property(property) => property.to_term(),
            Value::Lexeme(lexeme) => lexeme.to_term(),
            Value::Iri(value) => Term::Compound(Functor::Iri, vec![iri(value)]),
            Value::Text(text) => Term::Compound(
                Functor::Text,
                vec![string(&text.content), string(&text.language)],
            ),
            Value::String(value) => Term::Compound(Functor::String, vec![string(value)]),
            Value::ExternalId(value) => Term::Compound(Functor::ExternalId, vec![string(value)]),
            Value::Quantity(quantity) => Term::Compound(
                Functor::Quantity,
                vec![
                    decimal(quantity.amount),
                    optional(quantity.unit.as_ref(), Item::to_term),
                    optional(quantity.lower_bound, decimal),
                    optional(quantity.upper_bound, decimal),
                ],
            ),
            Value::Time(time) => Term::Compound(
                Functor::Time,
                vec![
                    Term::Atom(Atom::DateTime(time.lexical())),
                    optional(time.precision, |precision| {
                        Term::Atom(Atom::Integer(precision.code()))
                    }),
                    optional(time.timezone, |timezone| Term::Atom(Atom::Integer(timezone))),
                    optional(time.calendar.as_ref(), Item::to_term),
                ],
            ),
        }
    }

    /// Lowers this value to a template that matches it loosely.
    ///
    /// Absent optional fields (unit, bounds, precision, timezone, calendar) become fresh nullable
    /// variables and the range of a property is left open.
    pub fn to_pattern(&self) -> Term {
        match self {
            Value::Property(property) => property.to_pattern(),
            Value::Quantity(quantity) => Term::Compound(
                Functor::Quantity,
                vec![
                    decimal(quantity.amount),
                    optional_or_variable(quantity.unit.as_ref(), Item::to_term, "_unit", Sort::Item),
                    optional_or_variable(
                        quantity.lower_bound,
                        decimal,
                        "_lower",
                        Sort::DecimalAtom,
                    ),
                    optional_or_variable(
                        quantity.upper_bound,
                        decimal,
                        "_upper",
                        Sort::DecimalAtom,
                    ),
                ],
            ),
            Value::Time(time) => Term::Compound(
                Functor::Time,
                vec![
                    Term::Atom(Atom::DateTime(time.lexical())),
                    optional_or_variable(
                        time.precision,
                        |precision| Term::Atom(Atom::Integer(precision.code())),
                        "_precision",
                        Sort::IntegerAtom,
                    ),
                    optional_or_variable(
                        time.timezone,
                        |timezone| Term::Atom(Atom::Integer(timezone)),
                        "_timezone",
                        Sort::IntegerAtom,
                    ),
                    optional_or_variable(
                        time.calendar.as_ref(),
                        Item::to_term,
                        "_calendar",
                        Sort::Item,
                    ),
                ],
            ),
            _ => self.to_term(),
        }
    }
}

impl Snak {
    pub fn to_term(&self) -> Term {
        match self {
            Snak::Value { property, value } => {
                Term::Compound(Functor::ValueSnak, vec![property.to_term(), value.to_term()])
            }
            Snak::SomeValue { property } => {
                Term::Compound(Functor::SomeValueSnak, vec![property.to_term()])
            }
            Snak::NoValue { property } => {
                Term::Compound(Functor::NoValueSnak, vec![property.to_term()])
            }
        }
    }
}

impl Statement {
    pub fn to_term(&self) -> Term {
        Term::Compound(
            Functor::Statement,
            vec![self.subject.to_term(), self.snak.to_term()],
        )
    }
}

fn unexpected(expected: &'static str, term: &Term) -> TermError {
    if term.is_closed() {
        TermError::Unexpected {
            expected,
            term: term.to_string(),
        }
    } else {
        TermError::Open(term.to_string())
    }
}

/// Splits a compound term with the given functor into its arguments.
fn arguments<'term, const N: usize>(
    term: &'term Term,
    functor: Functor,
    expected: &'static str,
) -> Result<&'term [Term; N], TermError> {
    match term {
        Term::Compound(actual, args) if *actual == functor => args
            .as_slice()
            .try_into()
            .map_err(|_| unexpected(expected, term)),
        _ => Err(unexpected(expected, term)),
    }
}

fn raise_iri(term: &Term) -> Result<NamedNode, TermError> {
    match term {
        Term::Atom(Atom::Iri(iri)) => Ok(iri.clone()),
        _ => Err(unexpected("IRI atom", term)),
    }
}

fn raise_string(term: &Term) -> Result<String, TermError> {
    match term {
        Term::Atom(Atom::String(string)) => Ok(string.clone()),
        _ => Err(unexpected("string atom", term)),
    }
}

fn raise_decimal(term: &Term) -> Result<Decimal, TermError> {
    match term {
        Term::Atom(Atom::Decimal(decimal)) => Ok(*decimal),
        _ => Err(unexpected("decimal atom", term)),
    }
}

fn raise_integer(term: &Term) -> Result<i64, TermError> {
    match term {
        Term::Atom(Atom::Integer(integer)) => Ok(*integer),
        _ => Err(unexpected("integer atom", term)),
    }
}

fn raise_optional<T>(
    term: &Term,
    raise: impl FnOnce(&Term) -> Result<T, TermError>,
) -> Result<Option<T>, TermError> {
    match term {
        Term::Atom(Atom::None) => Ok(None),
        _ => raise(term).map(Some),
    }
}

impl TryFrom<&Term> for Item {
    type Error = TermError;

    fn try_from(term: &Term) -> Result<Self, Self::Error> {
        let [iri] = arguments::<1>(term, Functor::Item, "item")?;
        Ok(Item::new(raise_iri(iri)?))
    }
}

impl TryFrom<&Term> for Property {
    type Error = TermError;

    fn try_from(term: &Term) -> Result<Self, Self::Error> {
        let [iri, range] = arguments::<2>(term, Functor::Property, "property")?;
        let property = Property::new(raise_iri(iri)?);
        let range = raise_optional(range, |range| match range {
            Term::Atom(Atom::Datatype(datatype)) => Ok(*datatype),
            _ => Err(unexpected("datatype atom", range)),
        })?;
        Ok(match range {
            Some(range) => property.with_range(range),
            None => property,
        })
    }
}

impl TryFrom<&Term> for Lexeme {
    type Error = TermError;

    fn try_from(term: &Term) -> Result<Self, Self::Error> {
        let [iri] = arguments::<1>(term, Functor::Lexeme, "lexeme")?;
        Ok(Lexeme::new(raise_iri(iri)?))
    }
}

impl TryFrom<&Term> for Entity {
    type Error = TermError;

    fn try_from(term: &Term) -> Result<Self, Self::Error> {
        match term {
            Term::Compound(Functor::Item, _) => Item::try_from(term).map(Entity::Item),
            Term::Compound(Functor::Property, _) => Property::try_from(term).map(Entity::Property),
            Term::Compound(Functor::Lexeme, _) => Lexeme::try_from(term).map(Entity::Lexeme),
            _ => Err(unexpected("entity", term)),
        }
    }
}

impl TryFrom<&Term> for Value {
    type Error = TermError;

    fn try_from(term: &Term) -> Result<Self, Self::Error> {
        let Term::Compound(functor, _) = term else {
            return Err(unexpected("value", term));
        };
        match functor {
            Functor::Item => Item::try_from(term).map(Value::Item),
            Functor::Property => Property::try_from(term).map(Value::Property),
            Functor::Lexeme => Lexeme::try_from(term).map(Value::Lexeme),
            Functor::Iri => {
                let [value] = arguments::<1>(term, Functor::Iri, "IRI")?;
                Ok(Value::Iri(raise_iri(value)?))
            }
            Functor::Text => {
                let [content, language] = arguments::<2>(term, Functor::Text, "text")?;
                Ok(Value::Text(Text::new(
                    raise_string(content)?,
                    raise_string(language)?,
                )))
            }
            Functor::String => {
                let [value] = arguments::<1>(term, Functor::String, "string")?;
                Ok(Value::String(raise_string(value)?))
            }
            Functor::ExternalId => {
                let [value] = arguments::<1>(term, Functor::ExternalId, "external id")?;
                Ok(Value::ExternalId(raise_string(value)?))
            }
            Functor::Quantity => {
                let [amount, unit, lower, upper] =
                    arguments::<4>(term, Functor::Quantity, "quantity")?;
                Ok(Value::Quantity(Quantity {
                    amount: raise_decimal(amount)?,
                    unit: raise_optional(unit, |unit| Item::try_from(unit))?,
                    lower_bound: raise_optional(lower, raise_decimal)?,
                    upper_bound: raise_optional(upper, raise_decimal)?,
                }))
            }
            Functor::Time => {
                let [time, precision, timezone, calendar] =
                    arguments::<4>(term, Functor::Time, "time")?;
                let time = match time {
                    Term::Atom(Atom::DateTime(lexical)) => DateTime::from_str(lexical)
                        .map_err(|_| TermError::InvalidDateTime(lexical.clone()))?,
                    _ => return Err(unexpected("date time atom", time)),
                };
                let precision = raise_optional(precision, |precision| {
                    let code = raise_integer(precision)?;
                    TimePrecision::from_code(code)
                        .ok_or_else(|| unexpected("time precision", precision))
                })?;
                Ok(Value::Time(Time {
                    time,
                    precision,
                    timezone: raise_optional(timezone, raise_integer)?,
                    calendar: raise_optional(calendar, |calendar| Item::try_from(calendar))?,
                }))
            }
            Functor::ValueSnak
            | Functor::SomeValueSnak
            | Functor::NoValueSnak
            | Functor::Statement => Err(unexpected("value", term)),
        }
    }
}

impl TryFrom<&Term> for Snak {
    type Error = TermError;

    fn try_from(term: &Term) -> Result<Self, Self::Error> {
        match term {
            Term::Compound(Functor::ValueSnak, _) => {
                let [property, value] = arguments::<2>(term, Functor::ValueSnak, "value snak")?;
                Ok(Snak::Value {
                    property: Property::try_from(property)?,
                    value: Value::try_from(value)?,
                })
            }
            Term::Compound(Functor::SomeValueSnak, _) => {
                let [property] = arguments::<1>(term, Functor::SomeValueSnak, "some value snak")?;
                Ok(Snak::SomeValue {
                    property: Property::try_from(property)?,
                })
            }
            Term::Compound(Functor::NoValueSnak, _) => {
                let [property] = arguments::<1>(term, Functor::NoValueSnak, "no value snak")?;
                Ok(Snak::NoValue {
                    property: Property::try_from(property)?,
                })
            }
            _ => Err(unexpected("snak", term)),
        }
    }
}

impl TryFrom<&Term> for Statement {
    type Error = TermError;

    fn try_from(term: &Term) -> Result<Self, Self::Error> {
        let [subject, snak] = arguments::<2>(term, Functor::Statement, "statement")?;
        Ok(Statement {
            subject: Entity::try_from(subject)?,
            snak: Snak::try_from(snak)?,
        })
    }
}

impl From<Datatype> for Term {
    fn from(datatype: Datatype) -> Self {
        Term::Atom(Atom::Datatype(datatype))
    }
}
