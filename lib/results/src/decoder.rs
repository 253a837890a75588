use crate::binding::unexpected_kind;
use crate::columns::{
    AMOUNT, CALENDAR, DATATYPE, LOWER, PRECISION, PROPERTY, RANK, STATEMENT, SUBJECT, TIME,
    TIMEZONE, UNIT, UPPER, VALUE,
};
use crate::{Binding, DecodeError, ResultsPage, SomeValuePolicy};
use kif_model::vocab::{wd, xsd};
use kif_model::{
    AnnotationRecord, Datatype, DatatypeMask, Entity, Item, NamedNode, Property, Quantity, Rank,
    RdfTerm, Snak, Statement, Text, Time, TimePrecision, Value,
};

/// What the decoder knows about a query beyond its result rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeHints {
    /// The entity kinds the subject may have.
    pub subject_mask: DatatypeMask,
    /// The value of the value snaks, if the query asked for a single concrete value.
    pub value: Option<Value>,
}

impl Default for DecodeHints {
    fn default() -> Self {
        Self {
            subject_mask: DatatypeMask::ENTITY,
            value: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DecoderOptions {
    pub some_value: SomeValuePolicy,
    /// Abort a page on its first bad row instead of skipping it.
    pub strict: bool,
}

/// A statement decoded from one row, with its rank if the row carries one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedStatement {
    pub statement: Statement,
    pub rank: Option<Rank>,
    /// The statement node, if the query projects it.
    pub node: Option<NamedNode>,
    /// The qualifiers, references and rank of the statement. Only filled in for annotated
    /// filters, see [ResultsDecoder::decode_annotations].
    pub annotation: Option<AnnotationRecord>,
}

/// The decoded rows of a page, and the index and error of each row that could not be decoded.
#[derive(Debug, Default)]
pub struct DecodedPage {
    pub statements: Vec<DecodedStatement>,
    pub errors: Vec<(usize, DecodeError)>,
}

/// Converts result rows into statements.
#[derive(Clone, Debug, Default)]
pub struct ResultsDecoder {
    options: DecoderOptions,
}

impl ResultsDecoder {
    pub fn new(options: DecoderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decodes every row of `page`.
    ///
    /// Rows that cannot be decoded are collected in [DecodedPage::errors], unless the decoder is
    /// strict, in which case the first bad row fails the whole page.
    pub fn decode_page(
        &self,
        page: &ResultsPage,
        hints: &DecodeHints,
    ) -> Result<DecodedPage, DecodeError> {
        let mut decoded = DecodedPage::default();
        for (row, binding) in page.rows().enumerate() {
            match binding.and_then(|binding| self.decode(&binding, hints)) {
                Ok(statement) => decoded.statements.push(statement),
                Err(error) if self.options.strict => return Err(error),
                Err(error) => {
                    tracing::warn!(row, %error, "Skipping undecodable row");
                    decoded.errors.push((row, error));
                }
            }
        }
        Ok(decoded)
    }

    /// Decodes one row into a statement.
    pub fn decode(
        &self,
        binding: &Binding<'_>,
        hints: &DecodeHints,
    ) -> Result<DecodedStatement, DecodeError> {
        let subject = decode_subject(binding, hints.subject_mask)?;
        let property = decode_property(binding)?;
        let snak = self.decode_snak(binding, property, hints)?;
        let rank = binding.optional(RANK, |binding, variable| {
            let iri = binding.check_iri(variable)?;
            Rank::from_iri(iri.as_ref()).ok_or_else(|| unexpected_iri(variable, &iri))
        })?;
        let node = binding.optional(STATEMENT, |binding, variable| binding.check_iri(variable))?;
        Ok(DecodedStatement {
            statement: Statement::new(subject, snak),
            rank,
            node,
            annotation: None,
        })
    }

    pub(crate) fn decode_snak(
        &self,
        binding: &Binding<'_>,
        property: Property,
        hints: &DecodeHints,
    ) -> Result<Snak, DecodeError> {
        if let Some(value) = &hints.value {
            let value = match value {
                Value::Quantity(quantity) => Value::Quantity(merge_quantity(binding, quantity)?),
                Value::Time(time) => Value::Time(merge_time(binding, time)?),
                value => value.clone(),
            };
            return Ok(Snak::value(property, value));
        }
        if !binding.contains(VALUE) {
            return Ok(Snak::no_value(property));
        }
        if binding.contains(AMOUNT) {
            return Ok(Snak::value(property, decode_quantity(binding)?));
        }
        if binding.contains(TIME) {
            return Ok(Snak::value(property, decode_time(binding)?));
        }
        if self.options.some_value.is_some_value(binding.term(VALUE)?) {
            return Ok(Snak::some_value(property));
        }
        let value = decode_value(binding, VALUE, property.range())?;
        Ok(Snak::value(property, value))
    }
}

fn decode_subject(binding: &Binding<'_>, mask: DatatypeMask) -> Result<Entity, DecodeError> {
    let iri = binding.check_iri(SUBJECT)?;
    if mask.single().is_none() {
        if let Some(entity) = Entity::from_wikidata_iri(iri.as_ref()) {
            if mask.contains(entity.datatype()) {
                return Ok(entity);
            }
        }
    }
    Ok(Entity::from_iri_with_mask(iri, mask))
}

/// Decodes the property column, with the range given by the datatype column if bound.
pub(crate) fn decode_property(binding: &Binding<'_>) -> Result<Property, DecodeError> {
    let property = Property::new(binding.check_iri(PROPERTY)?);
    Ok(match binding.optional(DATATYPE, decode_datatype)? {
        Some(range) => property.with_range(range),
        None => property,
    })
}

fn decode_datatype(binding: &Binding<'_>, variable: &str) -> Result<Datatype, DecodeError> {
    let iri = binding.check_iri(variable)?;
    Datatype::from_iri(iri.as_ref()).ok_or_else(|| unexpected_iri(variable, &iri))
}

/// Converts a plain RDF term into a value, guided by the datatype of the property if known.
fn decode_value(
    binding: &Binding<'_>,
    variable: &str,
    datatype: Option<Datatype>,
) -> Result<Value, DecodeError> {
    let term = binding.term(variable)?;
    match term {
        RdfTerm::NamedNode(iri) => match datatype {
            Some(Datatype::Iri) => Ok(Value::Iri(iri.clone())),
            Some(datatype) if datatype.is_entity() => {
                Ok(Entity::from_iri_with_mask(iri.clone(), datatype.mask()).into())
            }
            Some(_) => Err(unexpected_kind(variable, "a literal", term)),
            None => Ok(Entity::from_wikidata_iri(iri.as_ref())
                .map_or_else(|| Value::Iri(iri.clone()), Value::from)),
        },
        RdfTerm::Literal(literal) => {
            if let Some(language) = literal.language() {
                return Ok(Text::new(literal.value(), language).into());
            }
            let literal_datatype = literal.datatype();
            if literal_datatype == xsd::DATE_TIME {
                Ok(Time::new(binding.check_datetime(variable)?).into())
            } else if literal_datatype == xsd::DECIMAL || literal_datatype == xsd::INTEGER {
                Ok(Quantity::new(binding.check_decimal(variable)?).into())
            } else {
                let content = binding.check_string(variable)?;
                Ok(match datatype {
                    Some(Datatype::ExternalId) => Value::ExternalId(content),
                    _ => Value::String(content),
                })
            }
        }
        _ => Err(unexpected_kind(variable, "an IRI or a literal", term)),
    }
}

fn decode_unit(binding: &Binding<'_>) -> Result<Option<Item>, DecodeError> {
    let unit = binding.optional(UNIT, |binding, variable| binding.check_iri(variable))?;
    // The unit "1" marks dimensionless quantities.
    Ok(unit.filter(|unit| *unit != wd::ONE).map(Item::new))
}

fn decode_quantity(binding: &Binding<'_>) -> Result<Quantity, DecodeError> {
    Ok(Quantity {
        amount: binding.check_decimal(AMOUNT)?,
        unit: decode_unit(binding)?,
        lower_bound: binding.optional(LOWER, |binding, variable| binding.check_decimal(variable))?,
        upper_bound: binding.optional(UPPER, |binding, variable| binding.check_decimal(variable))?,
    })
}

/// Completes an explicit quantity with the fields carried by the row.
fn merge_quantity(binding: &Binding<'_>, quantity: &Quantity) -> Result<Quantity, DecodeError> {
    let lower = binding.optional(LOWER, |binding, variable| binding.check_decimal(variable))?;
    let upper = binding.optional(UPPER, |binding, variable| binding.check_decimal(variable))?;
    Ok(Quantity {
        amount: quantity.amount,
        unit: decode_unit(binding)?.or_else(|| quantity.unit.clone()),
        lower_bound: lower.or(quantity.lower_bound),
        upper_bound: upper.or(quantity.upper_bound),
    })
}

fn decode_precision(
    binding: &Binding<'_>,
) -> Result<Option<TimePrecision>, DecodeError> {
    binding.optional(PRECISION, |binding, variable| {
        let code = binding.check_integer(variable)?;
        TimePrecision::from_code(code).ok_or_else(|| DecodeError::InvalidLexicalForm {
            variable: variable.to_owned(),
            value: code.to_string(),
        })
    })
}

fn decode_calendar(binding: &Binding<'_>) -> Result<Option<Item>, DecodeError> {
    let calendar = binding.optional(CALENDAR, |binding, variable| binding.check_iri(variable))?;
    Ok(calendar.map(Item::new))
}

fn decode_time(binding: &Binding<'_>) -> Result<Time, DecodeError> {
    Ok(Time {
        time: binding.check_datetime(TIME)?,
        precision: decode_precision(binding)?,
        timezone: binding.optional(TIMEZONE, |binding, variable| binding.check_integer(variable))?,
        calendar: decode_calendar(binding)?,
    })
}

/// Completes an explicit time with the fields carried by the row.
fn merge_time(binding: &Binding<'_>, time: &Time) -> Result<Time, DecodeError> {
    let timezone =
        binding.optional(TIMEZONE, |binding, variable| binding.check_integer(variable))?;
    Ok(Time {
        time: time.time,
        precision: decode_precision(binding)?.or(time.precision),
        timezone: timezone.or(time.timezone),
        calendar: decode_calendar(binding)?.or_else(|| time.calendar.clone()),
    })
}

fn unexpected_iri(variable: &str, iri: &NamedNode) -> DecodeError {
    DecodeError::UnexpectedIri {
        variable: variable.to_owned(),
        iri: iri.as_str().to_owned(),
    }
}
