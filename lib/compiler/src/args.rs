use crate::{EntryParams, Skip};
use kif_filter::SlotConstraint;
use kif_model::term::{unify, Atom, Functor, Sort, Term, Variable as TermVariable};
use kif_model::{
    Datatype, DatatypeMask, Literal, NamedNode, Property, RankMask, RdfTerm, SnakMask,
    TermPattern, Value, Variable,
};
use kif_results::columns;
use kif_sparql::{Expression, QueryBuilder};

/// The request handed to the handler of a mapping entry.
///
/// Each slot holds at most one concrete candidate. The helpers check the request against the
/// static parameters of the entry and emit the patterns that bind the output columns, so that
/// every result row can be decoded on its own.
#[derive(Debug)]
pub struct RuleArgs<'a> {
    pub(crate) subject: &'a SlotConstraint,
    pub(crate) property: Option<Property>,
    pub(crate) value: &'a SlotConstraint,
    pub(crate) datatype: Option<Datatype>,
    pub(crate) snak_mask: SnakMask,
    pub(crate) rank_mask: RankMask,
    pub(crate) language: Option<&'a str>,
    pub(crate) params: &'a EntryParams,
    /// Prepended to the names of the variables bound by the handler.
    pub(crate) prefix: String,
}

impl RuleArgs<'_> {
    /// The concrete subject, if any.
    pub fn subject(&self) -> Option<&Value> {
        self.subject.single_value()
    }

    pub fn subject_mask(&self) -> DatatypeMask {
        self.subject.mask
    }

    /// The property of the statements. [None] if it is left open.
    pub fn property(&self) -> Option<&Property> {
        self.property.as_ref()
    }

    /// The concrete value, if any.
    pub fn value(&self) -> Option<&Value> {
        self.value.single_value()
    }

    /// The datatypes the value may have.
    pub fn value_mask(&self) -> DatatypeMask {
        let mut mask = self.value.mask;
        if let Some(datatype) = self.datatype {
            mask = mask & datatype.mask();
        }
        if let Some(range) = self.property.as_ref().and_then(Property::range) {
            mask = mask & range.mask();
        }
        mask
    }

    pub fn snak_mask(&self) -> SnakMask {
        self.snak_mask
    }

    pub fn rank_mask(&self) -> RankMask {
        self.rank_mask
    }

    /// The language text values are restricted to.
    pub fn language(&self) -> Option<&str> {
        self.language
    }

    pub fn params(&self) -> &EntryParams {
        self.params
    }

    /// Returns the variable of the output column (or auxiliary variable) with the given name.
    pub fn var(&self, builder: &mut QueryBuilder, name: &str) -> Variable {
        builder.var(&format!("{}{name}", self.prefix))
    }

    /// Skips unless value snaks are requested.
    ///
    /// Entries that cannot represent unknown or absent values call this first.
    pub fn require_value_snaks(&self) -> Result<(), Skip> {
        if self.snak_mask.contains_all(SnakMask::VALUE_SNAK) {
            Ok(())
        } else {
            Err(Skip::new("only value snaks are supported"))
        }
    }

    /// Skips unless normal-rank statements are requested.
    ///
    /// Entries of stores without ranks call this, as their statements count as normal ones.
    pub fn require_normal_rank(&self) -> Result<(), Skip> {
        if self.rank_mask.contains(kif_model::Rank::Normal) {
            Ok(())
        } else {
            Err(Skip::new("statements have normal rank"))
        }
    }

    /// Skips if the concrete value cannot be represented under the static parameters.
    ///
    /// The candidate is matched loosely: fields it leaves open may take any value, including
    /// the ones fixed by the parameters.
    pub fn check_value(&self) -> Result<(), Skip> {
        let Some(value) = self.value() else {
            return Ok(());
        };
        let Some(datatype) = self.datatype else {
            return Ok(());
        };
        let template = value_template(datatype, self.params);
        match unify([(template, value.to_pattern())]) {
            Some(_) => Ok(()),
            None => Err(Skip::new(format!(
                "{value} does not fit the entry ({datatype})"
            ))),
        }
    }

    /// Returns the subject as it is written in the store.
    ///
    /// A concrete subject is rewritten into the local namespace. An open subject is a variable,
    /// which [RuleArgs::bind_subject] later binds to the output column.
    pub fn subject_pattern(&self, builder: &mut QueryBuilder) -> Result<TermPattern, Skip> {
        let Some(subject) = self.subject() else {
            return Ok(match &self.params.subject_rewrite {
                Some(_) => self.var(builder, "subject_local").into(),
                None => self.var(builder, columns::SUBJECT).into(),
            });
        };
        let entity = subject
            .as_entity()
            .ok_or_else(|| Skip::new(format!("{subject} is not an entity")))?;
        let iri = match &self.params.subject_rewrite {
            Some(rewrite) => rewrite
                .to_local(entity.iri())
                .ok_or_else(|| Skip::new(format!("{entity} is outside of the namespace")))?,
            None => entity.iri().clone(),
        };
        Ok(iri.into())
    }

    /// Binds the subject column given the pattern returned by [RuleArgs::subject_pattern].
    ///
    /// Must be called after the patterns that bind the subject pattern.
    pub fn bind_subject(&self, builder: &mut QueryBuilder, pattern: &TermPattern) {
        let subject = self.var(builder, columns::SUBJECT);
        if let Some(entity) = self.subject().and_then(Value::as_entity) {
            builder.values(&subject, [entity.iri().clone()]);
            return;
        }
        if let (Some(rewrite), TermPattern::Variable(local)) =
            (&self.params.subject_rewrite, pattern)
        {
            builder.filter(rewrite.is_local_expression(local));
            builder.bind(rewrite.to_canonical_expression(local), &subject);
        }
    }

    /// Binds the property and datatype columns of an entry with a fixed property.
    pub fn bind_property(&self, builder: &mut QueryBuilder) -> Result<NamedNode, Skip> {
        let property = self
            .property
            .as_ref()
            .ok_or_else(|| Skip::new("the entry has no fixed property"))?;
        let column = self.var(builder, columns::PROPERTY);
        builder.values(&column, [property.iri().clone()]);
        if let Some(datatype) = self.datatype {
            let column = self.var(builder, columns::DATATYPE);
            builder.values(&column, [NamedNode::from(datatype.iri())]);
        }
        Ok(property.iri().clone())
    }

    /// Returns the concrete value as an RDF term of the store, if it has a shallow one.
    ///
    /// Entity and IRI values are rewritten into the local namespace. Quantities and times
    /// have no single term and yield [None].
    pub fn value_term(&self) -> Result<Option<RdfTerm>, Skip> {
        let Some(value) = self.value() else {
            return Ok(None);
        };
        let term: RdfTerm = match value {
            Value::Item(_) | Value::Property(_) | Value::Lexeme(_) | Value::Iri(_) => {
                let Some(iri) = value.iri() else {
                    return Ok(None);
                };
                match &self.params.value_rewrite {
                    Some(rewrite) => rewrite
                        .to_local(iri)
                        .ok_or_else(|| Skip::new(format!("{value} is outside of the namespace")))?
                        .into(),
                    None => iri.clone().into(),
                }
            }
            Value::Text(text) => {
                Literal::new_language_tagged_literal_unchecked(&text.content, &text.language)
                    .into()
            }
            Value::String(content) | Value::ExternalId(content) => {
                Literal::new_simple_literal(content).into()
            }
            Value::Quantity(_) | Value::Time(_) => return Ok(None),
        };
        Ok(Some(term))
    }

    /// Binds the value column to the term bound to `local`, converting it as the parameters
    /// require: IRIs are rewritten into the canonical namespace and literals are given the
    /// output datatype or language.
    pub fn bind_value(&self, builder: &mut QueryBuilder, local: &Variable) -> Variable {
        let value = self.var(builder, columns::VALUE);
        let params = self.params;
        let expression = if let Some(rewrite) = &params.value_rewrite {
            rewrite.to_canonical_expression(local)
        } else if let Some(datatype) = &params.literal_datatype {
            Expression::strdt(Expression::str(local), datatype.clone())
        } else if let Some(language) = &params.language {
            Expression::strlang(Expression::str(local), language.as_str())
        } else {
            Expression::from(local)
        };
        builder.bind(expression, &value);
        value
    }

    /// Restricts `variable` to the concrete value, if any.
    ///
    /// Literals are compared by value, as stores may write them in different lexical forms.
    pub fn restrict_value(
        &self,
        builder: &mut QueryBuilder,
        variable: &Variable,
    ) -> Result<(), Skip> {
        match self.value() {
            Some(Value::Quantity(quantity)) => {
                builder.filter(Expression::equal(variable, decimal(quantity.amount)));
            }
            Some(Value::Time(time)) => {
                builder.filter(Expression::equal(
                    variable,
                    Literal::new_typed_literal(time.lexical(), kif_model::vocab::xsd::DATE_TIME),
                ));
            }
            Some(_) => {
                if let Some(term) = self.value_term()? {
                    builder.values(variable, [term]);
                }
            }
            None => {}
        }
        Ok(())
    }
}

/// An `xsd:decimal` literal.
pub(crate) fn decimal(value: kif_model::Decimal) -> Literal {
    Literal::new_typed_literal(value.to_string(), kif_model::vocab::xsd::DECIMAL)
}

fn sort(datatype: Datatype) -> Sort {
    match datatype {
        Datatype::Item => Sort::Item,
        Datatype::Property => Sort::Property,
        Datatype::Lexeme => Sort::Lexeme,
        Datatype::Iri => Sort::Iri,
        Datatype::Text => Sort::Text,
        Datatype::String => Sort::String,
        Datatype::ExternalId => Sort::ExternalId,
        Datatype::Quantity => Sort::Quantity,
        Datatype::Time => Sort::Time,
    }
}

/// The template of the values an entry can store.
///
/// Fields fixed by the parameters are ground, fields the store does not carry are absent and
/// all other fields are open.
fn value_template(datatype: Datatype, params: &EntryParams) -> Term {
    let open = |name: &str, sort: Sort| Term::Variable(TermVariable::optional(name, sort));
    let fixed_or_open = |field: Option<Term>, name: &str, sort: Sort| {
        field.unwrap_or_else(|| open(name, sort))
    };
    match datatype {
        Datatype::Quantity => {
            let bound = |name: &str| {
                if params.bounds {
                    open(name, Sort::DecimalAtom)
                } else {
                    Term::Atom(Atom::None)
                }
            };
            Term::Compound(
                Functor::Quantity,
                vec![
                    Term::Variable(TermVariable::new("amount", Sort::DecimalAtom)),
                    fixed_or_open(
                        params.unit.as_ref().map(kif_model::Item::to_term),
                        "unit",
                        Sort::Item,
                    ),
                    bound("lower"),
                    bound("upper"),
                ],
            )
        }
        Datatype::Time => Term::Compound(
            Functor::Time,
            vec![
                Term::Variable(TermVariable::new("time", Sort::DateTimeAtom)),
                fixed_or_open(
                    params
                        .precision
                        .map(|precision| Term::Atom(Atom::Integer(precision.code()))),
                    "precision",
                    Sort::IntegerAtom,
                ),
                fixed_or_open(
                    params.timezone.map(|timezone| Term::Atom(Atom::Integer(timezone))),
                    "timezone",
                    Sort::IntegerAtom,
                ),
                fixed_or_open(
                    params.calendar.as_ref().map(kif_model::Item::to_term),
                    "calendar",
                    Sort::Item,
                ),
            ],
        ),
        datatype => Term::Variable(TermVariable::new("value", sort(datatype))),
    }
}
