use crate::{CompileError, MappingEntry, MappingRegistry, PropertySchema, RuleArgs, Skip};
use kif_filter::{Filter, Fingerprint, SlotConstraint};
use kif_model::{DatatypeMask, NamedNode, Property, Snak, SnakMask, Value, Variable};
use kif_results::{columns, DecodeHints};
use kif_sparql::{Expression, QueryBuilder};
use std::sync::Arc;

/// Options of a single compilation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub distinct: bool,
}

/// A query compiled from a filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledQuery {
    /// The text of the SPARQL query.
    pub text: String,
    /// The projected output columns.
    pub variables: Vec<Variable>,
    /// How to decode the rows of the results.
    pub hints: DecodeHints,
}

/// Compiles filters into SPARQL queries using a [MappingRegistry].
///
/// The compiler holds no mutable state: one compiler may serve any number of compilations,
/// concurrently if need be.
#[derive(Clone)]
pub struct FilterCompiler {
    registry: Arc<MappingRegistry>,
    schema: Option<Arc<dyn PropertySchema>>,
}

/// One combination of slot candidates, compiled into one union branch per accepting entry.
struct Request {
    subject: SlotConstraint,
    property: Option<Property>,
    /// The snaks required of the property entity.
    property_snaks: Vec<Snak>,
    value: SlotConstraint,
}

impl FilterCompiler {
    pub fn new(registry: Arc<MappingRegistry>) -> Self {
        Self {
            registry,
            schema: None,
        }
    }

    /// Uses `schema` to look up the ranges of properties whose range the filter does not state.
    #[must_use]
    pub fn with_schema(self, schema: Arc<dyn PropertySchema>) -> Self {
        Self {
            schema: Some(schema),
            ..self
        }
    }

    pub fn registry(&self) -> &MappingRegistry {
        &self.registry
    }

    /// Compiles `filter` into a query.
    ///
    /// Returns `Ok(None)` if the filter statically matches nothing, in which case there is no
    /// need to query the store at all. Fails if no mapping entry accepts the filter.
    pub fn compile(
        &self,
        filter: &Filter,
        options: &CompileOptions,
    ) -> Result<Option<CompiledQuery>, CompileError> {
        let filter = filter.normalize();
        if filter.is_empty() {
            tracing::debug!("The filter is empty, skipping compilation");
            return Ok(None);
        }

        let subjects = slot_candidates(filter.subject(), filter.subject_mask());
        let properties = slot_candidates(filter.property(), filter.property_mask());
        let values = slot_candidates(filter.value(), filter.value_mask());
        let mut requests = Vec::new();
        for subject in &subjects {
            for candidate in &properties {
                let property = match candidate.single_value() {
                    Some(Value::Property(property)) => Some(self.with_range(property)),
                    Some(_) => continue,
                    None => None,
                };
                for value in &values {
                    requests.push(Request {
                        subject: subject.clone(),
                        property: property.clone(),
                        property_snaks: candidate.snaks.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        let mut builder = QueryBuilder::new();
        let mut accepted = 0;
        let mut aux = 0;
        builder.union(|builder| {
            for request in &requests {
                for entry in self.registry.lookup(request.property.as_ref()) {
                    let Some(args) = self.args(entry, request, &filter, String::new()) else {
                        continue;
                    };
                    let result = builder.try_group(|builder| {
                        entry.apply(builder, &args)?;
                        self.compile_request_snaks(builder, request, &mut aux)
                    });
                    match result {
                        Ok(()) => accepted += 1,
                        Err(skip) => tracing::debug!(
                            entry = ?entry.pattern().property,
                            datatype = ?entry.datatype(),
                            reason = %skip,
                            "Skipping mapping entry"
                        ),
                    }
                }
            }
        });
        if accepted == 0 {
            return Err(CompileError::NoMatchingEntry {
                property: describe_property(&properties),
            });
        }

        if options.distinct {
            builder.distinct();
        }
        if let Some(limit) = options.limit {
            builder.limit(limit);
        }
        if let Some(offset) = options.offset {
            builder.offset(offset);
        }
        let mut variables = columns::ALL
            .iter()
            .map(|column| Variable::new_unchecked(*column))
            .filter(|variable| builder.is_known(variable))
            .collect::<Vec<_>>();
        // The statement node keys the annotations fetched afterwards.
        let statement = Variable::new_unchecked(columns::STATEMENT);
        if filter.is_annotated() && builder.is_known(&statement) {
            variables.push(statement);
        }
        let text = builder.select(&variables)?;
        tracing::trace!(query = %text, "Compiled filter");

        Ok(Some(CompiledQuery {
            text,
            variables,
            hints: DecodeHints {
                subject_mask: filter.subject_mask(),
                value: single_value(&values),
            },
        }))
    }

    /// Compiles the query of the qualifiers and references of the given statement nodes.
    ///
    /// Returns `Ok(None)` if there are no nodes, or if the registry has no
    /// [AnnotationRule](crate::AnnotationRule), in which case statements have no annotations
    /// besides their rank.
    pub fn compile_annotations(
        &self,
        statements: &[NamedNode],
    ) -> Result<Option<CompiledQuery>, CompileError> {
        let Some(rule) = self.registry.annotations() else {
            return Ok(None);
        };
        if statements.is_empty() {
            return Ok(None);
        }

        let mut builder = QueryBuilder::new();
        let statement = builder.var(columns::STATEMENT);
        builder.values(&statement, statements.iter().cloned());
        rule(&mut builder, &statement);
        builder.distinct();
        let variables = columns::ANNOTATION
            .iter()
            .map(|column| Variable::new_unchecked(*column))
            .filter(|variable| builder.is_known(variable))
            .collect::<Vec<_>>();
        let text = builder.select(&variables)?;
        tracing::trace!(query = %text, statements = statements.len(), "Compiled annotations");

        Ok(Some(CompiledQuery {
            text,
            variables,
            hints: DecodeHints::default(),
        }))
    }

    /// The arguments of `entry` for `request`, or [None] if the entry cannot apply.
    fn args<'a>(
        &self,
        entry: &'a MappingEntry,
        request: &'a Request,
        filter: &'a Filter,
        prefix: String,
    ) -> Option<RuleArgs<'a>> {
        let pattern = entry.pattern();
        let subject = Fingerprint::And(vec![
            constraint_fingerprint(&request.subject),
            pattern.subject.clone(),
        ]);
        if subject.normalize(request.subject.mask).is_empty() {
            return None;
        }

        let property = match (&pattern.property, &request.property) {
            (Some(fixed), Some(requested)) => {
                if !fixed.same_iri(requested) {
                    return None;
                }
                Some(requested.clone())
            }
            (Some(fixed), None) => Some(self.with_range(fixed)),
            (None, requested) => requested.clone(),
        };
        let range = property.as_ref().and_then(Property::range);
        if let Some(datatype) = entry.datatype() {
            let compatible = request.value.mask.contains(datatype)
                && request
                    .value
                    .single_value()
                    .map_or(true, |value| value.datatype() == datatype)
                && range.map_or(true, |range| range == datatype);
            if !compatible {
                return None;
            }
        }
        let property = match (property, entry.datatype()) {
            (Some(property), Some(datatype)) if property.range().is_none() => {
                Some(property.with_range(datatype))
            }
            (property, _) => property,
        };

        Some(RuleArgs {
            subject: &request.subject,
            property,
            value: &request.value,
            datatype: entry.datatype(),
            snak_mask: filter.snak_mask(),
            rank_mask: filter.rank_mask(),
            language: filter.language(),
            params: entry.params(),
            prefix,
        })
    }

    /// Requires the entities in the slots of `request` to have the statements its snaks ask for.
    fn compile_request_snaks(
        &self,
        builder: &mut QueryBuilder,
        request: &Request,
        aux: &mut usize,
    ) -> Result<(), Skip> {
        let slots = [
            ('s', columns::SUBJECT, &request.subject.snaks, request.subject.mask),
            ('p', columns::PROPERTY, &request.property_snaks, DatatypeMask::PROPERTY),
            ('v', columns::VALUE, &request.value.snaks, request.value.mask),
        ];
        for (tag, column, snaks, mask) in slots {
            self.compile_snaks(builder, tag, column, snaks, mask, aux)?;
        }
        Ok(())
    }

    /// Requires the entity bound to `column` to have a statement for each of `snaks`.
    ///
    /// Each snak is compiled with the first entry of its property that accepts it, into a
    /// group of its own whose subject is then equated with `column`. The variables of the group
    /// are prefixed by `tag` and a counter, e.g. `?v0_statement`.
    fn compile_snaks(
        &self,
        builder: &mut QueryBuilder,
        tag: char,
        column: &str,
        snaks: &[Snak],
        mask: DatatypeMask,
        aux: &mut usize,
    ) -> Result<(), Skip> {
        for snak in snaks {
            let prefix = format!("{tag}{aux}_");
            *aux += 1;
            let request = snak_request(snak, mask & DatatypeMask::ENTITY);
            let filter = Filter::new().with_snak_mask(SnakMask::from(snak.kind()));
            let accepted = !request.subject.mask.is_empty()
                && self
                    .registry
                    .lookup(request.property.as_ref())
                    .into_iter()
                    .filter_map(|entry| {
                        self.args(entry, &request, &filter, prefix.clone())
                            .map(|args| (entry, args))
                    })
                    .any(|(entry, args)| {
                        builder
                            .try_group(|builder| entry.apply(builder, &args))
                            .is_ok()
                    });
            if !accepted {
                return Err(Skip::new(format!("no entry accepts the {column} snak {snak}")));
            }
            let aux_subject = builder.var(&format!("{prefix}{}", columns::SUBJECT));
            let entity = builder.var(column);
            builder.filter(Expression::equal(&aux_subject, &entity));
        }
        Ok(())
    }

    fn with_range(&self, property: &Property) -> Property {
        if property.range().is_some() {
            return property.clone();
        }
        match self.schema.as_ref().and_then(|schema| schema.range(property)) {
            Some(range) => property.clone().with_range(range),
            None => property.clone(),
        }
    }
}

/// Expands a slot into candidates holding at most one concrete value each.
fn slot_candidates(fingerprint: Option<&Fingerprint>, mask: DatatypeMask) -> Vec<SlotConstraint> {
    let constraints = match fingerprint {
        Some(fingerprint) => fingerprint.expand(),
        None => vec![SlotConstraint::any(mask)],
    };
    let mut candidates = Vec::new();
    for constraint in constraints {
        let mask = constraint.mask & mask;
        if mask.is_empty() {
            continue;
        }
        match &constraint.values {
            None => candidates.push(SlotConstraint {
                values: None,
                mask,
                snaks: constraint.snaks.clone(),
            }),
            Some(values) => candidates.extend(
                values
                    .iter()
                    .filter(|value| mask.contains(value.datatype()))
                    .map(|value| SlotConstraint {
                        values: Some(vec![value.clone()]),
                        mask: mask & value.datatype().mask(),
                        snaks: constraint.snaks.clone(),
                    }),
            ),
        }
    }
    candidates
}

fn constraint_fingerprint(constraint: &SlotConstraint) -> Fingerprint {
    let mut children = vec![Fingerprint::Datatype(constraint.mask)];
    if let Some(value) = constraint.single_value() {
        children.push(Fingerprint::Value(value.clone()));
    }
    Fingerprint::And(children)
}

/// The request of the statements with snak `snak` about the subjects in `mask`.
fn snak_request(snak: &Snak, mask: DatatypeMask) -> Request {
    let value = match snak.as_value() {
        Some(value) => SlotConstraint {
            values: Some(vec![value.clone()]),
            mask: value.datatype().mask(),
            snaks: Vec::new(),
        },
        None => SlotConstraint::any(DatatypeMask::ALL),
    };
    Request {
        subject: SlotConstraint::any(mask),
        property: Some(snak.property().clone()),
        property_snaks: Vec::new(),
        value,
    }
}

/// The value of the value slot if every candidate is the same concrete value.
fn single_value(values: &[SlotConstraint]) -> Option<Value> {
    match values {
        [value] => value.single_value().cloned(),
        _ => None,
    }
}

fn describe_property(properties: &[SlotConstraint]) -> String {
    match properties {
        [property] => match property.single_value() {
            Some(Value::Property(property)) => property.iri().to_string(),
            _ => "?property".to_owned(),
        },
        _ => "?property".to_owned(),
    }
}

impl std::fmt::Debug for FilterCompiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterCompiler")
            .field("registry", &self.registry)
            .field("schema", &self.schema.is_some())
            .finish()
    }
}
