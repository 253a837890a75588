use crate::DecodeError;
use kif_model::vocab::xsd;
use kif_model::{BlankNode, DateTime, Decimal, Literal, NamedNode, RdfTerm};
use sparesults::QuerySolution;
use std::str::FromStr;

/// One row of a result page.
///
/// The `check_*` accessors never coerce: they fail if the variable is unbound, is bound to a term
/// of another kind or to a literal of another datatype.
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    solution: &'a QuerySolution,
}

impl<'a> Binding<'a> {
    pub fn new(solution: &'a QuerySolution) -> Self {
        Self { solution }
    }

    pub fn get(&self, variable: &str) -> Option<&'a RdfTerm> {
        self.solution.get(variable)
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.get(variable).is_some()
    }

    /// Returns the term bound to `variable`.
    pub fn term(&self, variable: &str) -> Result<&'a RdfTerm, DecodeError> {
        self.get(variable)
            .ok_or_else(|| DecodeError::MissingVariable {
                variable: variable.to_owned(),
            })
    }

    pub fn check_iri(&self, variable: &str) -> Result<NamedNode, DecodeError> {
        match self.term(variable)? {
            RdfTerm::NamedNode(iri) => Ok(iri.clone()),
            term => Err(unexpected_kind(variable, "an IRI", term)),
        }
    }

    pub fn check_bnode(&self, variable: &str) -> Result<BlankNode, DecodeError> {
        match self.term(variable)? {
            RdfTerm::BlankNode(node) => Ok(node.clone()),
            term => Err(unexpected_kind(variable, "a blank node", term)),
        }
    }

    pub fn check_literal(&self, variable: &str) -> Result<&'a Literal, DecodeError> {
        match self.term(variable)? {
            RdfTerm::Literal(literal) => Ok(literal),
            term => Err(unexpected_kind(variable, "a literal", term)),
        }
    }

    /// Returns the lexical form of an `xsd:string` literal.
    pub fn check_string(&self, variable: &str) -> Result<String, DecodeError> {
        let literal = self.check_typed(variable, &[xsd::STRING], "xsd:string")?;
        Ok(literal.value().to_owned())
    }

    /// Returns the value of an `xsd:decimal` or `xsd:integer` literal.
    pub fn check_decimal(&self, variable: &str) -> Result<Decimal, DecodeError> {
        let literal =
            self.check_typed(variable, &[xsd::DECIMAL, xsd::INTEGER], "xsd:decimal")?;
        Decimal::from_str(literal.value()).map_err(|_| invalid(variable, literal))
    }

    pub fn check_integer(&self, variable: &str) -> Result<i64, DecodeError> {
        let literal = self.check_typed(variable, &[xsd::INTEGER, xsd::INT], "xsd:integer")?;
        i64::from_str(literal.value()).map_err(|_| invalid(variable, literal))
    }

    /// Returns the wall-clock value of an `xsd:dateTime` literal.
    ///
    /// A leading `+`, which some stores emit, is dropped while a leading `-` is kept, so years
    /// before the common era stay negative. The timezone of the literal is replaced by UTC without
    /// shifting the wall-clock value, as the offset of a time value is carried in a separate column.
    pub fn check_datetime(&self, variable: &str) -> Result<DateTime, DecodeError> {
        let literal = self.check_typed(variable, &[xsd::DATE_TIME], "xsd:dateTime")?;
        let lexical = literal.value();
        let local = strip_timezone(lexical.strip_prefix('+').unwrap_or(lexical));
        DateTime::from_str(&format!("{local}Z")).map_err(|_| invalid(variable, literal))
    }

    /// Applies `check` to `variable` if it is bound.
    pub fn optional<T>(
        &self,
        variable: &str,
        check: impl FnOnce(&Self, &str) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        if self.contains(variable) {
            check(self, variable).map(Some)
        } else {
            Ok(None)
        }
    }

    fn check_typed(
        &self,
        variable: &str,
        datatypes: &[kif_model::NamedNodeRef<'_>],
        expected: &'static str,
    ) -> Result<&'a Literal, DecodeError> {
        let literal = self.check_literal(variable)?;
        if datatypes.contains(&literal.datatype()) {
            Ok(literal)
        } else {
            Err(DecodeError::UnexpectedDatatype {
                variable: variable.to_owned(),
                expected,
                actual: literal.datatype().as_str().to_owned(),
            })
        }
    }
}

fn strip_timezone(lexical: &str) -> &str {
    if let Some(local) = lexical.strip_suffix('Z') {
        return local;
    }
    let bytes = lexical.as_bytes();
    let n = bytes.len();
    if n > 6 && matches!(bytes[n - 6], b'+' | b'-') && bytes[n - 3] == b':' {
        return &lexical[..n - 6];
    }
    lexical
}

pub(crate) fn term_kind(term: &RdfTerm) -> &'static str {
    // The triple variant only exists with RDF-star enabled.
    if term.is_named_node() {
        "an IRI"
    } else if term.is_blank_node() {
        "a blank node"
    } else if term.is_literal() {
        "a literal"
    } else {
        "a triple"
    }
}

pub(crate) fn unexpected_kind(
    variable: &str,
    expected: &'static str,
    term: &RdfTerm,
) -> DecodeError {
    DecodeError::UnexpectedTermKind {
        variable: variable.to_owned(),
        expected,
        actual: term_kind(term),
    }
}

fn invalid(variable: &str, literal: &Literal) -> DecodeError {
    DecodeError::InvalidLexicalForm {
        variable: variable.to_owned(),
        value: literal.value().to_owned(),
    }
}
