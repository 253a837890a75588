use itertools::Itertools;
use kif_model::{Literal, NamedNode, Variable};
use std::fmt;

/// A SPARQL expression, as used in `bind` and `filter`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expression {
    Variable(Variable),
    NamedNode(NamedNode),
    Literal(Literal),
    /// [CONCAT](https://www.w3.org/TR/sparql11-query/#func-concat)
    Concat(Vec<Expression>),
    /// [SUBSTR](https://www.w3.org/TR/sparql11-query/#func-substr)
    Substr(Box<Expression>, Box<Expression>, Option<Box<Expression>>),
    /// [STR](https://www.w3.org/TR/sparql11-query/#func-str)
    Str(Box<Expression>),
    /// [IRI](https://www.w3.org/TR/sparql11-query/#func-iri)
    Iri(Box<Expression>),
    /// [STRSTARTS](https://www.w3.org/TR/sparql11-query/#func-strstarts)
    StrStarts(Box<Expression>, Box<Expression>),
    /// [LANG](https://www.w3.org/TR/sparql11-query/#func-lang)
    Lang(Box<Expression>),
    /// [isBLANK](https://www.w3.org/TR/sparql11-query/#func-isBlank)
    IsBlank(Box<Expression>),
    /// [STRDT](https://www.w3.org/TR/sparql11-query/#func-strdt)
    StrDt(Box<Expression>, NamedNode),
    /// [STRLANG](https://www.w3.org/TR/sparql11-query/#func-strlang)
    StrLang(Box<Expression>, String),
    Equal(Box<Expression>, Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
}

impl Expression {
    pub fn concat(args: impl IntoIterator<Item = impl Into<Expression>>) -> Self {
        Expression::Concat(args.into_iter().map(Into::into).collect())
    }

    /// The substring of `arg` starting at the 1-based position `start`.
    pub fn substr(arg: impl Into<Expression>, start: usize) -> Self {
        Expression::Substr(Box::new(arg.into()), Box::new(integer(start)), None)
    }

    pub fn substr_with_length(arg: impl Into<Expression>, start: usize, length: usize) -> Self {
        Expression::Substr(
            Box::new(arg.into()),
            Box::new(integer(start)),
            Some(Box::new(integer(length))),
        )
    }

    pub fn str(arg: impl Into<Expression>) -> Self {
        Expression::Str(Box::new(arg.into()))
    }

    pub fn iri(arg: impl Into<Expression>) -> Self {
        Expression::Iri(Box::new(arg.into()))
    }

    pub fn strstarts(arg: impl Into<Expression>, prefix: impl Into<Expression>) -> Self {
        Expression::StrStarts(Box::new(arg.into()), Box::new(prefix.into()))
    }

    pub fn lang(arg: impl Into<Expression>) -> Self {
        Expression::Lang(Box::new(arg.into()))
    }

    pub fn is_blank(arg: impl Into<Expression>) -> Self {
        Expression::IsBlank(Box::new(arg.into()))
    }

    /// A literal with the lexical form of `arg` and the given datatype.
    pub fn strdt(arg: impl Into<Expression>, datatype: impl Into<NamedNode>) -> Self {
        Expression::StrDt(Box::new(arg.into()), datatype.into())
    }

    pub fn strlang(arg: impl Into<Expression>, language: impl Into<String>) -> Self {
        Expression::StrLang(Box::new(arg.into()), language.into())
    }

    pub fn equal(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Self {
        Expression::Equal(Box::new(lhs.into()), Box::new(rhs.into()))
    }

    #[must_use]
    pub fn and(self, rhs: impl Into<Expression>) -> Self {
        Expression::And(Box::new(self), Box::new(rhs.into()))
    }

    #[must_use]
    pub fn or(self, rhs: impl Into<Expression>) -> Self {
        Expression::Or(Box::new(self), Box::new(rhs.into()))
    }

    #[must_use]
    pub fn not(self) -> Self {
        Expression::Not(Box::new(self))
    }

    /// A simple literal.
    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal(Literal::new_simple_literal(value))
    }
}

fn integer(value: usize) -> Expression {
    Expression::Literal(Literal::new_typed_literal(
        value.to_string(),
        kif_model::vocab::xsd::INTEGER,
    ))
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Self {
        Expression::Variable(variable)
    }
}

impl From<&Variable> for Expression {
    fn from(variable: &Variable) -> Self {
        Expression::Variable(variable.clone())
    }
}

impl From<NamedNode> for Expression {
    fn from(node: NamedNode) -> Self {
        Expression::NamedNode(node)
    }
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Expression::Literal(literal)
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Expression::string(value)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Variable(variable) => variable.fmt(f),
            Expression::NamedNode(node) => node.fmt(f),
            Expression::Literal(literal) => {
                // Integers are written in their short form.
                if literal.datatype() == kif_model::vocab::xsd::INTEGER {
                    f.write_str(literal.value())
                } else {
                    literal.fmt(f)
                }
            }
            Expression::Concat(args) => write!(f, "concat({})", args.iter().join(", ")),
            Expression::Substr(arg, start, None) => write!(f, "substr({arg}, {start})"),
            Expression::Substr(arg, start, Some(length)) => {
                write!(f, "substr({arg}, {start}, {length})")
            }
            Expression::Str(arg) => write!(f, "str({arg})"),
            Expression::Iri(arg) => write!(f, "iri({arg})"),
            Expression::StrStarts(arg, prefix) => write!(f, "strstarts({arg}, {prefix})"),
            Expression::Lang(arg) => write!(f, "lang({arg})"),
            Expression::IsBlank(arg) => write!(f, "isblank({arg})"),
            Expression::StrDt(arg, datatype) => write!(f, "strdt({arg}, {datatype})"),
            Expression::StrLang(arg, language) => {
                write!(f, "strlang({arg}, {})", Literal::new_simple_literal(language))
            }
            Expression::Equal(lhs, rhs) => write!(f, "({lhs} = {rhs})"),
            Expression::And(lhs, rhs) => write!(f, "({lhs} && {rhs})"),
            Expression::Or(lhs, rhs) => write!(f, "({lhs} || {rhs})"),
            Expression::Not(arg) => write!(f, "!({arg})"),
        }
    }
}
