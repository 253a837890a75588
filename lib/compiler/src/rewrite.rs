use kif_model::{NamedNode, Variable};
use kif_sparql::Expression;

/// A reversible rewrite between a canonical IRI namespace and the namespace used by a store.
///
/// The same pair rewrites the IRIs of a query into the local namespace and the IRIs of the
/// results back into the canonical one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IriPrefixRewrite {
    canonical: String,
    local: String,
}

impl IriPrefixRewrite {
    pub fn new(canonical: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            local: local.into(),
        }
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    /// Rewrites a canonical IRI into the local namespace.
    ///
    /// Returns [None] if `iri` is not in the canonical namespace.
    pub fn to_local(&self, iri: &NamedNode) -> Option<NamedNode> {
        let suffix = iri.as_str().strip_prefix(self.canonical.as_str())?;
        Some(NamedNode::new_unchecked(format!("{}{suffix}", self.local)))
    }

    /// Rewrites a local IRI into the canonical namespace.
    ///
    /// Returns [None] if `iri` is not in the local namespace.
    pub fn to_canonical(&self, iri: &NamedNode) -> Option<NamedNode> {
        let suffix = iri.as_str().strip_prefix(self.local.as_str())?;
        Some(NamedNode::new_unchecked(format!("{}{suffix}", self.canonical)))
    }

    /// The expression that rewrites the local IRI bound to `variable` into the canonical
    /// namespace.
    pub fn to_canonical_expression(&self, variable: &Variable) -> Expression {
        Expression::iri(Expression::concat([
            Expression::string(self.canonical.as_str()),
            Expression::substr(Expression::str(variable), self.local.chars().count() + 1),
        ]))
    }

    /// The expression that holds if the IRI bound to `variable` is in the local namespace.
    pub fn is_local_expression(&self, variable: &Variable) -> Expression {
        Expression::strstarts(Expression::str(variable), self.local.as_str())
    }
}
