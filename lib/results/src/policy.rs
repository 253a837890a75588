use kif_model::vocab::WIKIDATA_GENID;
use kif_model::RdfTerm;
use regex::Regex;

/// Decides which value terms stand for an unknown ("some") value.
///
/// Depending on the store, unknown values are exported as blank nodes or as skolem IRIs in a
/// well-known namespace. Both encodings are recognized by default.
#[derive(Clone, Debug)]
pub struct SomeValuePolicy {
    blank_nodes: bool,
    skolem: Option<Regex>,
}

impl Default for SomeValuePolicy {
    fn default() -> Self {
        Self {
            blank_nodes: true,
            skolem: Regex::new(&format!("^{}", regex::escape(WIKIDATA_GENID))).ok(),
        }
    }
}

impl SomeValuePolicy {
    /// A policy that recognizes no term as an unknown value.
    pub fn none() -> Self {
        Self {
            blank_nodes: false,
            skolem: None,
        }
    }

    #[must_use]
    pub fn with_blank_nodes(self, blank_nodes: bool) -> Self {
        Self {
            blank_nodes,
            ..self
        }
    }

    /// Recognizes IRIs matching `pattern` as skolemized unknown values.
    pub fn with_skolem_pattern(self, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            skolem: Some(Regex::new(pattern)?),
            ..self
        })
    }

    #[must_use]
    pub fn without_skolem_pattern(self) -> Self {
        Self {
            skolem: None,
            ..self
        }
    }

    pub fn is_some_value(&self, term: &RdfTerm) -> bool {
        match term {
            RdfTerm::BlankNode(_) => self.blank_nodes,
            RdfTerm::NamedNode(iri) => self
                .skolem
                .as_ref()
                .is_some_and(|skolem| skolem.is_match(iri.as_str())),
            _ => false,
        }
    }
}
