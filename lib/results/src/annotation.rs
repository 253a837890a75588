use crate::columns::{REFERENCE, STATEMENT};
use crate::decoder::decode_property;
use crate::{Binding, DecodeError, DecodeHints, ResultsDecoder, ResultsPage};
use kif_model::{AnnotationRecord, NamedNode, Rank, Snak};
use std::collections::{BTreeMap, BTreeSet};

/// The qualifiers and references decoded from the rows of an annotation query, by statement
/// node.
#[derive(Debug, Default)]
pub struct DecodedAnnotations {
    pub records: BTreeMap<NamedNode, AnnotationRecord>,
    pub errors: Vec<(usize, DecodeError)>,
}

impl DecodedAnnotations {
    /// The annotation record of the statement `node` with the given rank.
    ///
    /// A statement without qualifiers and references has an empty record.
    pub fn record(&self, node: &NamedNode, rank: Rank) -> AnnotationRecord {
        self.records
            .get(node)
            .cloned()
            .unwrap_or_default()
            .with_rank(rank)
    }
}

/// One qualifier or reference snak of a statement.
struct AnnotationRow {
    statement: NamedNode,
    reference: Option<NamedNode>,
    snak: Snak,
}

impl ResultsDecoder {
    /// Decodes the rows of an annotation query.
    ///
    /// A row holds a qualifier of the statement in the [STATEMENT] column, or, if the
    /// [REFERENCE] column is bound, one snak of a reference of that statement. The snaks of a
    /// reference are grouped by reference node. Bad rows are handled as in
    /// [ResultsDecoder::decode_page].
    pub fn decode_annotations(
        &self,
        page: &ResultsPage,
    ) -> Result<DecodedAnnotations, DecodeError> {
        let mut decoded = DecodedAnnotations::default();
        let mut references = BTreeMap::<NamedNode, BTreeMap<NamedNode, BTreeSet<Snak>>>::new();
        for (row, binding) in page.rows().enumerate() {
            match binding.and_then(|binding| self.decode_annotation(&binding)) {
                Ok(AnnotationRow {
                    statement,
                    reference: None,
                    snak,
                }) => {
                    let record = decoded.records.entry(statement).or_default();
                    record.qualifiers.insert(snak);
                }
                Ok(AnnotationRow {
                    statement,
                    reference: Some(reference),
                    snak,
                }) => {
                    references
                        .entry(statement)
                        .or_default()
                        .entry(reference)
                        .or_default()
                        .insert(snak);
                }
                Err(error) if self.options().strict => return Err(error),
                Err(error) => {
                    tracing::warn!(row, %error, "Skipping undecodable annotation");
                    decoded.errors.push((row, error));
                }
            }
        }
        for (statement, groups) in references {
            let record = decoded.records.entry(statement).or_default();
            record.references.extend(groups.into_values());
        }
        Ok(decoded)
    }

    fn decode_annotation(&self, binding: &Binding<'_>) -> Result<AnnotationRow, DecodeError> {
        let statement = binding.check_iri(STATEMENT)?;
        let reference =
            binding.optional(REFERENCE, |binding, variable| binding.check_iri(variable))?;
        let property = decode_property(binding)?;
        let snak = self.decode_snak(binding, property, &DecodeHints::default())?;
        Ok(AnnotationRow {
            statement,
            reference,
            snak,
        })
    }
}
