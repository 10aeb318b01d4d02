use crate::index::InvertedIndex;
use crate::ranking::ExecutionPolicy;
use crate::DocId;
use std::collections::HashSet;

/// Remove documents whose set of indexed words equals that of a lower id.
///
/// Word order, repetition and stop words are ignored. Returns the removed ids in ascending order.
pub fn remove_duplicates<E: ExecutionPolicy>(index: &mut InvertedIndex, policy: &E) -> Vec<DocId> {
    let duplicates: Vec<DocId> = {
        let mut seen: HashSet<Vec<&str>> = HashSet::new();
        index
            .ids()
            .filter(|&id| !seen.insert(index.word_frequencies(id).into_keys().collect()))
            .collect()
    };
    for &id in &duplicates {
        index.remove_document_with(policy, id);
        tracing::info!(id, "found duplicate document");
    }
    duplicates
}
