use crate::document::Document;
use crate::error::Result;
use crate::index::InvertedIndex;
use rayon::prelude::*;

/// Run many default-status queries in parallel. Results keep the order of `queries`.
pub fn process_queries<S>(index: &InvertedIndex, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    queries.par_iter().map(|q| index.find_top_documents(q.as_ref())).collect()
}

/// [`process_queries`] flattened into a single list.
pub fn process_queries_joined<S>(index: &InvertedIndex, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(index, queries)?.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStatus;

    fn index() -> InvertedIndex {
        let mut index = InvertedIndex::from_stop_words_text("and with").unwrap();
        let texts = ["funny pet and nasty rat", "funny pet with curly hair", "nasty rat with curly hair"];
        for (id, text) in (1..).zip(texts) {
            index.add_document(id, text, DocumentStatus::Actual, &[1, 2]).unwrap();
        }
        index
    }

    #[test]
    fn results_follow_query_order() {
        let index = index();
        let queries = ["nasty rat -not", "curly hair", "unknown"];
        let results = process_queries(&index, &queries).unwrap();
        assert_eq!(results.len(), 3);
        for (query, docs) in queries.iter().zip(&results) {
            assert_eq!(docs, &index.find_top_documents(query).unwrap());
        }
        assert!(results[2].is_empty());
    }

    #[test]
    fn joined_concatenates() {
        let index = index();
        let queries = vec!["nasty".to_string(), "funny".to_string()];
        let joined = process_queries_joined(&index, &queries).unwrap();
        let ids: Vec<i32> = joined.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), 4);
        assert!(ids[..2].contains(&1) && ids[..2].contains(&3));
        assert!(ids[2..].contains(&1) && ids[2..].contains(&2));
    }

    #[test]
    fn bad_query_fails_the_batch() {
        let index = index();
        assert!(process_queries(&index, &["ok", "--no"]).is_err());
    }
}
