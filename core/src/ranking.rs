//! TF-IDF ranking over an [`InvertedIndex`], with sequential and parallel execution.

use crate::concurrent_map::ConcurrentMap;
use crate::config::SearchConfig;
use crate::document::{Document, DocumentStatus};
use crate::error::Result;
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::DocId;
use rayon::prelude::*;
use std::collections::BTreeMap;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Sequential {}
    impl Sealed for super::Parallel {}
}

/// How an index operation with a parallel variant is carried out.
///
/// Both implementations produce identical results; only scheduling differs.
pub trait ExecutionPolicy: sealed::Sealed + Sync {
    /// Relevance of every document that passes `predicate` and matches a plus
    /// term, minus every document containing a minus term.
    fn relevance<P>(&self, index: &InvertedIndex, query: &Query<'_>, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync;

    /// Delete `id` from the posting list of each of its words.
    ///
    /// Only the global postings are touched; the per-document table and the
    /// metadata stay in place for the caller to drop afterwards.
    fn purge_postings(&self, index: &InvertedIndex, id: DocId);

    /// Plus terms of `query` found in document `id`, sorted and deduplicated.
    /// Empty when the document holds any minus term.
    fn matched_words<'i>(&self, index: &'i InvertedIndex, id: DocId, query: &Query<'_>) -> Vec<&'i str>;
}

/// Run on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

/// Fan out over rayon's global pool: one task per term, then one per posting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parallel;

fn accepts<P>(index: &InvertedIndex, id: DocId, predicate: &P) -> bool
where
    P: Fn(DocId, DocumentStatus, i32) -> bool,
{
    index.document_data(id).is_some_and(|data| predicate(id, data.status, data.rating))
}

impl ExecutionPolicy for Sequential {
    fn relevance<P>(&self, index: &InvertedIndex, query: &Query<'_>, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let mut scores: BTreeMap<DocId, f64> = BTreeMap::new();
        for word in query.plus_words() {
            let Some(list) = index.posting_list(word) else { continue };
            let postings = list.snapshot();
            if postings.is_empty() {
                continue;
            }
            let idf = index.inverse_document_freq(postings.len());
            for (id, tf) in postings {
                if accepts(index, id, predicate) {
                    *scores.entry(id).or_insert(0.0) += tf * idf;
                }
            }
        }
        for word in query.minus_words() {
            let Some(list) = index.posting_list(word) else { continue };
            for (id, _) in list.snapshot() {
                scores.remove(&id);
            }
        }
        scores
    }

    fn purge_postings(&self, index: &InvertedIndex, id: DocId) {
        for word in index.document_words(id) {
            if let Some(list) = index.posting_list(word) {
                list.erase(id);
            }
        }
    }

    fn matched_words<'i>(&self, index: &'i InvertedIndex, id: DocId, query: &Query<'_>) -> Vec<&'i str> {
        if query.minus_words().any(|w| index.document_word(id, w).is_some()) {
            return Vec::new();
        }
        query.plus_words().filter_map(|w| index.document_word(id, w)).collect()
    }
}

/// Contributions to one document's score, tagged with the ordinal of the plus term they came from.
///
/// Summing in ordinal order reproduces the sequential summation exactly.
#[derive(Debug, Clone, Default)]
struct PartialScore {
    contributions: Vec<(usize, f64)>,
}

impl PartialScore {
    fn total(mut self) -> f64 {
        self.contributions.sort_unstable_by_key(|&(ordinal, _)| ordinal);
        self.contributions.into_iter().fold(0.0, |acc, (_, c)| acc + c)
    }
}

impl ExecutionPolicy for Parallel {
    fn relevance<P>(&self, index: &InvertedIndex, query: &Query<'_>, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let scores: ConcurrentMap<DocId, PartialScore> = ConcurrentMap::new(index.config().shard_count);

        let plus_words: Vec<&str> = query.plus_words().collect();
        plus_words.par_iter().enumerate().for_each(|(ordinal, word)| {
            let Some(list) = index.posting_list(word) else { return };
            let postings = list.snapshot();
            if postings.is_empty() {
                return;
            }
            let idf = index.inverse_document_freq(postings.len());
            postings.par_iter().for_each(|&(id, tf)| {
                if accepts(index, id, predicate) {
                    scores.access(id).contributions.push((ordinal, tf * idf));
                }
            });
        });

        let minus_words: Vec<&str> = query.minus_words().collect();
        minus_words.par_iter().for_each(|word| {
            let Some(list) = index.posting_list(word) else { return };
            list.snapshot().par_iter().for_each(|&(id, _)| scores.erase(id));
        });

        scores
            .snapshot()
            .into_iter()
            .map(|(id, partial)| (id, partial.total()))
            .collect()
    }

    fn purge_postings(&self, index: &InvertedIndex, id: DocId) {
        let words: Vec<&str> = index.document_words(id).collect();
        words.par_iter().for_each(|word| {
            if let Some(list) = index.posting_list(word) {
                list.erase(id);
            }
        });
    }

    fn matched_words<'i>(&self, index: &'i InvertedIndex, id: DocId, query: &Query<'_>) -> Vec<&'i str> {
        let minus_words: Vec<&str> = query.minus_words().collect();
        if minus_words.par_iter().any(|w| index.document_word(id, w).is_some()) {
            return Vec::new();
        }
        let plus_words: Vec<&str> = query.plus_words().collect();
        let mut matched: Vec<&'i str> = plus_words.par_iter().filter_map(|w| index.document_word(id, w)).collect();
        matched.sort_unstable();
        matched.dedup();
        matched
    }
}

/// Order by relevance descending; scores within `relevance_epsilon` of a
/// cluster's top score are ordered by rating descending. Keeps the first `max_results`.
pub(crate) fn sort_and_truncate(docs: &mut Vec<Document>, config: &SearchConfig) {
    docs.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    let mut start = 0;
    while start < docs.len() {
        let anchor = docs[start].relevance;
        let end = docs[start + 1..]
            .iter()
            .position(|d| anchor - d.relevance >= config.relevance_epsilon)
            .map_or(docs.len(), |offset| start + 1 + offset);
        docs[start..end].sort_by(|a, b| b.rating.cmp(&a.rating));
        start = end;
    }
    docs.truncate(config.max_results);
}

impl InvertedIndex {
    /// Score, filter, sort and truncate for an already parsed query.
    pub fn rank<E, P>(&self, policy: &E, query: &Query<'_>, predicate: P) -> Vec<Document>
    where
        E: ExecutionPolicy,
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let scores = policy.relevance(self, query, &predicate);
        let matched = scores.len();
        let mut docs: Vec<Document> = scores
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.document_data(id).map(|data| Document::new(id, relevance, data.rating))
            })
            .collect();
        sort_and_truncate(&mut docs, self.config());
        tracing::trace!(matched, returned = docs.len(), "ranked query");
        docs
    }

    pub fn find_top_documents_by_with<E, P>(&self, policy: &E, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        E: ExecutionPolicy,
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = self.parse_query(raw_query)?;
        Ok(self.rank(policy, &query, predicate))
    }

    pub fn find_top_documents_by_status_with<E>(&self, policy: &E, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>>
    where
        E: ExecutionPolicy,
    {
        self.find_top_documents_by_with(policy, raw_query, move |_, doc_status, _| doc_status == status)
    }

    pub fn find_top_documents_with<E: ExecutionPolicy>(&self, policy: &E, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status_with(policy, raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_by_with(&Sequential, raw_query, predicate)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_by_status_with(&Sequential, raw_query, status)
    }

    /// Sequential search over documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with(&Sequential, raw_query)
    }
}
