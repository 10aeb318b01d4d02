use crate::config::SearchConfig;
use crate::document::{average_rating, DocumentData, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::query::Query;
use crate::ranking::{ExecutionPolicy, Sequential};
use crate::tokenizer::{is_valid_word, split_into_words, StopWords};
use crate::DocId;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Interned word, shared between the global postings and the per-document tables.
pub(crate) type Word = Arc<str>;

/// doc id -> term frequency for a single word.
///
/// Each list carries its own lock so that purges of different documents that
/// touch the same word serialize on that word only.
#[derive(Debug, Default)]
pub(crate) struct PostingList {
    entries: RwLock<BTreeMap<DocId, f64>>,
}

impl PostingList {
    /// Copy of the postings, taken under a short read lock.
    pub(crate) fn snapshot(&self) -> Vec<(DocId, f64)> {
        self.entries.read().iter().map(|(&id, &tf)| (id, tf)).collect()
    }

    pub(crate) fn erase(&self, id: DocId) {
        self.entries.write().remove(&id);
    }

    fn insert(&mut self, id: DocId, tf: f64) {
        self.entries.get_mut().insert(id, tf);
    }

    fn is_empty(&mut self) -> bool {
        self.entries.get_mut().is_empty()
    }
}

/// In-memory inverted index with TF weights.
///
/// Two views of the same (word, doc, tf) triples are kept in sync by
/// `add_document` and `remove_document`: the global word -> postings map and
/// each document's own word -> tf table. Both refer to each other by key only.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    stop_words: StopWords,
    config: SearchConfig,
    postings: BTreeMap<Word, PostingList>,
    doc_words: BTreeMap<DocId, BTreeMap<Word, f64>>,
    docs: BTreeMap<DocId, DocumentData>,
}

impl InvertedIndex {
    pub fn new(stop_words: StopWords) -> Self {
        Self::with_config(stop_words, SearchConfig::default())
    }

    pub fn with_config(stop_words: StopWords, config: SearchConfig) -> Self {
        let config = config.with_shard_count(config.shard_count);
        Self { stop_words, config, ..Self::default() }
    }

    /// Shorthand for an index over space-separated stop words.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self::new(StopWords::from_text(text)?))
    }

    pub fn config(&self) -> &SearchConfig { &self.config }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }

    /// Index a document. Either both index views and the metadata are updated, or nothing is.
    pub fn add_document(&mut self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if id < 0 {
            return Err(SearchError::invalid_document(id, "negative id"));
        }
        if self.docs.contains_key(&id) {
            return Err(SearchError::invalid_document(id, "id already present"));
        }
        let words = self.split_into_words_no_stop(id, text)?;

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for &word in &words {
            *counts.entry(word).or_default() += 1;
        }
        let total = words.len() as f64;
        let mut table = BTreeMap::new();
        for (word, count) in counts {
            let tf = count as f64 / total;
            let word = self.intern(word);
            self.postings.entry(Arc::clone(&word)).or_default().insert(id, tf);
            table.insert(word, tf);
        }
        let distinct = table.len();
        self.doc_words.insert(id, table);
        self.docs.insert(id, DocumentData { rating: average_rating(ratings), status });
        tracing::debug!(id, words = words.len(), distinct, "document added");
        Ok(())
    }

    /// Remove a document from every index structure. Absent ids are a no-op.
    pub fn remove_document(&mut self, id: DocId) {
        self.remove_document_with(&Sequential, id);
    }

    /// Like [`remove_document`](Self::remove_document), with posting-list purges
    /// carried out by `policy`. Metadata removal always happens on the calling thread.
    pub fn remove_document_with<E: ExecutionPolicy>(&mut self, policy: &E, id: DocId) {
        if !self.docs.contains_key(&id) {
            return;
        }
        policy.purge_postings(self, id);
        if let Some(words) = self.doc_words.remove(&id) {
            for word in words.keys() {
                if self.postings.get_mut(word).is_some_and(PostingList::is_empty) {
                    self.postings.remove(word);
                }
            }
        }
        self.docs.remove(&id);
        tracing::debug!(id, "document removed");
    }

    /// word -> term frequency for one document, empty if the id is unknown.
    pub fn word_frequencies(&self, id: DocId) -> BTreeMap<&str, f64> {
        self.doc_words
            .get(&id)
            .map(|table| table.iter().map(|(w, &tf)| (&**w, tf)).collect())
            .unwrap_or_default()
    }

    pub fn document_count(&self) -> usize { self.docs.len() }

    pub fn contains(&self, id: DocId) -> bool { self.docs.contains_key(&id) }

    /// Document ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.docs.keys().copied()
    }

    pub fn parse_query<'q>(&self, text: &'q str) -> Result<Query<'q>> {
        Query::parse(text, &self.stop_words)
    }

    /// Plus terms of `raw_query` present in document `id`, sorted, plus the document status.
    ///
    /// Any minus term present in the document empties the match.
    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<(Vec<&str>, DocumentStatus)> {
        self.match_document_with(&Sequential, raw_query, id)
    }

    /// Like [`match_document`](Self::match_document), with the term lookups carried out by `policy`.
    pub fn match_document_with<E: ExecutionPolicy>(
        &self,
        policy: &E,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<&str>, DocumentStatus)> {
        let data = self.docs.get(&id).ok_or(SearchError::NotFound(id))?;
        let query = self.parse_query(raw_query)?;
        Ok((policy.matched_words(self, id, &query), data.status))
    }

    pub(crate) fn posting_list(&self, word: &str) -> Option<&PostingList> {
        self.postings.get(word)
    }

    pub(crate) fn document_words(&self, id: DocId) -> impl Iterator<Item = &str> + '_ {
        self.doc_words.get(&id).into_iter().flat_map(|table| table.keys().map(|w| &**w))
    }

    /// The interned form of `word` if document `id` contains it.
    pub(crate) fn document_word(&self, id: DocId, word: &str) -> Option<&str> {
        self.doc_words.get(&id)?.get_key_value(word).map(|(k, _)| &**k)
    }

    pub(crate) fn document_data(&self, id: DocId) -> Option<&DocumentData> {
        self.docs.get(&id)
    }

    /// ln(N / df) for a word found in `document_freq` documents.
    pub(crate) fn inverse_document_freq(&self, document_freq: usize) -> f64 {
        (self.docs.len() as f64 / document_freq as f64).ln()
    }

    fn split_into_words_no_stop<'t>(&self, id: DocId, text: &'t str) -> Result<Vec<&'t str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_word(word) {
                return Err(SearchError::invalid_document(id, format!("word {word:?} contains a control character")));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    fn intern(&self, word: &str) -> Word {
        match self.postings.get_key_value(word) {
            Some((existing, _)) => Arc::clone(existing),
            None => Arc::from(word),
        }
    }
}
