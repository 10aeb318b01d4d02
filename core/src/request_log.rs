use crate::document::{Document, DocumentStatus};
use crate::error::Result;
use crate::index::InvertedIndex;
use crate::DocId;
use std::collections::VecDeque;

/// Number of requests remembered: one per minute of a day.
pub const REQUEST_WINDOW: usize = 1440;

/// Rolling log of the last [`REQUEST_WINDOW`] searches, counting those that found nothing.
#[derive(Debug)]
pub struct RequestLog<'a> {
    index: &'a InvertedIndex,
    result_counts: VecDeque<usize>,
    no_result_requests: usize,
}

impl<'a> RequestLog<'a> {
    pub fn new(index: &'a InvertedIndex) -> Self {
        Self { index, result_counts: VecDeque::with_capacity(REQUEST_WINDOW), no_result_requests: 0 }
    }

    pub fn add_find_request_by<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool + Sync,
    {
        let docs = self.index.find_top_documents_by(raw_query, predicate)?;
        self.record(docs.len());
        Ok(docs)
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        let docs = self.index.find_top_documents_by_status(raw_query, status)?;
        self.record(docs.len());
        Ok(docs)
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_by_status(raw_query, DocumentStatus::Actual)
    }

    /// Record a request answered elsewhere, by its result count.
    pub fn record(&mut self, result_count: usize) {
        if self.result_counts.len() == REQUEST_WINDOW {
            if let Some(0) = self.result_counts.pop_front() {
                self.no_result_requests -= 1;
            }
        }
        self.result_counts.push_back(result_count);
        if result_count == 0 {
            self.no_result_requests += 1;
        }
    }

    pub fn no_result_requests(&self) -> usize { self.no_result_requests }
}
