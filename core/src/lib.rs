pub mod batch;
pub mod concurrent_map;
pub mod config;
pub mod dedup;
pub mod document;
pub mod error;
pub mod index;
pub mod paginator;
pub mod query;
pub mod ranking;
pub mod request_log;
pub mod timing;
pub mod tokenizer;

pub use batch::{process_queries, process_queries_joined};
pub use concurrent_map::ConcurrentMap;
pub use config::SearchConfig;
pub use dedup::remove_duplicates;
pub use document::{Document, DocumentStatus, ParseStatusError};
pub use error::{Result, SearchError};
pub use index::InvertedIndex;
pub use paginator::{paginate, Paginator};
pub use query::Query;
pub use ranking::{ExecutionPolicy, Parallel, Sequential};
pub use request_log::RequestLog;
pub use timing::LogDuration;
pub use tokenizer::StopWords;

/// Caller-assigned document identifier. Negative values are rejected on insert.
pub type DocId = i32;
