use crate::DocId;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("invalid document {id}: {reason}")]
    InvalidDocument { id: DocId, reason: String },
    #[error("invalid query term {term:?}: {reason}")]
    InvalidQuery { term: String, reason: &'static str },
    #[error("document {0} not found")]
    NotFound(DocId),
    #[error("invalid stop word {0:?}")]
    InvalidStopWord(String),
}

impl SearchError {
    pub(crate) fn invalid_document(id: DocId, reason: impl Into<String>) -> Self {
        Self::InvalidDocument { id, reason: reason.into() }
    }

    pub(crate) fn invalid_query(term: &str, reason: &'static str) -> Self {
        Self::InvalidQuery { term: term.to_string(), reason }
    }
}
