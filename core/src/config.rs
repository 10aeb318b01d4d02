/// Tunables for ranking and parallel scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Upper bound on the number of documents a ranking returns.
    pub max_results: usize,
    /// Scores closer than this are ordered by rating instead.
    pub relevance_epsilon: f64,
    /// Number of independently locked shards in the parallel score accumulator.
    pub shard_count: usize,
}

pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
pub const RELEVANCE_EPSILON: f64 = 1e-6;
pub const DEFAULT_SHARD_COUNT: usize = 7;

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULT_DOCUMENT_COUNT,
            relevance_epsilon: RELEVANCE_EPSILON,
            shard_count: DEFAULT_SHARD_COUNT,
        }
    }
}

impl SearchConfig {
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_shard_count(mut self, shard_count: usize) -> Self {
        self.shard_count = shard_count.max(1);
        self
    }
}
