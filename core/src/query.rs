use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_into_words, StopWords};
use std::collections::BTreeSet;

/// A parsed query: deduplicated required (plus) and excluded (minus) terms.
///
/// Borrows its terms from the raw query text. Stop words never make it into either set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'a> {
    plus_words: BTreeSet<&'a str>,
    minus_words: BTreeSet<&'a str>,
}

impl<'a> Query<'a> {
    pub fn parse(text: &'a str, stop_words: &StopWords) -> Result<Self> {
        let mut query = Self::default();
        for token in split_into_words(text) {
            let (word, is_minus) = parse_query_word(token)?;
            if stop_words.contains(word) {
                continue;
            }
            if is_minus {
                query.minus_words.insert(word);
            } else {
                query.plus_words.insert(word);
            }
        }
        Ok(query)
    }

    /// Plus terms in ascending order.
    pub fn plus_words(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.plus_words.iter().copied()
    }

    /// Minus terms in ascending order.
    pub fn minus_words(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.minus_words.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}

fn parse_query_word(token: &str) -> Result<(&str, bool)> {
    let (word, is_minus) = match token.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    if word.is_empty() {
        return Err(SearchError::invalid_query(token, "missing term after '-'"));
    }
    if word.starts_with('-') {
        return Err(SearchError::invalid_query(token, "more than one leading '-'"));
    }
    if !is_valid_word(word) {
        return Err(SearchError::invalid_query(token, "contains a control character"));
    }
    Ok((word, is_minus))
}
