use search_core::{
    Document, DocId, DocumentStatus, InvertedIndex, Parallel, SearchConfig, SearchError, Sequential, StopWords,
};

const PETS: [(DocId, &str, &[i32]); 4] = [
    (1, "funny pet and nasty rat", &[7, 2, 7]),
    (2, "funny pet with curly hair", &[1, 2]),
    (3, "big cat fancy collar", &[1, 2, 8]),
    (4, "big dog sparrow eugene", &[1, 3, 2]),
];

fn build(order: &[usize]) -> InvertedIndex {
    let mut index = InvertedIndex::from_stop_words_text("and with").unwrap();
    for &i in order {
        let (id, text, ratings) = PETS[i];
        index.add_document(id, text, DocumentStatus::Actual, ratings).unwrap();
    }
    index
}

fn ids(docs: &[Document]) -> Vec<DocId> {
    docs.iter().map(|d| d.id).collect()
}

#[test]
fn word_frequencies_sum_to_one() {
    let index = build(&[0, 1, 2, 3]);
    for id in index.ids() {
        let sum: f64 = index.word_frequencies(id).values().sum();
        assert!((sum - 1.0).abs() < 1e-9, "doc {id} sums to {sum}");
    }
}

#[test]
fn removed_document_disappears() {
    let mut index = build(&[0, 1, 2, 3]);
    index.remove_document_with(&Parallel, 3);
    assert!(index.word_frequencies(3).is_empty());
    assert!(!index.ids().any(|id| id == 3));
    assert!(index.find_top_documents("fancy cat").unwrap().is_empty());
    assert_eq!(index.document_count(), 3);
}

#[test]
fn ranking_ignores_insertion_order() {
    let a = build(&[0, 1, 2, 3]);
    let b = build(&[3, 1, 0, 2]);
    for query in ["funny pet", "big -dog", "curly rat sparrow", "pet"] {
        assert_eq!(a.find_top_documents(query).unwrap(), b.find_top_documents(query).unwrap(), "query {query:?}");
    }
}

#[test]
fn sequential_and_parallel_agree() {
    let index = build(&[0, 1, 2, 3]);
    for query in ["funny pet", "big -dog", "curly rat sparrow -hair", "pet big cat"] {
        let seq = index.find_top_documents_with(&Sequential, query).unwrap();
        let par = index.find_top_documents_with(&Parallel, query).unwrap();
        assert_eq!(seq, par, "query {query:?}");
    }
}

#[test]
fn minus_word_beats_high_score() {
    let index = build(&[0, 1]);
    let docs = index.find_top_documents("pet -rat").unwrap();
    assert_eq!(ids(&docs), vec![2]);
}

#[test]
fn malformed_queries_are_rejected() {
    let index = build(&[0, 1]);
    for query in ["-", "pet --rat", "cat -"] {
        assert!(matches!(index.find_top_documents(query), Err(SearchError::InvalidQuery { .. })), "{query:?}");
    }
}

#[test]
fn returns_top_five_by_score() {
    let mut index = InvertedIndex::new(StopWords::default());
    for id in 0..10 {
        // tf of "target" grows with id
        let filler = vec!["filler"; (10 - id) as usize].join(" ");
        index.add_document(id, &format!("target {filler}"), DocumentStatus::Actual, &[]).unwrap();
    }
    index.add_document(10, "unrelated", DocumentStatus::Actual, &[]).unwrap();
    let docs = index.find_top_documents("target").unwrap();
    assert_eq!(ids(&docs), vec![9, 8, 7, 6, 5]);
    assert!(docs.windows(2).all(|w| w[0].relevance > w[1].relevance));
}

#[test]
fn result_limit_is_configurable() {
    let config = SearchConfig::default().with_max_results(2);
    let mut index = InvertedIndex::with_config(StopWords::default(), config);
    for id in 0..4 {
        index.add_document(id, "same words", DocumentStatus::Actual, &[id]).unwrap();
    }
    index.add_document(4, "other", DocumentStatus::Actual, &[]).unwrap();
    let docs = index.find_top_documents_with(&Parallel, "same").unwrap();
    // equal scores fall back to rating
    assert_eq!(ids(&docs), vec![3, 2]);
}

#[test]
fn status_convenience_forms() {
    let mut index = build(&[0, 1]);
    index.add_document(5, "funny cat", DocumentStatus::Irrelevant, &[9]).unwrap();
    let irrelevant = index.find_top_documents_by_status_with(&Parallel, "funny", DocumentStatus::Irrelevant).unwrap();
    assert_eq!(ids(&irrelevant), vec![5]);
    let actual = index.find_top_documents("funny").unwrap();
    assert_eq!(ids(&actual), vec![1, 2]);
}

#[test]
fn match_document_reports_status() {
    let mut index = build(&[0]);
    index.add_document(7, "nasty rat", DocumentStatus::Removed, &[]).unwrap();
    let (words, status) = index.match_document("rat nasty funny", 7).unwrap();
    assert_eq!(words, vec!["nasty", "rat"]);
    assert_eq!(status, DocumentStatus::Removed);
    let (words, _) = index.match_document("funny -nasty", 1).unwrap();
    assert!(words.is_empty());
    assert_eq!(index.match_document("rat", 2), Err(SearchError::NotFound(2)));
}
