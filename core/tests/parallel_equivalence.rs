use proptest::prelude::*;
use search_core::{
    with_status, Document, DocumentId, DocumentStatus, ExecutionPolicy, Rating, SearchServer,
};

const VOCABULARY: [&str; 10] = [
    "cat", "dog", "bird", "city", "house", "tail", "fluffy", "grey", "big", "rat",
];

fn status(n: u8) -> DocumentStatus {
    match n % 4 {
        0 => DocumentStatus::Actual,
        1 => DocumentStatus::Irrelevant,
        2 => DocumentStatus::Banned,
        _ => DocumentStatus::Removed,
    }
}

fn word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(&VOCABULARY[..])
}

fn corpus() -> impl Strategy<Value = Vec<(Vec<&'static str>, u8, Vec<i32>)>> {
    prop::collection::vec(
        (
            prop::collection::vec(word(), 0..8),
            any::<u8>(),
            prop::collection::vec(-10..10i32, 0..4),
        ),
        1..40,
    )
}

// Relevances summed from three or more words may differ in the last bits
// between the two paths; rankings must still agree.
fn query() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(word(), 0..=5),
        prop::collection::vec(word(), 0..3),
    )
        .prop_map(|(plus, minus)| {
            let minus = minus.into_iter().map(|w| format!("-{w}"));
            plus.into_iter().map(String::from).chain(minus).collect::<Vec<_>>().join(" ")
        })
}

fn build(docs: &[(Vec<&'static str>, u8, Vec<i32>)]) -> SearchServer {
    let mut server = SearchServer::new();
    for (id, (words, status_seed, ratings)) in (0..).zip(docs) {
        server.add_document(id, &words.join(" "), status(*status_seed), ratings).unwrap();
    }
    server
}

fn assert_same(seq: &[Document], par: &[Document]) {
    assert_eq!(seq.len(), par.len());
    for (s, p) in seq.iter().zip(par) {
        assert_eq!(s.id, p.id);
        assert_eq!(s.rating, p.rating);
        assert!((s.relevance - p.relevance).abs() < 1e-6);
    }
}

proptest! {
    #[test]
    fn parallel_ranking_matches_sequential(docs in corpus(), raw_query in query()) {
        let server = build(&docs);
        let seq = server
            .find_top_documents_policy(ExecutionPolicy::Sequential, &raw_query, with_status(DocumentStatus::Actual))
            .unwrap();
        let par = server
            .find_top_documents_policy(ExecutionPolicy::Parallel, &raw_query, with_status(DocumentStatus::Actual))
            .unwrap();
        assert_same(&seq, &par);

        let accept_all = |_: DocumentId, _: DocumentStatus, _: Rating| true;
        let seq = server
            .find_top_documents_policy(ExecutionPolicy::Sequential, &raw_query, accept_all)
            .unwrap();
        let par = server
            .find_top_documents_policy(ExecutionPolicy::Parallel, &raw_query, accept_all)
            .unwrap();
        assert_same(&seq, &par);
    }

    #[test]
    fn parallel_ranking_is_repeatable(docs in corpus(), raw_query in query()) {
        let server = build(&docs);
        let accept_all = |_: DocumentId, _: DocumentStatus, _: Rating| true;
        let first = server
            .find_top_documents_policy(ExecutionPolicy::Parallel, &raw_query, accept_all)
            .unwrap();
        for _ in 0..8 {
            let again = server
                .find_top_documents_policy(ExecutionPolicy::Parallel, &raw_query, accept_all)
                .unwrap();
            assert_same(&first, &again);
        }
    }

    #[test]
    fn parallel_match_matches_sequential(docs in corpus(), raw_query in query()) {
        let server = build(&docs);
        for id in server.document_ids() {
            let seq = server.match_document_policy(ExecutionPolicy::Sequential, &raw_query, id).unwrap();
            let par = server.match_document_policy(ExecutionPolicy::Parallel, &raw_query, id).unwrap();
            prop_assert_eq!(seq, par);
        }
    }

    #[test]
    fn parallel_removal_matches_sequential(docs in corpus(), victims in prop::collection::vec(0..40i32, 0..10)) {
        let mut seq = build(&docs);
        let mut par = build(&docs);
        for &id in &victims {
            seq.remove_document_policy(ExecutionPolicy::Sequential, id);
            par.remove_document_policy(ExecutionPolicy::Parallel, id);
        }
        prop_assert_eq!(seq.document_ids().collect::<Vec<_>>(), par.document_ids().collect::<Vec<_>>());
        for id in seq.document_ids() {
            prop_assert_eq!(seq.word_frequencies(id), par.word_frequencies(id));
        }
        for &id in &victims {
            prop_assert!(par.word_frequencies(id).is_empty());
        }
        for word in VOCABULARY {
            let s = seq.find_top_documents_with(word, |_, _, _| true).unwrap();
            let p = par.find_top_documents_with(word, |_, _, _| true).unwrap();
            prop_assert_eq!(s, p);
        }
    }
}
