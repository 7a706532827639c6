use crate::document::DocumentId;
use crate::search_server::SearchServer;
use std::collections::{BTreeSet, HashSet};

/// Remove every document whose word set matches an earlier (lower id) document.
///
/// Term frequencies are ignored; only the set of distinct words counts.
/// Returns the removed ids in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let mut seen: HashSet<BTreeSet<&str>> = HashSet::new();
    let mut duplicates = Vec::new();
    for document_id in server.document_ids() {
        let words: BTreeSet<&str> = server.word_frequencies(document_id).into_keys().collect();
        if !seen.insert(words) {
            duplicates.push(document_id);
        }
    }
    drop(seen);

    for &document_id in &duplicates {
        server.remove_document(document_id);
        tracing::info!(document_id, "found duplicate document");
    }
    duplicates
}
