use crate::document::{Document, DocumentId, DocumentStatus, Rating};
use crate::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
use rayon::prelude::*;
use std::cmp::Ordering;

/// How an operation with both forms should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}

/// Filter that keeps documents with the given status.
pub fn with_status(
    status: DocumentStatus,
) -> impl Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync + Copy {
    move |_, document_status, _| document_status == status
}

fn by_relevance_desc(lhs: &Document, rhs: &Document) -> Ordering {
    rhs.relevance.total_cmp(&lhs.relevance)
}

/// Reorder each run of near-equal relevance by rating, highest first, then
/// by id.
///
/// A run starts at its most relevant document and extends while candidates
/// stay within `RELEVANCE_EPSILON` of it. The id key makes the order inside a
/// run independent of the last bits of each relevance, which the parallel
/// path may sum in any order.
fn break_ties_by_rating(documents: &mut [Document]) {
    let mut start = 0;
    while start < documents.len() {
        let leader = documents[start].relevance;
        let end = documents[start..]
            .iter()
            .position(|d| (leader - d.relevance).abs() >= RELEVANCE_EPSILON)
            .map_or(documents.len(), |offset| start + offset);
        documents[start..end]
            .sort_by(|lhs, rhs| rhs.rating.cmp(&lhs.rating).then(lhs.id.cmp(&rhs.id)));
        start = end;
    }
}

/// Sort candidates into result order and keep the top `MAX_RESULT_DOCUMENT_COUNT`.
pub fn rank(mut documents: Vec<Document>, policy: ExecutionPolicy) -> Vec<Document> {
    match policy {
        ExecutionPolicy::Sequential => documents.sort_by(by_relevance_desc),
        ExecutionPolicy::Parallel => documents.par_sort_by(by_relevance_desc),
    }
    break_ties_by_rating(&mut documents);
    documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
    documents
}
