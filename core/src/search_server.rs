use crate::concurrent_map::ConcurrentMap;
use crate::document::{average_rating, Document, DocumentId, DocumentStatus, Rating};
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::ranking::{rank, with_status, ExecutionPolicy};
use crate::tokenizer::{tokenize, StopWords};
use crate::RELEVANCE_SHARD_COUNT;
use rayon::prelude::*;
use std::collections::{btree_set, BTreeMap};
use std::iter::Copied;

/// TF-IDF search engine over short immutable documents.
///
/// Mutations take `&mut self` and queries take `&self`, so a reader never sees
/// a half-added or half-removed document. Share across threads behind a
/// read-write lock.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
}

impl SearchServer {
    /// An engine without stop words.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self { stop_words: StopWords::new(stop_words)?, index: InvertedIndex::new() })
    }

    /// Stop words given as one space-separated string.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self { stop_words: StopWords::from_text(text)?, index: InvertedIndex::new() })
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Index a new document.
    ///
    /// Fails if the id is negative or taken, or if any token holds a control
    /// character. Nothing is modified on failure.
    pub fn add_document(
        &mut self,
        document_id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[Rating],
    ) -> Result<()> {
        let words = tokenize(text, &self.stop_words)?;
        self.index.insert(document_id, &words, status, average_rating(ratings))
    }

    pub fn remove_document(&mut self, document_id: DocumentId) {
        self.remove_document_policy(ExecutionPolicy::Sequential, document_id);
    }

    pub fn remove_document_policy(&mut self, policy: ExecutionPolicy, document_id: DocumentId) {
        match policy {
            ExecutionPolicy::Sequential => self.index.remove(document_id),
            ExecutionPolicy::Parallel => self.index.remove_par(document_id),
        }
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    pub fn contains_document(&self, document_id: DocumentId) -> bool {
        self.index.contains_document(document_id)
    }

    /// Live document ids in ascending order.
    pub fn document_ids(&self) -> Copied<btree_set::Iter<'_, DocumentId>> {
        self.index.document_ids()
    }

    pub fn word_frequencies(&self, document_id: DocumentId) -> BTreeMap<&str, f64> {
        self.index.word_frequencies(document_id)
    }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_policy(
            ExecutionPolicy::Sequential,
            raw_query,
            with_status(DocumentStatus::Actual),
        )
    }

    pub fn find_top_documents_with<F>(
        &self,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<Document>>
    where
        F: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync,
    {
        self.find_top_documents_policy(ExecutionPolicy::Sequential, raw_query, filter)
    }

    /// Rank documents against `raw_query`, keeping those `filter` accepts.
    ///
    /// Both policies return the same documents; the parallel one may differ in
    /// the last bits of a relevance that sums three or more words.
    pub fn find_top_documents_policy<F>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<Document>>
    where
        F: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let matched = match policy {
            ExecutionPolicy::Sequential => self.find_all_documents(&query, &filter),
            ExecutionPolicy::Parallel => self.find_all_documents_par(&query, &filter),
        };
        tracing::trace!(candidates = matched.len(), ?policy, "documents scored");
        Ok(rank(matched, policy))
    }

    fn rating_of(&self, document_id: DocumentId) -> Rating {
        self.index.document_data(document_id).map_or(0, |data| data.rating)
    }

    fn accepts<F>(&self, filter: &F, document_id: DocumentId) -> bool
    where
        F: Fn(DocumentId, DocumentStatus, Rating) -> bool,
    {
        self.index
            .document_data(document_id)
            .is_some_and(|data| filter(document_id, data.status, data.rating))
    }

    fn find_all_documents<F>(&self, query: &Query<'_>, filter: &F) -> Vec<Document>
    where
        F: Fn(DocumentId, DocumentStatus, Rating) -> bool,
    {
        let mut document_to_relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();
        for &word in &query.plus_words {
            let Some(list) = self.index.postings(word) else {
                continue;
            };
            let postings = list.read();
            let idf = self.index.idf(postings.len());
            for (&document_id, &tf) in postings.iter() {
                if self.accepts(filter, document_id) {
                    *document_to_relevance.entry(document_id).or_insert(0.0) += tf * idf;
                }
            }
        }

        for &word in &query.minus_words {
            if let Some(list) = self.index.postings(word) {
                for document_id in list.read().keys() {
                    document_to_relevance.remove(document_id);
                }
            }
        }

        document_to_relevance
            .into_iter()
            .map(|(id, relevance)| Document::new(id, relevance, self.rating_of(id)))
            .collect()
    }

    fn find_all_documents_par<F>(&self, query: &Query<'_>, filter: &F) -> Vec<Document>
    where
        F: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync,
    {
        let document_to_relevance = ConcurrentMap::<DocumentId, f64>::new(RELEVANCE_SHARD_COUNT);

        query.plus_words.par_iter().for_each(|&word| {
            let Some(list) = self.index.postings(word) else {
                return;
            };
            let postings = list.read();
            let idf = self.index.idf(postings.len());
            for (&document_id, &tf) in postings.iter() {
                if self.accepts(filter, document_id) {
                    document_to_relevance.add_to(document_id, tf * idf);
                }
            }
        });

        // Every plus-word task has joined; exclusions cannot be re-added.
        query.minus_words.par_iter().for_each(|&word| {
            if let Some(list) = self.index.postings(word) {
                for &document_id in list.read().keys() {
                    document_to_relevance.erase(document_id);
                }
            }
        });

        document_to_relevance
            .into_ordinary_map()
            .into_par_iter()
            .map(|(id, relevance)| Document::new(id, relevance, self.rating_of(id)))
            .collect()
    }

    /// Plus words of `raw_query` found in the document, with its status.
    ///
    /// The word list is empty when any minus word occurs in the document.
    pub fn match_document(
        &self,
        raw_query: &str,
        document_id: DocumentId,
    ) -> Result<(Vec<&str>, DocumentStatus)> {
        self.match_document_policy(ExecutionPolicy::Sequential, raw_query, document_id)
    }

    pub fn match_document_policy(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        document_id: DocumentId,
    ) -> Result<(Vec<&str>, DocumentStatus)> {
        let data = self
            .index
            .document_data(document_id)
            .ok_or(SearchError::DocumentNotFound { document_id })?;
        let query = Query::parse(raw_query, &self.stop_words)?;
        let lookup = |word: &&str| self.index.document_word(document_id, word);

        let matched = match policy {
            ExecutionPolicy::Sequential => {
                if query.minus_words.iter().any(|w| lookup(w).is_some()) {
                    Vec::new()
                } else {
                    query.plus_words.iter().filter_map(lookup).collect()
                }
            }
            ExecutionPolicy::Parallel => {
                if query.minus_words.par_iter().any(|w| lookup(w).is_some()) {
                    Vec::new()
                } else {
                    query.plus_words.par_iter().filter_map(lookup).collect()
                }
            }
        };
        Ok((matched, data.status))
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocumentId;
    type IntoIter = Copied<btree_set::Iter<'a, DocumentId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.document_ids()
    }
}
