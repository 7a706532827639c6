use crate::document::{DocumentData, DocumentId, DocumentStatus, Rating};
use crate::error::{Result, SearchError};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rayon::prelude::*;
use std::collections::{btree_set, BTreeMap, BTreeSet, HashMap};
use std::iter::Copied;

/// Document id -> term frequency for one word, ordered by id.
pub type Postings = BTreeMap<DocumentId, f64>;

/// Posting list of a single word.
///
/// The lock serializes erasures from parallel removal workers. Every other
/// writer holds `&mut InvertedIndex` and bypasses it; readers share it.
#[derive(Debug, Default)]
pub struct PostingList(RwLock<Postings>);

impl PostingList {
    pub fn read(&self) -> RwLockReadGuard<'_, Postings> {
        self.0.read()
    }

    fn write(&self) -> RwLockWriteGuard<'_, Postings> {
        self.0.write()
    }

    fn get_mut(&mut self) -> &mut Postings {
        self.0.get_mut()
    }
}

/// In-memory inverted index with its transposed view.
///
/// For every live id, `document_to_words[id]` and the entries for `id` under
/// `word_to_documents` describe the same (word, frequency) pairs.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    word_to_documents: HashMap<String, PostingList>,
    document_to_words: HashMap<DocumentId, BTreeMap<String, f64>>,
    documents: HashMap<DocumentId, DocumentData>,
    document_ids: BTreeSet<DocumentId>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an already tokenized document.
    ///
    /// Each occurrence of a word adds `1 / words.len()` to its term frequency.
    pub fn insert(
        &mut self,
        document_id: DocumentId,
        words: &[&str],
        status: DocumentStatus,
        rating: Rating,
    ) -> Result<()> {
        if document_id < 0 {
            return Err(SearchError::invalid(format!("document id {document_id} is negative")));
        }
        if self.documents.contains_key(&document_id) {
            return Err(SearchError::invalid(format!("document id {document_id} already exists")));
        }

        let mut frequencies: BTreeMap<String, f64> = BTreeMap::new();
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for &word in words {
                *frequencies.entry(word.to_string()).or_insert(0.0) += inv_word_count;
            }
        }
        for (word, &tf) in &frequencies {
            self.word_to_documents
                .entry(word.clone())
                .or_default()
                .get_mut()
                .insert(document_id, tf);
        }
        tracing::debug!(document_id, words = frequencies.len(), "document indexed");
        self.document_to_words.insert(document_id, frequencies);
        self.documents.insert(document_id, DocumentData { rating, status });
        self.document_ids.insert(document_id);
        Ok(())
    }

    /// Remove a document from every map. Unknown ids are ignored.
    pub fn remove(&mut self, document_id: DocumentId) {
        let Some(words) = self.detach(document_id) else {
            return;
        };
        for word in words.keys() {
            if let Some(list) = self.word_to_documents.get_mut(word) {
                let postings = list.get_mut();
                postings.remove(&document_id);
                if postings.is_empty() {
                    self.word_to_documents.remove(word);
                }
            }
        }
        tracing::debug!(document_id, words = words.len(), "document removed");
    }

    /// Parallel form of [`remove`](Self::remove): per-word erasures run on the
    /// rayon pool, each under that word's posting-list lock.
    pub fn remove_par(&mut self, document_id: DocumentId) {
        let Some(words) = self.detach(document_id) else {
            return;
        };
        let word_to_documents = &self.word_to_documents;
        let emptied: Vec<&String> = words
            .par_iter()
            .filter_map(|(word, _)| {
                let list = word_to_documents.get(word)?;
                let mut postings = list.write();
                postings.remove(&document_id);
                postings.is_empty().then_some(word)
            })
            .collect();
        for word in emptied {
            self.word_to_documents.remove(word);
        }
        tracing::debug!(document_id, words = words.len(), "document removed (parallel)");
    }

    /// Drop the id and its metadata, handing back its vocabulary.
    fn detach(&mut self, document_id: DocumentId) -> Option<BTreeMap<String, f64>> {
        if !self.document_ids.remove(&document_id) {
            return None;
        }
        self.documents.remove(&document_id);
        Some(self.document_to_words.remove(&document_id).unwrap_or_default())
    }

    pub fn document_count(&self) -> usize {
        self.document_ids.len()
    }

    pub fn contains_document(&self, document_id: DocumentId) -> bool {
        self.document_ids.contains(&document_id)
    }

    pub fn document_ids(&self) -> Copied<btree_set::Iter<'_, DocumentId>> {
        self.document_ids.iter().copied()
    }

    pub fn document_data(&self, document_id: DocumentId) -> Option<DocumentData> {
        self.documents.get(&document_id).copied()
    }

    /// Word -> term frequency for a live document; empty for unknown ids.
    pub fn word_frequencies(&self, document_id: DocumentId) -> BTreeMap<&str, f64> {
        self.document_to_words
            .get(&document_id)
            .map(|words| words.iter().map(|(w, &tf)| (w.as_str(), tf)).collect())
            .unwrap_or_default()
    }

    pub fn postings(&self, word: &str) -> Option<&PostingList> {
        self.word_to_documents.get(word)
    }

    /// `word` as stored in the vocabulary of `document_id`, if it occurs there.
    pub fn document_word(&self, document_id: DocumentId, word: &str) -> Option<&str> {
        self.document_to_words
            .get(&document_id)?
            .get_key_value(word)
            .map(|(stored, _)| stored.as_str())
    }

    /// `ln(N / df)` for a word contained in `document_freq` live documents.
    pub fn idf(&self, document_freq: usize) -> f64 {
        (self.document_count() as f64 / document_freq as f64).ln()
    }
}
