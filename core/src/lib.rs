//! In-memory full-text search over short documents.
//!
//! Documents are indexed into an inverted index with its transposed view.
//! Queries made of plus and minus words are ranked by TF-IDF, ties broken by
//! rating, and cut to the top [`MAX_RESULT_DOCUMENT_COUNT`]. Ranking and
//! removal each come in a sequential and a parallel form.
//!
//! ```
//! use search_core::{DocumentStatus, SearchServer};
//!
//! let mut server = SearchServer::from_stop_words_text("in the").unwrap();
//! server.add_document(42, "cat in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
//! server.add_document(12, "dog in the house", DocumentStatus::Actual, &[5, 2, 4]).unwrap();
//!
//! let found = server.find_top_documents("cat -dog").unwrap();
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].id, 42);
//! ```

pub mod batch;
pub mod concurrent_map;
pub mod dedup;
pub mod document;
pub mod error;
pub mod index;
pub mod log_duration;
pub mod paginator;
pub mod query;
pub mod ranking;
pub mod request_queue;
pub mod search_server;
pub mod tokenizer;

pub use batch::{process_queries, process_queries_joined};
pub use concurrent_map::ConcurrentMap;
pub use dedup::remove_duplicates;
pub use document::{Document, DocumentId, DocumentStatus, Rating};
pub use error::{Result, SearchError};
pub use log_duration::LogDuration;
pub use paginator::{paginate, Page, Paginator};
pub use ranking::{with_status, ExecutionPolicy};
pub use request_queue::RequestQueue;
pub use search_server::SearchServer;

/// Results returned by one ranking call, at most.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Shards of the relevance map used by parallel ranking.
pub const RELEVANCE_SHARD_COUNT: usize = 4;

/// Requests remembered by a [`RequestQueue`].
pub const REQUEST_WINDOW: usize = 1440;
