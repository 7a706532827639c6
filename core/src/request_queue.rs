use crate::document::{Document, DocumentId, DocumentStatus, Rating};
use crate::error::Result;
use crate::ranking::with_status;
use crate::search_server::SearchServer;
use crate::REQUEST_WINDOW;
use std::collections::VecDeque;

#[derive(Debug)]
struct QueryResult {
    query: String,
    found: bool,
}

/// Runs queries against a server and remembers, for the last
/// `REQUEST_WINDOW` requests, which ones came back empty.
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<QueryResult>,
    no_result_count: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self { server, requests: VecDeque::with_capacity(REQUEST_WINDOW), no_result_count: 0 }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_with(raw_query, with_status(DocumentStatus::Actual))
    }

    pub fn add_find_request_with<F>(&mut self, raw_query: &str, filter: F) -> Result<Vec<Document>>
    where
        F: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync,
    {
        let documents = self.server.find_top_documents_with(raw_query, filter)?;
        self.record(raw_query, !documents.is_empty());
        Ok(documents)
    }

    fn record(&mut self, raw_query: &str, found: bool) {
        if self.requests.len() >= REQUEST_WINDOW {
            if let Some(evicted) = self.requests.pop_front() {
                if !evicted.found {
                    self.no_result_count -= 1;
                }
                tracing::trace!(query = %evicted.query, "request left the window");
            }
        }
        if !found {
            self.no_result_count += 1;
        }
        self.requests.push_back(QueryResult { query: raw_query.to_string(), found });
    }

    /// Requests in the current window that returned nothing.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_count
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
