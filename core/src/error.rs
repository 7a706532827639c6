use crate::document::DocumentId;

/// Errors returned by the search engine.
///
/// Removal and frequency lookup of an unknown id are not errors; only
/// operations that require the document to exist report `DocumentNotFound`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Malformed query token, bad document id, invalid content or stop word.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("document {document_id} not found")]
    DocumentNotFound { document_id: DocumentId },
}

impl SearchError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SearchError::InvalidArgument { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
