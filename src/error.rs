//! Errors surfaced to callers of the content pipeline

use thiserror::Error;

use crate::client::{ClientError, Cursor};

/// Failures the presentation layer has to handle
///
/// Missing fields and bad dates are recovered during mapping and never
/// show up here.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A listing page could not be fetched; `cursor` is the one attempted
    /// (`None` for the first page) so the caller can retry from it
    #[error("failed to fetch page {}: {source}", cursor_label(.cursor))]
    Fetch {
        cursor: Option<Cursor>,
        #[source]
        source: ClientError,
    },

    #[error("no {document_type} document with uid {uid:?}")]
    NotFound { document_type: String, uid: String },

    #[error("failed to look up {uid:?}: {source}")]
    Lookup {
        uid: String,
        #[source]
        source: ClientError,
    },
}

impl ContentError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}

fn cursor_label(cursor: &Option<Cursor>) -> String {
    match cursor {
        Some(cursor) => format!("at cursor {}", cursor),
        None => "1".to_string(),
    }
}

pub type Result<T, E = ContentError> = std::result::Result<T, E>;
