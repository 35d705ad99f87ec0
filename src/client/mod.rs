//! Content source abstraction
//!
//! The rest of the crate only sees raw records, raw pages and opaque
//! cursors. How a backend encodes "the next page" stays inside its client.

#[cfg(test)]
pub(crate) mod memory;
mod prismic;

pub use prismic::PrismicClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Opaque token identifying the next page of a listing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document as returned by the content backend
///
/// Kept as loose JSON so that a malformed field never prevents the rest
/// of the record from being read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(pub Value);

impl RawRecord {
    /// Backend document id
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Human-readable unique identifier (slug)
    pub fn uid(&self) -> Option<&str> {
        self.0.get("uid").and_then(Value::as_str)
    }

    /// Raw publication timestamp, absent for drafts
    pub fn first_publication_date(&self) -> Option<&str> {
        self.0.get("first_publication_date").and_then(Value::as_str)
    }

    /// A field of the document's `data` object
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get("data").and_then(|data| data.get(name))
    }
}

/// One page of raw records
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawPage {
    pub results: Vec<RawRecord>,
    /// `None` once the backend reports no further pages
    pub next_page: Option<Cursor>,
}

/// Listing request options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub page_size: u32,
    /// `None` requests the first page
    pub cursor: Option<Cursor>,
}

impl PageOptions {
    pub fn first(page_size: u32) -> Self {
        Self {
            page_size,
            cursor: None,
        }
    }

    pub fn at(page_size: u32, cursor: Cursor) -> Self {
        Self {
            page_size,
            cursor: Some(cursor),
        }
    }
}

/// Transport-level failures talking to the content backend
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} responded with status {status}")]
    Status { status: u16, url: String },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("content API did not advertise a master ref")]
    MissingMasterRef,
}

/// A remote source of paged content records
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch one page of documents of the given type
    async fn get_page(
        &self,
        document_type: &str,
        options: &PageOptions,
    ) -> Result<RawPage, ClientError>;

    /// Look up a single document by uid; `Ok(None)` when nothing matches
    async fn get_by_uid(
        &self,
        document_type: &str,
        uid: &str,
    ) -> Result<Option<RawRecord>, ClientError>;
}

#[async_trait]
impl<T: ContentSource + ?Sized> ContentSource for Arc<T> {
    async fn get_page(
        &self,
        document_type: &str,
        options: &PageOptions,
    ) -> Result<RawPage, ClientError> {
        (**self).get_page(document_type, options).await
    }

    async fn get_by_uid(
        &self,
        document_type: &str,
        uid: &str,
    ) -> Result<Option<RawRecord>, ClientError> {
        (**self).get_by_uid(document_type, uid).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_record_accessors() {
        let record = RawRecord(json!({
            "id": "YH1",
            "uid": "hello-world",
            "first_publication_date": "2021-04-19T18:25:28+0000",
            "data": { "title": "Hello" }
        }));
        assert_eq!(record.id(), Some("YH1"));
        assert_eq!(record.uid(), Some("hello-world"));
        assert_eq!(
            record.first_publication_date(),
            Some("2021-04-19T18:25:28+0000")
        );
        assert_eq!(record.field("title"), Some(&json!("Hello")));
        assert_eq!(record.field("subtitle"), None);
    }

    #[test]
    fn test_raw_record_tolerates_odd_shapes() {
        let record = RawRecord(json!({ "uid": 42, "data": "not an object" }));
        assert_eq!(record.uid(), None);
        assert_eq!(record.field("title"), None);
        assert_eq!(record.first_publication_date(), None);
    }

    #[test]
    fn test_cursor_is_transparent() {
        let cursor = Cursor::new("https://cms.test/api/v2/documents/search?page=2");
        assert_eq!(
            serde_json::to_value(&cursor).unwrap(),
            json!("https://cms.test/api/v2/documents/search?page=2")
        );
    }
}
