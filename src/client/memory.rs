//! In-memory content source for tests

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{ClientError, ContentSource, Cursor, PageOptions, RawPage, RawRecord};

/// Serves pre-built pages keyed by cursor (`None` for the first page)
#[derive(Default)]
pub struct MemorySource {
    pages: HashMap<Option<String>, RawPage>,
    records: Vec<RawRecord>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the page served for `cursor`
    pub fn with_page(
        mut self,
        cursor: Option<&str>,
        records: Vec<RawRecord>,
        next: Option<&str>,
    ) -> Self {
        self.records.extend(records.iter().cloned());
        self.pages.insert(
            cursor.map(str::to_string),
            RawPage {
                results: records,
                next_page: next.map(Cursor::new),
            },
        );
        self
    }

    /// Make every subsequent call fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of calls received so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin_call(&self) -> Result<(), ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClientError::Status {
                status: 503,
                url: "memory://".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn get_page(
        &self,
        _document_type: &str,
        options: &PageOptions,
    ) -> Result<RawPage, ClientError> {
        self.begin_call()?;
        let key = options.cursor.as_ref().map(|c| c.as_str().to_string());
        Ok(self.pages.get(&key).cloned().unwrap_or_default())
    }

    async fn get_by_uid(
        &self,
        _document_type: &str,
        uid: &str,
    ) -> Result<Option<RawRecord>, ClientError> {
        self.begin_call()?;
        Ok(self.records.iter().find(|r| r.uid() == Some(uid)).cloned())
    }
}

/// A Prismic-shaped post record
pub fn post_record(uid: &str, title: &str) -> RawRecord {
    RawRecord(json!({
        "id": format!("id-{}", uid),
        "uid": uid,
        "type": "posts",
        "first_publication_date": "2021-04-19T18:25:28+0000",
        "data": {
            "title": title,
            "subtitle": format!("About {}", title),
            "author": "Joseph Oliveira",
            "banner": { "url": format!("https://images.test/{}.png", uid) },
            "content": [
                {
                    "heading": "Introduction",
                    "body": [paragraph("Lorem ipsum dolor sit amet.")]
                }
            ]
        }
    }))
}

/// A rich text paragraph without spans
pub fn paragraph(text: &str) -> Value {
    json!({ "type": "paragraph", "text": text, "spans": [] })
}
