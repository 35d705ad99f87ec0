//! Incremental post listing
//!
//! A listing session is an immutable [`PaginationState`]. Loading more
//! posts never touches the current state: [`Paginator::load_next`] returns
//! a new one, so a failed load leaves the caller free to retry with the
//! state it already has.
//!
//! The paginator does not deduplicate concurrent loads. Callers must not
//! issue a second `load_next` for a state while one is in flight.

use serde::Serialize;

use crate::client::{ContentSource, Cursor, PageOptions};
use crate::config::SiteConfig;
use crate::content::{map_page, map_record, Post, PostPagination};
use crate::error::{ContentError, Result};

/// Posts loaded so far in a listing session
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PaginationState {
    next_page: Option<Cursor>,
    results: Vec<Post>,
}

impl PaginationState {
    /// Seed a session with its first page
    pub fn initialize(first: PostPagination) -> Self {
        Self {
            next_page: first.next_page,
            results: first.results,
        }
    }

    /// Posts in the order their pages were loaded
    pub fn results(&self) -> &[Post] {
        &self.results
    }

    /// Cursor of the page to load next
    pub fn next_page(&self) -> Option<&Cursor> {
        self.next_page.as_ref()
    }

    /// Whether a "load more" control should be offered
    pub fn can_load_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// New state with `page` appended after the current results
    fn append(&self, page: PostPagination) -> Self {
        let mut results = Vec::with_capacity(self.results.len() + page.results.len());
        results.extend(self.results.iter().cloned());
        results.extend(page.results);
        Self {
            next_page: page.next_page,
            results,
        }
    }

    pub fn into_pagination(self) -> PostPagination {
        PostPagination {
            next_page: self.next_page,
            results: self.results,
        }
    }
}

impl From<PostPagination> for PaginationState {
    fn from(page: PostPagination) -> Self {
        Self::initialize(page)
    }
}

/// Loads pages of one document type from a content source
pub struct Paginator<S> {
    source: S,
    document_type: String,
    page_size: u32,
}

impl<S: ContentSource> Paginator<S> {
    pub fn new(source: S, document_type: &str, page_size: u32) -> Self {
        Self {
            source,
            document_type: document_type.to_string(),
            page_size: page_size.max(1),
        }
    }

    /// Create a paginator using the configured document type and page size
    pub fn from_config(source: S, config: &SiteConfig) -> Self {
        Self::new(source, &config.document_type, config.page_size)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch and map a single page
    pub async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<PostPagination> {
        let options = PageOptions {
            page_size: self.page_size,
            cursor: cursor.cloned(),
        };

        let page = self
            .source
            .get_page(&self.document_type, &options)
            .await
            .map_err(|source| {
                tracing::warn!("Fetching {} page failed: {}", self.document_type, source);
                ContentError::Fetch {
                    cursor: cursor.cloned(),
                    source,
                }
            })?;

        Ok(map_page(page))
    }

    /// Start a listing session with the first page
    pub async fn first_page(&self) -> Result<PaginationState> {
        let page = self.fetch_page(None).await?;
        tracing::debug!("Loaded first page with {} post(s)", page.results.len());
        Ok(PaginationState::initialize(page))
    }

    /// Load the page after `state`
    ///
    /// Exactly one fetch is issued. With no next cursor this is a no-op
    /// that returns an equal state.
    pub async fn load_next(&self, state: &PaginationState) -> Result<PaginationState> {
        let Some(cursor) = state.next_page() else {
            tracing::debug!("No more pages to load");
            return Ok(state.clone());
        };

        let page = self.fetch_page(Some(cursor)).await?;
        tracing::debug!(
            "Appending {} post(s) to {} loaded",
            page.results.len(),
            state.results.len()
        );
        Ok(state.append(page))
    }

    /// Load up to `pages` pages from the start of the listing
    pub async fn load_pages(&self, pages: usize) -> Result<PaginationState> {
        let mut state = self.first_page().await?;
        for _ in 1..pages {
            if !state.can_load_more() {
                break;
            }
            state = self.load_next(&state).await?;
        }
        Ok(state)
    }

    /// Fetch a single post by uid
    pub async fn get_post(&self, uid: &str) -> Result<Post> {
        let record = self
            .source
            .get_by_uid(&self.document_type, uid)
            .await
            .map_err(|source| ContentError::Lookup {
                uid: uid.to_string(),
                source,
            })?;

        match record {
            Some(record) => Ok(map_record(&record)),
            None => Err(ContentError::NotFound {
                document_type: self.document_type.clone(),
                uid: uid.to_string(),
            }),
        }
    }
}
