//! Post models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reading_time;
use super::rich_text::RichText;
use crate::client::Cursor;
use crate::helpers::format_display_date;
use crate::i18n::Locale;

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier (slug)
    pub uid: String,

    /// Publication date, `None` for drafts
    pub first_publication_date: Option<DateTime<Utc>>,

    /// Post title
    pub title: String,

    /// Short description shown in listings
    pub subtitle: String,

    /// Author display name
    pub author: String,

    /// Banner image URL
    pub banner_url: String,

    /// Content sections in source order
    pub content: Vec<ContentBlock>,
}

impl Post {
    /// Create an empty post with only an identifier
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            first_publication_date: None,
            title: String::new(),
            subtitle: String::new(),
            author: String::new(),
            banner_url: String::new(),
            content: Vec::new(),
        }
    }

    /// Estimated minutes to read the whole post
    pub fn reading_minutes(&self) -> u64 {
        reading_time::estimate_minutes(&self.content)
    }

    /// Publication date formatted for display
    pub fn display_date(&self, locale: Locale) -> String {
        format_display_date(self.first_publication_date.as_ref(), locale)
    }
}

/// A section of a post: a heading followed by rich text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub heading: String,
    pub body: RichText,
}

/// A listing of posts and the cursor of the page after it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostPagination {
    /// `None` once there are no further pages
    pub next_page: Option<Cursor>,
    pub results: Vec<Post>,
}
