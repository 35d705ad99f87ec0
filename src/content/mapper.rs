//! Projection of raw backend records onto [`Post`]

use serde_json::Value;

use super::post::{ContentBlock, Post, PostPagination};
use super::rich_text::RichText;
use crate::client::{RawPage, RawRecord};
use crate::helpers::parse_timestamp;

/// Map a raw record into a post
///
/// Missing or malformed fields fall back to empty values; mapping never
/// fails.
pub fn map_record(raw: &RawRecord) -> Post {
    let uid = match raw.uid() {
        Some(uid) => uid.to_string(),
        None => {
            tracing::debug!("Record {:?} has no uid, using its id", raw.id());
            raw.id().unwrap_or_default().to_string()
        }
    };

    let first_publication_date = raw.first_publication_date().and_then(|date| {
        let parsed = parse_timestamp(date);
        if parsed.is_none() {
            tracing::debug!("Unparsable publication date {:?} on {}", date, uid);
        }
        parsed
    });

    let banner_url = raw
        .field("banner")
        .and_then(|banner| banner.get("url"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let content = match raw.field("content") {
        Some(Value::Array(sections)) => sections.iter().filter_map(map_section).collect(),
        _ => {
            tracing::debug!("Record {} has no content, defaulting to empty", uid);
            Vec::new()
        }
    };

    Post {
        title: text_field(raw, &uid, "title"),
        subtitle: text_field(raw, &uid, "subtitle"),
        author: text_field(raw, &uid, "author"),
        uid,
        first_publication_date,
        banner_url,
        content,
    }
}

/// Map every record of a raw page, keeping order and cursor
pub fn map_page(page: RawPage) -> PostPagination {
    PostPagination {
        results: page.results.iter().map(map_record).collect(),
        next_page: page.next_page,
    }
}

fn text_field(raw: &RawRecord, uid: &str, name: &str) -> String {
    match raw.field(name).and_then(value_text) {
        Some(text) => text,
        None => {
            tracing::debug!("Record {} has no {}, defaulting to empty", uid, name);
            String::new()
        }
    }
}

/// Read a text value given either as a string or as rich text
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Array(_) => Some(RichText::from_value(value).as_plain_text()),
        _ => None,
    }
}

fn map_section(section: &Value) -> Option<ContentBlock> {
    if !section.is_object() {
        tracing::debug!("Skipping content section that is not an object");
        return None;
    }

    Some(ContentBlock {
        heading: section.get("heading").and_then(value_text).unwrap_or_default(),
        body: section
            .get("body")
            .map(RichText::from_value)
            .unwrap_or_default(),
    })
}
