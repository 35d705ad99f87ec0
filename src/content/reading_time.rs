//! Reading time estimation

use lazy_static::lazy_static;
use regex::Regex;

use super::post::ContentBlock;
use crate::i18n::{Label, Locale};

/// Reading speed used for estimates
pub const WORDS_PER_MINUTE: u64 = 200;

/// Count words, splitting on runs of whitespace, commas and periods
pub fn count_words(text: &str) -> u64 {
    lazy_static! {
        static ref SEPARATORS: Regex = Regex::new(r"[,.\s]+").expect("valid separator regex");
    }
    SEPARATORS.split(text).filter(|word| !word.is_empty()).count() as u64
}

/// Estimated minutes to read a post's content, headings included
pub fn estimate_minutes(content: &[ContentBlock]) -> u64 {
    let words: u64 = content
        .iter()
        .map(|block| count_words(&block.heading) + count_words(&block.body.as_plain_text()))
        .sum();
    words.div_ceil(WORDS_PER_MINUTE)
}

/// Format minutes for display, e.g. "4 min"
pub fn format_minutes(minutes: u64, locale: Locale) -> String {
    format!("{} {}", minutes, locale.label(Label::Minutes))
}
