//! Content module - posts, rich text and derived display fields

mod mapper;
mod post;
pub mod reading_time;
mod rich_text;

pub use mapper::{map_page, map_record};
pub use post::{ContentBlock, Post, PostPagination};
pub use reading_time::{estimate_minutes, WORDS_PER_MINUTE};
pub use rich_text::{Block, Inline, RichText};
