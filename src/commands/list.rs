//! List posts from the content API

use anyhow::Result;

use crate::content::reading_time::format_minutes;
use crate::helpers::format_date_with;
use crate::Blog;

/// List posts, following every page when `all` is set
pub async fn run(blog: &Blog, all: bool) -> Result<()> {
    let paginator = blog.paginator()?;
    let locale = blog.config.locale();

    let mut state = paginator.first_page().await?;
    if all {
        while state.can_load_more() {
            state = paginator.load_next(&state).await?;
        }
    }

    println!("Posts ({}):", state.results().len());
    for post in state.results() {
        let date = post
            .first_publication_date
            .map(|date| format_date_with(&date, &blog.config.date_format, locale))
            .unwrap_or_else(|| "draft".to_string());
        println!(
            "  {} - {} by {} ({}) [{}]",
            date,
            post.title,
            post.author,
            format_minutes(post.reading_minutes(), locale),
            post.uid
        );
    }

    if let Some(cursor) = state.next_page() {
        println!("More posts available (next page: {})", cursor);
    }

    Ok(())
}
