//! Show a single post

use anyhow::Result;

use crate::content::reading_time::format_minutes;
use crate::helpers::format_date_with;
use crate::i18n::Label;
use crate::Blog;

/// Print a post's header and content, as plain text or rendered HTML
pub async fn run(blog: &Blog, uid: &str, html: bool) -> Result<()> {
    let paginator = blog.paginator()?;
    let locale = blog.config.locale();

    let post = match paginator.get_post(uid).await {
        Ok(post) => post,
        Err(e) if e.is_not_found() => {
            anyhow::bail!("{}: {}", locale.label(Label::NotFound), uid);
        }
        Err(e) => return Err(e.into()),
    };

    let date = post
        .first_publication_date
        .map(|date| format_date_with(&date, &blog.config.date_format, locale))
        .unwrap_or_default();

    println!("{}", post.title);
    println!(
        "{} | {} | {}",
        date,
        post.author,
        format_minutes(post.reading_minutes(), locale)
    );
    if !post.banner_url.is_empty() {
        println!("Banner: {}", post.banner_url);
    }

    for block in &post.content {
        println!();
        if !block.heading.is_empty() {
            println!("## {}", block.heading);
        }
        if html {
            println!("{}", block.body.as_markup());
        } else {
            println!("{}", block.body.as_plain_text());
        }
    }

    Ok(())
}
