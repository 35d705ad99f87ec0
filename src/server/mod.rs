//! Preview server
//!
//! Renders the listing and post pages straight from the content API. Each
//! listing request replays the session from the first page; `?pages=N`
//! says how many pages the visitor has loaded so far.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::client::ContentSource;
use crate::config::SiteConfig;
use crate::content::reading_time::format_minutes;
use crate::content::Post;
use crate::error::ContentError;
use crate::helpers::{format_date_with, html_escape, image_tag};
use crate::i18n::{Label, Locale};
use crate::pagination::{PaginationState, Paginator};
use crate::Blog;

/// Server state
pub struct ServerState<S> {
    paginator: Paginator<S>,
    config: SiteConfig,
    locale: Locale,
}

impl<S: ContentSource> ServerState<S> {
    pub fn new(source: S, config: SiteConfig) -> Self {
        Self {
            paginator: Paginator::from_config(source, &config),
            locale: config.locale(),
            config,
        }
    }
}

impl<S> ServerState<S> {
    fn display_date(&self, post: &Post) -> String {
        post.first_publication_date
            .map(|date| format_date_with(&date, &self.config.date_format, self.locale))
            .unwrap_or_default()
    }

    fn max_pages(&self) -> usize {
        self.config.server.max_pages.max(1)
    }

    fn clamp_pages(&self, pages: Option<usize>) -> usize {
        pages.unwrap_or(1).clamp(1, self.max_pages())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pages: Option<usize>,
}

/// Build the application router
pub fn router<S: ContentSource + 'static>(state: Arc<ServerState<S>>) -> Router {
    Router::new()
        .route("/", get(listing_handler::<S>))
        .route("/post/:uid", get(post_handler::<S>))
        .route("/api/posts", get(api_posts_handler::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the preview server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState::new(blog.client()?, blog.config.clone()));
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn listing_handler<S: ContentSource>(
    State(state): State<Arc<ServerState<S>>>,
    Query(query): Query<ListingQuery>,
) -> Response {
    let pages = state.clamp_pages(query.pages);
    match state.paginator.load_pages(pages).await {
        Ok(listing) => Html(render_listing(&state, &listing, pages)).into_response(),
        Err(e) => error_response(&state, e),
    }
}

async fn post_handler<S: ContentSource>(
    State(state): State<Arc<ServerState<S>>>,
    Path(uid): Path<String>,
) -> Response {
    match state.paginator.get_post(&uid).await {
        Ok(post) => Html(render_post(&state, &post)).into_response(),
        Err(e) => error_response(&state, e),
    }
}

async fn api_posts_handler<S: ContentSource>(
    State(state): State<Arc<ServerState<S>>>,
    Query(query): Query<ListingQuery>,
) -> Response {
    let pages = state.clamp_pages(query.pages);
    match state.paginator.load_pages(pages).await {
        Ok(listing) => Json(listing.into_pagination()).into_response(),
        Err(e) => {
            tracing::error!("{}", e);
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}

fn error_response<S>(state: &ServerState<S>, error: ContentError) -> Response {
    if error.is_not_found() {
        tracing::debug!("{}", error);
        let message = html_escape(state.locale.label(Label::NotFound));
        let body = format!("<main><h1>{}</h1></main>", message);
        return (
            StatusCode::NOT_FOUND,
            Html(layout(state, state.locale.label(Label::NotFound), &body)),
        )
            .into_response();
    }

    tracing::error!("{}", error);
    (StatusCode::BAD_GATEWAY, "Content API unavailable").into_response()
}

fn layout<S>(state: &ServerState<S>, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{}">
<head>
<meta charset="utf-8">
<title>{}</title>
</head>
<body>
<header><a href="/">{}</a></header>
{}
</body>
</html>
"#,
        state.locale.tag(),
        html_escape(title),
        html_escape(&state.config.title),
        body
    )
}

/// Render the home page listing
fn render_listing<S>(state: &ServerState<S>, listing: &PaginationState, pages: usize) -> String {
    let mut body = String::from("<main class=\"posts\">\n");

    for post in listing.results() {
        body.push_str(&format!(
            r#"<a href="/post/{}"><h2>{}</h2><p>{}</p><div class="info"><time>{}</time><span>{}</span></div></a>"#,
            html_escape(&post.uid),
            html_escape(&post.title),
            html_escape(&post.subtitle),
            html_escape(&state.display_date(post)),
            html_escape(&post.author),
        ));
        body.push('\n');
    }

    // Offered only below the page cap
    if listing.can_load_more() && pages < state.max_pages() {
        body.push_str(&format!(
            r#"<a class="load-more" href="/?pages={}">{}</a>"#,
            pages + 1,
            html_escape(state.locale.label(Label::LoadMore))
        ));
        body.push('\n');
    }

    body.push_str("</main>");
    layout(state, &state.config.title, &body)
}

/// Render a post detail page
fn render_post<S>(state: &ServerState<S>, post: &Post) -> String {
    let mut body = String::new();

    if !post.banner_url.is_empty() {
        body.push_str(&format!(
            "<div class=\"banner\">{}</div>\n",
            image_tag(&post.banner_url, &post.title)
        ));
    }

    body.push_str(&format!(
        r#"<main class="post"><h1>{}</h1><div class="info"><time>{}</time><span>{}</span><span>{}</span></div>"#,
        html_escape(&post.title),
        html_escape(&state.display_date(post)),
        html_escape(&post.author),
        format_minutes(post.reading_minutes(), state.locale),
    ));
    body.push('\n');

    for block in &post.content {
        body.push_str(&format!(
            "<section><h2>{}</h2>\n{}\n</section>\n",
            html_escape(&block.heading),
            block.body.as_markup()
        ));
    }

    body.push_str("</main>");
    layout(state, &post.title, &body)
}
