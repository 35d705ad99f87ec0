//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Whether a link target is safe to put in an `href`
///
/// Only web, mail and phone schemes plus relative references pass.
pub fn is_safe_url(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() {
        return false;
    }

    match url.split_once(':') {
        Some((scheme, _)) if !scheme.contains(&['/', '?', '#'][..]) => matches!(
            scheme.to_ascii_lowercase().as_str(),
            "http" | "https" | "mailto" | "tel"
        ),
        _ => true,
    }
}

fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Generate an anchor tag around already-rendered markup
///
/// Unsafe targets drop the anchor and keep the inner markup.
///
/// # Examples
/// ```ignore
/// link_to("https://example.com", "Example") // -> <a href="https://example.com" target="_blank" rel="noopener">Example</a>
/// ```
pub fn link_to(href: &str, inner_html: &str) -> String {
    if !is_safe_url(href) {
        tracing::debug!("Dropping link with unsafe target {:?}", href);
        return inner_html.to_string();
    }

    let href = html_escape(href.trim());
    if is_external(&href) {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            href, inner_html
        )
    } else {
        format!(r#"<a href="{}">{}</a>"#, href, inner_html)
    }
}

/// Generate an image tag
///
/// # Examples
/// ```ignore
/// image_tag("https://images.prismic.io/banner.png", "Banner")
/// ```
pub fn image_tag(src: &str, alt: &str) -> String {
    let src = if is_safe_url(src) { src.trim() } else { "" };
    format!(r#"<img src="{}" alt="{}">"#, html_escape(src), html_escape(alt))
}
