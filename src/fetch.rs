//! Query-time page text extraction
//!
//! A query that is itself an absolute URL is replaced by the visible text of
//! the page it points to, so the embedding step sees the job description
//! rather than the address. Extraction failures are absorbed by the caller;
//! the raw query is always a valid fallback.

use crate::error::{RecommenderError, Result};
use regex::Regex;
use url::Url;

/// Upper bound on extracted page text fed to the embedding step.
pub const MAX_EXTRACT_CHARS: usize = 5000;

/// Whether the text is a well-formed absolute URL with a scheme and a host.
pub fn is_url(text: &str) -> bool {
    match Url::parse(text) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}

/// Fetch a page and return its stripped visible text, capped at
/// `MAX_EXTRACT_CHARS` characters.
pub async fn extract_page_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| RecommenderError::UpstreamProvider(format!("page fetch failed: {e}")))?;

    let response = response.error_for_status().map_err(|e| {
        RecommenderError::UpstreamProvider(format!("page fetch returned error: {e}"))
    })?;

    let html = response
        .text()
        .await
        .map_err(|e| RecommenderError::UpstreamProvider(format!("page body unreadable: {e}")))?;

    Ok(strip_html(&html))
}

/// Reduce an HTML document to visible text: script and style blocks removed,
/// tags dropped, entities decoded, whitespace collapsed.
pub fn strip_html(html: &str) -> String {
    let blocks = Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>").unwrap();
    let without_blocks = blocks.replace_all(html, " ");

    let tags = Regex::new(r"<[^>]*>").unwrap();
    let without_tags = tags.replace_all(&without_blocks, " ");

    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let collapsed = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(MAX_EXTRACT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_urls_are_detected() {
        assert!(is_url("https://www.shl.com/solutions/products/"));
        assert!(is_url("http://example.com"));
    }

    #[test]
    fn test_plain_text_is_not_a_url() {
        assert!(!is_url("Hiring Java developers"));
        assert!(!is_url("java developer role"));
        assert!(!is_url(""));
    }

    #[test]
    fn test_relative_or_hostless_is_not_a_url() {
        assert!(!is_url("/jobs/1234"));
        assert!(!is_url("mailto:hiring@example.com"));
    }

    #[test]
    fn test_strip_html_removes_scripts_and_tags() {
        let html = r#"<html><head><style>body { color: red; }</style>
            <script>var x = "hidden";</script></head>
            <body><h1>Senior  Engineer</h1><p>Java &amp; SQL</p></body></html>"#;
        let text = strip_html(html);
        assert_eq!(text, "Senior Engineer Java & SQL");
    }

    #[test]
    fn test_strip_html_caps_length() {
        let html = format!("<p>{}</p>", "word ".repeat(3000));
        let text = strip_html(&html);
        assert_eq!(text.chars().count(), MAX_EXTRACT_CHARS);
    }

    #[test]
    fn test_strip_html_on_empty_body() {
        assert_eq!(strip_html("<html><body></body></html>"), "");
    }
}
