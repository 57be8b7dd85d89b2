//! Text products served inside HTML pages (AFD, tropical outlooks)

use scraper::{Html, Selector};

/// Pull the preformatted product text out of a product page.
///
/// Uses the first `<pre>` block. A body with no markup at all is already
/// plain text and is returned trimmed. Returns `None` when nothing usable
/// is found.
pub fn extract_preformatted(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let selector = Selector::parse("pre").ok()?;

    if let Some(pre) = document.select(&selector).next() {
        let text: String = pre.text().collect();
        let text = text.trim();
        return (!text.is_empty()).then(|| text.to_string());
    }

    let trimmed = body.trim();
    if trimmed.is_empty() || looks_like_markup(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn looks_like_markup(body: &str) -> bool {
    let lower = body.to_ascii_lowercase();
    lower.starts_with("<!doctype") || lower.contains("<html") || lower.contains("<body")
}
