use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

/// Parses a CSS selector, converting the borrowed parse error into an owned one.
pub fn selector(css_selector: &str) -> Result<Selector> {
    Selector::parse(css_selector)
        .map_err(|why| anyhow!("Failed to Selector::parse({}) because: {:?}", css_selector, why))
}

/// Returns the first element of the document matched by `selector`.
pub fn first<'a>(document: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    document.select(selector).next()
}

/// Extracts the text of every descendant of `element` matched by `selector`.
///
/// The texts of all matches are concatenated in document order and the result
/// is trimmed. An empty string is returned when nothing matches.
///
/// # Examples
///
/// ```ignore
/// use scraper::Html;
///
/// let html = r#"<section><h1> Apple Inc. (AAPL) </h1></section>"#;
/// let document = Html::parse_document(html);
/// let section = first(&document, &selector("section").unwrap()).unwrap();
///
/// assert_eq!(child_text(&section, &selector("h1").unwrap()), "Apple Inc. (AAPL)");
/// ```
pub fn child_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|e| e.text())
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_text() {
        let html = r#"
            <section class="quote">
                <h1>
                    Apple Inc.
                </h1>
                <span class="v">1</span><span class="v">2</span>
            </section>"#;
        let document = Html::parse_document(html);
        let section = first(&document, &selector("section.quote").unwrap()).unwrap();

        assert_eq!(child_text(&section, &selector("h1").unwrap()), "Apple Inc.");
        assert_eq!(child_text(&section, &selector("span.v").unwrap()), "12");
        assert_eq!(child_text(&section, &selector("p").unwrap()), "");
    }

    #[test]
    fn test_selector_invalid() {
        assert!(selector("section[").is_err());
    }
}
