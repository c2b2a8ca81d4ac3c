//! Helpers for navigating parsed HTML trees.

use scraper::{ElementRef, Selector};

use crate::config::validate_class_name;
use crate::error::{MinerError, Result};

/// Non-breaking space as it appears in e-Laws markup.
pub(crate) const NBSP: char = '\u{a0}';

/// Build a selector matching every element that carries `class`.
///
/// # Examples
/// ```
/// use obligation_miner::html::class_selector;
///
/// assert!(class_selector("headnote-e").is_ok());
/// assert!(class_selector("not a class").is_err());
/// ```
pub fn class_selector(class: &str) -> Result<Selector> {
    validate_class_name(class)?;
    let selector = format!(".{class}");
    let parsed = Selector::parse(&selector).map_err(|e| e.to_string());
    parsed.map_err(|message| MinerError::Selector {
        selector: selector.clone(),
        message,
    })
}

/// Whether any class of the element starts with one of `prefixes`.
pub fn has_class_prefix(element: ElementRef<'_>, prefixes: &[&str]) -> bool {
    element
        .value()
        .classes()
        .any(|class| prefixes.iter().any(|prefix| class.starts_with(prefix)))
}

/// Concatenated text of all descendant text nodes.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text used as a display title: non-breaking spaces removed, trimmed.
///
/// # Examples
/// ```
/// use scraper::Html;
/// use obligation_miner::html::{class_selector, display_text};
///
/// let html = Html::parse_fragment("<p class=\"t\">\u{a0}Rent\u{a0}deposits </p>");
/// let p = html.select(&class_selector("t").unwrap()).next().unwrap();
/// assert_eq!(display_text(p), "Rentdeposits");
/// ```
pub fn display_text(element: ElementRef<'_>) -> String {
    element_text(element).replace(NBSP, "").trim().to_string()
}

/// Element siblings following `element`, in document order.
///
/// Text and comment siblings are skipped.
pub fn following_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.next_siblings().filter_map(ElementRef::wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first<'a>(html: &'a Html, class: &str) -> ElementRef<'a> {
        html.select(&class_selector(class).unwrap()).next().unwrap()
    }

    #[test]
    fn test_class_selector_matches() {
        let html = Html::parse_fragment(r#"<p class="a b">x</p><p class="b">y</p><p>z</p>"#);
        let selector = class_selector("b").unwrap();
        assert_eq!(html.select(&selector).count(), 2);
    }

    #[test]
    fn test_class_selector_rejects_invalid_class() {
        assert!(matches!(
            class_selector("1x"),
            Err(MinerError::InvalidClassName(_))
        ));
    }

    #[test]
    fn test_has_class_prefix() {
        let html = Html::parse_fragment(
            r#"<p class="t">a</p><p class="schedule-e other">b</p><p class="section-e">c</p>"#,
        );
        assert!(has_class_prefix(first(&html, "schedule-e"), &["headnote", "schedule"]));
        assert!(!has_class_prefix(first(&html, "section-e"), &["headnote", "schedule"]));
    }

    #[test]
    fn test_element_text_concatenates_descendants() {
        let html = Html::parse_fragment(r#"<p class="t">Pay <b>rent</b> monthly.</p>"#);
        assert_eq!(element_text(first(&html, "t")), "Pay rent monthly.");
    }

    #[test]
    fn test_following_elements_skips_text() {
        let html = Html::parse_fragment(
            r#"<div><h3 class="t">T</h3> loose text <p>one</p><!-- c --><p>two</p></div>"#,
        );
        let texts: Vec<String> = following_elements(first(&html, "t"))
            .map(element_text)
            .collect();
        assert_eq!(texts, vec!["one", "two"]);
    }
}
