//! Headnote extraction from statute HTML.
//!
//! A headnote is an element carrying the heading class. Its body is every
//! following sibling element up to the next headnote or schedule element.

use std::collections::BTreeMap;
use std::path::Path;

use scraper::{ElementRef, Html};

use super::utils::{
    class_selector, display_text, element_text, following_elements, has_class_prefix, NBSP,
};
use crate::clean::TextCleaner;
use crate::config::SECTION_BOUNDARY_PREFIXES;
use crate::error::{MinerError, Result};

/// Headnote bodies keyed by `"{prefix} {title}"`.
pub type Headnotes = BTreeMap<String, String>;

/// Parse an HTML document from a string.
pub fn parse_html(source: &str) -> Html {
    Html::parse_document(source)
}

/// Read and parse an HTML document from disk.
pub fn load_html(path: &Path) -> Result<Html> {
    let source = std::fs::read_to_string(path).map_err(|source| MinerError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_html(&source))
}

/// Collect the body text belonging to a heading element.
fn body_text(heading: ElementRef<'_>) -> String {
    following_elements(heading)
        .take_while(|sibling| !has_class_prefix(*sibling, &SECTION_BOUNDARY_PREFIXES))
        .map(|sibling| element_text(sibling).trim().replace(NBSP, " "))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract every headnote of a document.
///
/// # Arguments
/// * `html` - Parsed document
/// * `prefix` - Prepended to each title to form the key (e.g., the act name)
/// * `class` - Heading class (see [`crate::config::DEFAULT_HEADNOTE_CLASS`])
/// * `cleaner` - Strips citations and numbering from the body
///
/// # Returns
/// One entry per heading; a repeated key keeps the last body.
///
/// # Examples
/// ```
/// use obligation_miner::clean::TextCleaner;
/// use obligation_miner::html::{extract_headnotes, parse_html};
///
/// let html = parse_html(r#"<p class="headnote-e">Rent</p><p>1. Tenants shall pay.</p>"#);
/// let cleaner = TextCleaner::new().unwrap();
/// let notes = extract_headnotes(&html, "RTA", "headnote-e", &cleaner).unwrap();
/// assert_eq!(notes["RTA Rent"], "Tenants shall pay.");
/// ```
pub fn extract_headnotes(
    html: &Html,
    prefix: &str,
    class: &str,
    cleaner: &TextCleaner,
) -> Result<Headnotes> {
    let selector = class_selector(class)?;
    let mut headnotes = Headnotes::new();

    for heading in html.select(&selector) {
        let title = display_text(heading);
        let body = cleaner.clean(&body_text(heading));
        let key = format!("{prefix} {title}");

        if headnotes.insert(key.clone(), body).is_some() {
            tracing::debug!(key = %key, "Duplicate headnote replaced");
        }
    }

    tracing::debug!(prefix, count = headnotes.len(), "Extracted headnotes");
    Ok(headnotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(source: &str) -> Headnotes {
        let cleaner = TextCleaner::new().unwrap();
        extract_headnotes(&parse_html(source), "RTA", "headnote-e", &cleaner).unwrap()
    }

    #[test]
    fn test_body_stops_at_next_headnote() {
        let notes = extract(
            r#"<div>
                <p class="headnote-e">Rent</p>
                <p class="section-e">1. The tenant shall pay rent.</p>
                <p class="subsection-e">(2) The landlord shall issue receipts.</p>
                <p class="headnote-e">Repairs</p>
                <p class="section-e">The landlord shall repair.</p>
            </div>"#,
        );
        assert_eq!(notes.len(), 2);
        assert_eq!(
            notes["RTA Rent"],
            "The tenant shall pay rent. The landlord shall issue receipts."
        );
        assert_eq!(notes["RTA Repairs"], "The landlord shall repair.");
    }

    #[test]
    fn test_body_stops_at_schedule() {
        let notes = extract(
            r#"<div>
                <p class="headnote-e">Forms</p>
                <p>Use the approved form.</p>
                <p class="schedule-e">Schedule 1</p>
                <p>Ignored text.</p>
            </div>"#,
        );
        assert_eq!(notes["RTA Forms"], "Use the approved form.");
    }

    #[test]
    fn test_title_drops_non_breaking_spaces() {
        let notes = extract("<div><p class=\"headnote-e\">\u{a0}Rent\u{a0}</p><p>Body\u{a0}text</p></div>");
        assert_eq!(notes["RTA Rent"], "Body text");
    }

    #[test]
    fn test_strips_references_in_body() {
        let notes = extract(
            r#"<div><p class="headnote-e">Notice</p><p>Give notice. O. Reg. 516/06, s. 3.</p></div>"#,
        );
        assert_eq!(notes["RTA Notice"], "Give notice.");
    }

    #[test]
    fn test_heading_without_body() {
        let notes = extract(r#"<div><p class="headnote-e">Alone</p></div>"#);
        assert_eq!(notes["RTA Alone"], "");
    }

    #[test]
    fn test_duplicate_titles_keep_last() {
        let notes = extract(
            r#"<div>
                <p class="headnote-e">Same</p><p>First.</p>
                <p class="headnote-e">Same</p><p>Second.</p>
            </div>"#,
        );
        assert_eq!(notes.len(), 1);
        assert_eq!(notes["RTA Same"], "Second.");
    }

    #[test]
    fn test_custom_heading_class() {
        let cleaner = TextCleaner::new().unwrap();
        let html = parse_html(r#"<h2 class="title">Scope</h2><p>Applies to all.</p>"#);
        let notes = extract_headnotes(&html, "Act", "title", &cleaner).unwrap();
        assert_eq!(notes["Act Scope"], "Applies to all.");
    }

    #[test]
    fn test_body_strips_markers_before_line_breaks() {
        let notes = extract(
            "<div><p class=\"headnote-e\">Repairs</p>\
             <p>(a)\nThe landlord shall repair.</p>\
             <p>2.\tThe tenant shall report damage.</p></div>",
        );
        assert_eq!(
            notes["RTA Repairs"],
            "The landlord shall repair. The tenant shall report damage."
        );
    }

    #[test]
    fn test_no_headings_is_empty() {
        assert!(extract("<p>No headings here.</p>").is_empty());
    }
}
