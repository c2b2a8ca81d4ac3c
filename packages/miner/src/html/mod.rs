//! HTML navigation and headnote extraction.

mod headnotes;
mod utils;

pub use headnotes::{extract_headnotes, load_html, parse_html, Headnotes};
pub use utils::{
    class_selector, display_text, element_text, following_elements, has_class_prefix,
};
