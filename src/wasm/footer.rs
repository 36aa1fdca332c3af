use web_sys::Document;

use super::dom;
use crate::markup;

/// Writes the current calendar year into `#year`, when present.
pub fn stamp_year(document: &Document) {
    if let Some(el) = dom::query::<web_sys::Element>(document, markup::YEAR) {
        let year = js_sys::Date::new_0().get_full_year();
        el.set_text_content(Some(&year.to_string()));
    }
}
