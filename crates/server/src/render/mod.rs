//! HTML rendering for the catalog page and its reload fragments.
//!
//! Three independently renderable fragments (item grid, sorting
//! toolbar, pagination) plus the full document that hosts them. All
//! rendering is plain string assembly; the client swaps fragment
//! markup verbatim.

mod page;
mod pagination;
mod products;
mod sorting;

pub use page::render_index;
pub use pagination::render_pagination;
pub use products::render_products;
pub use sorting::render_sorting;

use vitrine_catalog::SearchCriteria;

/// Escape text for safe interpolation into HTML.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Href for the listing with the given criteria; bare path when the
/// criteria serialize to nothing.
pub(crate) fn listing_href(criteria: &SearchCriteria) -> String {
    let query = criteria.to_query_string();
    if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">&"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;"
        );
    }

    #[test]
    fn test_listing_href() {
        assert_eq!(listing_href(&SearchCriteria::new()), "/");
        let criteria = SearchCriteria::new().with_text("lamp");
        assert_eq!(listing_href(&criteria), "/?q=lamp");
    }
}
