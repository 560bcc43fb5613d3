//! Pagination-control fragment.

use super::{html_escape, listing_href};
use vitrine_catalog::{Pagination, SearchCriteria};

/// Visible page links around the current page.
const PAGE_WINDOW: usize = 5;

/// Render windowed page links preserving the current filters.
///
/// A single page renders as an empty fragment.
pub fn render_pagination(pagination: &Pagination, criteria: &SearchCriteria) -> String {
    if pagination.total_pages <= 1 {
        return String::new();
    }

    let mut items = Vec::new();

    if pagination.has_prev {
        items.push(page_link(criteria, pagination.page - 1, "&laquo;"));
    }

    for page in pagination.page_numbers(PAGE_WINDOW) {
        if page == pagination.page {
            items.push(format!(
                r#"<li class="page current"><span>{page}</span></li>"#
            ));
        } else {
            items.push(page_link(criteria, page, &page.to_string()));
        }
    }

    if pagination.has_next {
        items.push(page_link(criteria, pagination.page + 1, "&raquo;"));
    }

    format!(
        r#"<ul class="pages">
    {}
</ul>"#,
        items.join("\n    ")
    )
}

fn page_link(criteria: &SearchCriteria, page: i64, label: &str) -> String {
    let href = html_escape(&listing_href(&criteria.with_page(page)));
    format!(r#"<li class="page"><a href="{href}">{label}</a></li>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_renders_nothing() {
        let html = render_pagination(&Pagination::new(1, 5), &SearchCriteria::new());
        assert_eq!(html, "");
    }

    #[test]
    fn test_links_preserve_filters() {
        let criteria = SearchCriteria::new().with_text("lamp");
        let html = render_pagination(&Pagination::new(1, 30), &criteria);
        assert!(html.contains(r#"href="/?q=lamp&amp;page=2""#));
    }

    #[test]
    fn test_current_page_is_not_a_link() {
        let html = render_pagination(&Pagination::new(2, 30), &SearchCriteria::new().with_page(2));
        assert!(html.contains(r#"<li class="page current"><span>2</span></li>"#));
    }

    #[test]
    fn test_prev_next_arrows() {
        let html = render_pagination(&Pagination::new(2, 45), &SearchCriteria::new().with_page(2));
        assert!(html.contains("&laquo;"));
        assert!(html.contains("&raquo;"));

        let html = render_pagination(&Pagination::new(1, 45), &SearchCriteria::new());
        assert!(!html.contains("&laquo;"));
    }
}
