//! Sorting-control fragment: result summary toolbar.
//!
//! The original's sorting partial is a thin toolbar over the result
//! set. The controller delegates clicks on any anchor inside this
//! region, so the clear-filters link participates in fragment reloads
//! like a pagination link.

use vitrine_catalog::{ResultPage, SearchCriteria};

/// Render the summary toolbar for the current result page.
pub fn render_sorting(page: &ResultPage, criteria: &SearchCriteria) -> String {
    let total = page.pagination.total;
    let count_label = match total {
        0 => "Aucun résultat".to_string(),
        1 => "1 résultat".to_string(),
        n => format!("{} résultats", n),
    };

    let price_hint = match (criteria.min_price, criteria.max_price) {
        (Some(min), Some(max)) => {
            format!(r#"<span class="price-hint">{min} € – {max} €</span>"#)
        }
        (Some(min), None) => format!(r#"<span class="price-hint">≥ {min} €</span>"#),
        (None, Some(max)) => format!(r#"<span class="price-hint">≤ {max} €</span>"#),
        (None, None) => String::new(),
    };

    let clear_link = if criteria.is_unfiltered() {
        String::new()
    } else {
        r#"<a href="/" class="clear-filters">Réinitialiser les filtres</a>"#.to_string()
    };

    format!(
        r#"<div class="toolbar">
    <span class="result-count">{count_label}</span>
    {price_hint}
    {clear_link}
</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_label() {
        let mut page = ResultPage::empty();
        page.pagination = vitrine_catalog::Pagination::new(1, 12);
        let html = render_sorting(&page, &SearchCriteria::new().with_text("lamp"));
        assert!(html.contains("12 résultats"));
    }

    #[test]
    fn test_clear_link_only_when_filtered() {
        let page = ResultPage::empty();
        let html = render_sorting(&page, &SearchCriteria::new());
        assert!(!html.contains("clear-filters"));

        let html = render_sorting(&page, &SearchCriteria::new().with_promo_only());
        assert!(html.contains(r#"<a href="/" class="clear-filters""#));
    }

    #[test]
    fn test_price_hint_reflects_bounds() {
        let page = ResultPage::empty();
        let criteria = SearchCriteria::new().with_price_range(Some(10), Some(250));
        let html = render_sorting(&page, &criteria);
        assert!(html.contains("10 € – 250 €"));

        let criteria = SearchCriteria::new().with_price_range(Some(10), None);
        let html = render_sorting(&page, &criteria);
        assert!(html.contains("≥ 10 €"));

        let html = render_sorting(&page, &SearchCriteria::new());
        assert!(!html.contains("price-hint"));
    }

    #[test]
    fn test_empty_label() {
        let html = render_sorting(&ResultPage::empty(), &SearchCriteria::new());
        assert!(html.contains("Aucun résultat"));
    }
}
