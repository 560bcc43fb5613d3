//! Full-page render: document shell, pre-filled filter form, slider
//! mount, and the three reload regions.

use super::{html_escape, render_pagination, render_products, render_sorting};
use vitrine_catalog::{Category, ResultPage, SearchCriteria};

/// Render the complete catalog document.
///
/// The `js-filter-*` classes are the client controller's mount
/// contract; the slider mount exposes the unrounded filtered-set
/// price range via `data-min`/`data-max`.
pub fn render_index(page: &ResultPage, categories: &[Category], criteria: &SearchCriteria) -> String {
    let content = render_products(&page.items);
    let sorting = render_sorting(page, criteria);
    let pagination = render_pagination(&page.pagination, criteria);
    let form = render_form(categories, criteria, page);

    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link rel="stylesheet" href="/assets/app.css">
    <title>Vitrine</title>
</head>
<body>
    <main class="js-filter">
        {form}
        <div class="js-filter-sorting">{sorting}</div>
        <div class="product-grid js-filter-content">{content}</div>
        <nav class="js-filter-pagination">{pagination}</nav>
    </main>
    <script type="module">
        import init from '/assets/vitrine_client.js';
        init();
    </script>
</body>
</html>"#
    )
}

fn render_form(categories: &[Category], criteria: &SearchCriteria, page: &ResultPage) -> String {
    let text = criteria.text.as_deref().unwrap_or("");
    let min = criteria
        .min_price
        .map(|v| v.to_string())
        .unwrap_or_default();
    let max = criteria
        .max_price
        .map(|v| v.to_string())
        .unwrap_or_default();
    let promo_checked = if criteria.promo_only { " checked" } else { "" };

    let category_boxes: String = categories
        .iter()
        .map(|category| {
            let checked = if criteria.category_ids.contains(&category.id) {
                " checked"
            } else {
                ""
            };
            format!(
                r#"<label class="category-option">
                <input type="checkbox" name="categories[]" value="{}"{checked}>
                <span>{}</span>
            </label>"#,
                category.id,
                html_escape(&category.name)
            )
        })
        .collect();

    format!(
        r#"<form class="js-filter-form" action="/" method="get">
            <input type="text" name="q" value="{}" placeholder="Rechercher">
            <div id="price-slider" data-min="{}" data-max="{}"></div>
            <input type="number" id="min" name="min" value="{}" min="0" placeholder="Prix min">
            <input type="number" id="max" name="max" value="{}" min="0" placeholder="Prix max">
            <label class="promo-option">
                <input type="checkbox" name="promo" value="1"{promo_checked}>
                <span>En promo</span>
            </label>
            <fieldset class="categories">{category_boxes}</fieldset>
            <span class="js-loading" aria-hidden="true" style="display: none">Chargement&hellip;</span>
        </form>"#,
        html_escape(text),
        page.price_range.min,
        page.price_range.max,
        html_escape(&min),
        html_escape(&max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_catalog::{CategoryId, Pagination, PriceRange};

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: CategoryId::new(3),
                name: "Luminaires".to_string(),
            },
            Category {
                id: CategoryId::new(7),
                name: "Tapis".to_string(),
            },
        ]
    }

    fn page_with_range(min: i64, max: i64) -> ResultPage {
        let mut page = ResultPage::empty();
        page.price_range = PriceRange::new(min, max);
        page.pagination = Pagination::new(1, 0);
        page
    }

    #[test]
    fn test_document_has_all_regions() {
        let html = render_index(&page_with_range(0, 0), &[], &SearchCriteria::new());
        for class in [
            "js-filter",
            "js-filter-form",
            "js-filter-sorting",
            "js-filter-content",
            "js-filter-pagination",
            "js-loading",
        ] {
            assert!(html.contains(class), "missing {class}");
        }
    }

    #[test]
    fn test_form_prefilled_from_criteria() {
        let criteria = SearchCriteria::new()
            .with_text("lampe")
            .with_price_range(Some(10), Some(250))
            .with_promo_only()
            .with_categories([CategoryId::new(7)]);
        let html = render_index(&page_with_range(13, 287), &categories(), &criteria);

        assert!(html.contains(r#"name="q" value="lampe""#));
        assert!(html.contains(r#"name="min" value="10""#));
        assert!(html.contains(r#"name="max" value="250""#));
        assert!(html.contains(r#"name="promo" value="1" checked"#));
        assert!(html.contains(r#"value="7" checked"#));
        assert!(!html.contains(r#"value="3" checked"#));
    }

    #[test]
    fn test_every_filter_input_is_named() {
        // The controller binds its change listeners to `input[name]`;
        // an unnamed input would silently stop triggering reloads.
        let html = render_index(&page_with_range(0, 0), &categories(), &SearchCriteria::new());
        let unnamed = html
            .split("<input ")
            .skip(1)
            .filter(|attrs| {
                let tag = attrs.split('>').next().unwrap_or("");
                !tag.contains(" name=")
            })
            .count();
        assert_eq!(unnamed, 0, "every rendered input must carry a name");
        for name in ["q", "min", "max", "promo", "categories[]"] {
            assert!(html.contains(&format!(r#"name="{name}""#)), "missing {name}");
        }
    }

    #[test]
    fn test_loader_starts_hidden() {
        let html = render_index(&page_with_range(0, 0), &[], &SearchCriteria::new());
        assert!(html.contains(
            r#"<span class="js-loading" aria-hidden="true" style="display: none">"#
        ));
    }

    #[test]
    fn test_slider_bounds_are_unrounded_range() {
        let html = render_index(&page_with_range(13, 287), &[], &SearchCriteria::new());
        assert!(html.contains(r#"data-min="13""#));
        assert!(html.contains(r#"data-max="287""#));
    }
}
