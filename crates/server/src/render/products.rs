//! Item-list fragment: the product grid.

use super::html_escape;
use vitrine_catalog::Product;

/// Render the grid of product cards.
///
/// Each card carries a stable `id` derived from the product id; the
/// client's transition renderer keys enter/exit animations on it.
pub fn render_products(products: &[Product]) -> String {
    if products.is_empty() {
        return r#"<p class="no-results">Aucun produit ne correspond à votre recherche.</p>"#
            .to_string();
    }

    products.iter().map(render_card).collect()
}

fn render_card(product: &Product) -> String {
    let image = product
        .image_url
        .as_deref()
        .map(|url| {
            format!(
                r#"<img src="{}" alt="{}" loading="lazy">"#,
                html_escape(url),
                html_escape(&product.name)
            )
        })
        .unwrap_or_else(|| r#"<div class="product-image-placeholder"></div>"#.to_string());

    let promo_badge = if product.promo {
        r#"<span class="badge-promo">Promo</span>"#
    } else {
        ""
    };

    let description = product
        .description
        .as_deref()
        .map(|d| format!(r#"<p class="product-description">{}</p>"#, html_escape(d)))
        .unwrap_or_default();

    format!(
        r#"<article class="product-card" id="{}">
    <a href="/product/{}" class="product-link">
        <div class="product-image">{image}</div>
        <div class="product-info">
            {promo_badge}
            <h3 class="product-title">{}</h3>
            {description}
            <div class="product-price">{}</div>
        </div>
    </a>
</article>"#,
        product.dom_id(),
        html_escape(&product.slug),
        html_escape(&product.name),
        product.price_display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_catalog::{CategoryId, ProductId};

    fn product(id: i64, name: &str, price: i64, promo: bool) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            description: None,
            image_url: None,
            price,
            promo,
            category_ids: vec![CategoryId::new(1)],
        }
    }

    #[test]
    fn test_cards_carry_stable_ids() {
        let html = render_products(&[product(3, "Lampe", 29, false)]);
        assert!(html.contains(r#"id="product-3""#));
        assert!(html.contains("Lampe"));
        assert!(html.contains("29 \u{20ac}"));
    }

    #[test]
    fn test_promo_badge() {
        let html = render_products(&[product(1, "Tapis", 99, true)]);
        assert!(html.contains("badge-promo"));
        let html = render_products(&[product(1, "Tapis", 99, false)]);
        assert!(!html.contains("badge-promo"));
    }

    #[test]
    fn test_empty_grid_message() {
        let html = render_products(&[]);
        assert!(html.contains("no-results"));
    }

    #[test]
    fn test_names_are_escaped() {
        let html = render_products(&[product(1, "<script>", 100, false)]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
