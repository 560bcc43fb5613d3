//! Product and category read models.
//!
//! These are read-only from the search core's perspective: filtering
//! never mutates them, and display fields (image, description) are
//! untouched by the query composition.

use crate::ids::{CategoryId, ProductId};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
    /// Description for the card.
    pub description: Option<String>,
    /// Image URL for the card.
    pub image_url: Option<String>,
    /// Price in whole euros, the unit price filters operate in.
    pub price: i64,
    /// Promoted flag.
    pub promo: bool,
    /// Categories this product belongs to.
    pub category_ids: Vec<CategoryId>,
}

impl Product {
    /// Format the price for display.
    pub fn price_display(&self) -> String {
        format!("{} \u{20ac}", self.price)
    }

    /// Stable DOM key for the grid card, used to correlate the same
    /// logical item across a content swap.
    pub fn dom_id(&self) -> String {
        format!("product-{}", self.id)
    }
}

/// A category products can belong to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: ProductId::new(12),
            name: "Fauteuil scandinave".to_string(),
            slug: "fauteuil-scandinave".to_string(),
            description: None,
            image_url: None,
            price: 149,
            promo: false,
            category_ids: vec![CategoryId::new(3)],
        }
    }

    #[test]
    fn test_price_display() {
        assert_eq!(sample().price_display(), "149 \u{20ac}");
    }

    #[test]
    fn test_dom_id_is_stable() {
        let product = sample();
        assert_eq!(product.dom_id(), "product-12");
        assert_eq!(product.dom_id(), product.dom_id());
    }
}
