//! Search criteria for one listing request.
//!
//! A [`SearchCriteria`] is built fresh per request from a URL query
//! string (server side) or from serialized form fields (client side),
//! and is never persisted. Every field is independently optional:
//! absence means "no constraint from this field". Price bounds keep
//! unset (`None`) distinguishable from an explicit zero (`Some(0)`).

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// Fixed number of products per result page.
pub const PAGE_SIZE: i64 = 9;

/// Query-string key for the fragment-response flag. Parsed criteria
/// never carry it; the client strips it before updating the address
/// bar.
pub const AJAX_PARAM: &str = "ajax";

/// The full set of filter/page parameters for one listing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Substring match target against the product name.
    pub text: Option<String>,
    /// Lower price bound, whole euros.
    pub min_price: Option<i64>,
    /// Upper price bound, whole euros.
    pub max_price: Option<i64>,
    /// Restrict to promoted products.
    pub promo_only: bool,
    /// Category restriction; a product matches if it belongs to any
    /// listed category. Kept sorted and deduplicated.
    pub category_ids: Vec<CategoryId>,
    /// Current page, 1-indexed.
    pub page: i64,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            text: None,
            min_price: None,
            max_price: None,
            promo_only: false,
            category_ids: Vec::new(),
            page: 1,
        }
    }
}

impl SearchCriteria {
    /// Create unrestricted criteria (first page, no filters).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text filter. Empty strings clear it.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.is_empty() { None } else { Some(text) };
        self
    }

    /// Set the price bounds.
    pub fn with_price_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Restrict to promoted products.
    pub fn with_promo_only(mut self) -> Self {
        self.promo_only = true;
        self
    }

    /// Set the category restriction.
    pub fn with_categories(mut self, ids: impl IntoIterator<Item = CategoryId>) -> Self {
        self.category_ids = ids.into_iter().collect();
        normalize_categories(&mut self.category_ids);
        self
    }

    /// Same filters, different page.
    pub fn with_page(&self, page: i64) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Parse criteria from a raw URL query string.
    ///
    /// Recognized keys: `q`, `min`, `max`, `promo`, `categories[]`
    /// (repeated; bare `categories` also accepted), `page`. Unknown
    /// keys — including [`AJAX_PARAM`] — are ignored, as are
    /// unparsable or negative numeric values.
    pub fn from_query_str(query: &str) -> Self {
        let mut criteria = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "q" => {
                    if !value.is_empty() {
                        criteria.text = Some(value.into_owned());
                    }
                }
                "min" => criteria.min_price = parse_bound(&value),
                "max" => criteria.max_price = parse_bound(&value),
                "promo" => criteria.promo_only = parse_flag(&value),
                "categories[]" | "categories" => {
                    if let Ok(id) = value.parse::<CategoryId>() {
                        criteria.category_ids.push(id);
                    }
                }
                "page" => {
                    if let Ok(page) = value.parse::<i64>() {
                        criteria.page = page.max(1);
                    }
                }
                _ => {}
            }
        }

        normalize_categories(&mut criteria.category_ids);
        criteria
    }

    /// Serialize back to a query string.
    ///
    /// Inverse of [`from_query_str`](Self::from_query_str): fields at
    /// their defaults are omitted, categories serialize as repeated
    /// `categories[]` keys. Round-trip invariant:
    /// `from_query_str(&c.to_query_string()) == c`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        if let Some(text) = &self.text {
            serializer.append_pair("q", text);
        }
        if let Some(min) = self.min_price {
            serializer.append_pair("min", &min.to_string());
        }
        if let Some(max) = self.max_price {
            serializer.append_pair("max", &max.to_string());
        }
        if self.promo_only {
            serializer.append_pair("promo", "1");
        }
        for id in &self.category_ids {
            serializer.append_pair("categories[]", &id.to_string());
        }
        if self.page > 1 {
            serializer.append_pair("page", &self.page.to_string());
        }

        serializer.finish()
    }

    /// True when no filter field is set (page is not a filter).
    pub fn is_unfiltered(&self) -> bool {
        self.text.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && !self.promo_only
            && self.category_ids.is_empty()
    }
}

/// Parse a price bound; negative or unparsable values count as unset.
fn parse_bound(value: &str) -> Option<i64> {
    value.parse::<i64>().ok().filter(|v| *v >= 0)
}

/// A checkbox-style flag: present counts as set unless the value is an
/// explicit negative.
fn parse_flag(value: &str) -> bool {
    !matches!(value, "0" | "false" | "off")
}

/// Canonical order so criteria with the same category set compare equal.
fn normalize_categories(ids: &mut Vec<CategoryId>) {
    ids.sort();
    ids.dedup();
}
