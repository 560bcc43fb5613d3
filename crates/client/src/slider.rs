//! Price slider arithmetic.
//!
//! The slider widget itself lives in the DOM driver; this module owns
//! the numbers: outward rounding of the catalog's price range to the
//! step grid, picking initial handle positions, and snapping handle
//! movement back to whole euros for the numeric inputs.

use vitrine_catalog::results::PriceRange;

/// Slider step in whole currency units.
pub const PRICE_STEP: i64 = 10;

/// Slider endpoints, always on the step grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderBounds {
    pub min: i64,
    pub max: i64,
}

impl SliderBounds {
    /// Rounds a price range outward so every listed price stays
    /// reachable: the floor down to the step, the ceiling up.
    pub fn from_range(range: &PriceRange) -> Self {
        SliderBounds {
            min: floor_to_step(range.min),
            max: ceil_to_step(range.max),
        }
    }

    /// Initial handle positions. A value already typed in a numeric
    /// input wins over the bound; absent inputs fall back to the
    /// endpoints.
    pub fn initial_values(&self, input_min: Option<i64>, input_max: Option<i64>) -> (i64, i64) {
        (
            input_min.unwrap_or(self.min),
            input_max.unwrap_or(self.max),
        )
    }
}

/// Snaps a raw handle position to a whole currency unit for the
/// paired numeric input.
pub fn snap_value(value: f64) -> i64 {
    value.round() as i64
}

fn floor_to_step(value: i64) -> i64 {
    value.div_euclid(PRICE_STEP) * PRICE_STEP
}

fn ceil_to_step(value: i64) -> i64 {
    if value.rem_euclid(PRICE_STEP) == 0 {
        value
    } else {
        floor_to_step(value) + PRICE_STEP
    }
}
