use std::sync::LazyLock;

use crate::models::PizzaSize;

/// Beverages ordered per guest for the whole event (not per wave).
pub const DEFAULT_BEVERAGES_PER_GUEST: f64 = 1.0;

/// A remainder must be strictly below this fraction of a pizza's servings
/// to be deferred into the half-and-half pool.
pub const HALF_PIZZA_THRESHOLD: f64 = 0.5;

/// Slack subtracted before rounding up so float noise never adds a pizza.
pub const QUANTITY_EPSILON: f64 = 1e-9;

/// Label used for pizzas with no toppings.
pub const CHEESE_LABEL: &str = "Cheese";

/// Label suffix for the non-respondent buffer.
pub const NON_RESPONDENT_LABEL: &str = "For guests who haven't responded";

/// Id and label of the implicit wave used when the order is not split.
pub const SINGLE_WAVE_ID: &str = "all-guests";
pub const SINGLE_WAVE_LABEL: &str = "All guests";

// ─────────────────────────────────────────────────────────────────────────────
// Portion table
// ─────────────────────────────────────────────────────────────────────────────

/// Lookup of the standard pizza sizes and how many guests each one feeds.
#[derive(Debug, Clone)]
pub struct PortionTable {
    sizes: Vec<PizzaSize>,
}

impl PortionTable {
    /// The built-in size ladder, smallest first.
    pub fn standard() -> &'static PortionTable {
        &STANDARD_PORTIONS
    }

    pub fn sizes(&self) -> &[PizzaSize] {
        &self.sizes
    }

    pub fn by_diameter(&self, diameter_inches: u32) -> Option<&PizzaSize> {
        self.sizes
            .iter()
            .find(|s| s.diameter_inches == diameter_inches)
    }

    /// Case-insensitive lookup by size name.
    pub fn by_name(&self, name: &str) -> Option<&PizzaSize> {
        let wanted = name.trim().to_lowercase();
        self.sizes.iter().find(|s| s.name.to_lowercase() == wanted)
    }

    /// Servings for a diameter, or `None` for sizes not in the table.
    pub fn servings_for(&self, diameter_inches: u32) -> Option<f64> {
        self.by_diameter(diameter_inches)
            .map(|s| s.servings_per_pizza)
    }
}

static STANDARD_PORTIONS: LazyLock<PortionTable> = LazyLock::new(|| PortionTable {
    sizes: vec![
        PizzaSize::new(10, "Small", 2.0),
        PizzaSize::new(12, "Medium", 3.0),
        PizzaSize::new(14, "Large", 4.0),
        PizzaSize::new(16, "Extra Large", 5.0),
        PizzaSize::new(18, "Party", 6.0),
    ],
});
