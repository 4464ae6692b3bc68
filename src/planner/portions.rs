use crate::error::{PlannerError, Result};
use crate::models::PizzaSize;
use crate::planner::constants::{DEFAULT_BEVERAGES_PER_GUEST, QUANTITY_EPSILON};

/// Runtime knobs for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Beverages per guest for the whole event.
    pub beverages_per_guest: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            beverages_per_guest: DEFAULT_BEVERAGES_PER_GUEST,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.beverages_per_guest.is_finite() && self.beverages_per_guest >= 0.0 {
            Ok(())
        } else {
            Err(PlannerError::InvalidBeverageRatio(self.beverages_per_guest))
        }
    }
}

/// Round a fractional unit count up, never down.
fn round_up(units: f64) -> u32 {
    if units <= 0.0 {
        return 0;
    }
    (units - QUANTITY_EPSILON).ceil().max(0.0) as u32
}

/// Pizzas needed to feed `guest_count` guests: `ceil(guests / servings)`.
///
/// Zero guests need zero pizzas. The size is assumed validated.
pub fn pizzas_needed(guest_count: u32, size: &PizzaSize) -> u32 {
    if guest_count == 0 {
        return 0;
    }
    round_up(guest_count as f64 / size.servings_per_pizza)
}

/// Beverages needed for `guest_count` guests at `per_guest` each.
pub fn beverages_needed(guest_count: u32, per_guest: f64) -> u32 {
    if guest_count == 0 {
        return 0;
    }
    round_up(guest_count as f64 * per_guest)
}

/// Whole pizzas a group fills completely, and the guests left over.
pub fn full_pizzas_and_remainder(guest_count: u32, size: &PizzaSize) -> (u32, u32) {
    let servings = size.servings_per_pizza;
    let full = (guest_count as f64 / servings + QUANTITY_EPSILON).floor() as u32;
    let covered = ((full as f64 * servings) + QUANTITY_EPSILON).floor() as u32;
    (full, guest_count.saturating_sub(covered))
}
