use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Pizza size as configured by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaSize {
    pub diameter_inches: u32,
    pub name: String,
    #[serde(default)]
    pub servings_per_pizza: f64,
}

impl PizzaSize {
    pub fn new(diameter_inches: u32, name: &str, servings_per_pizza: f64) -> Self {
        Self {
            diameter_inches,
            name: name.to_string(),
            servings_per_pizza,
        }
    }

    /// Reject sizes that cannot be used to portion guests.
    pub fn validate(&self) -> Result<()> {
        if self.servings_per_pizza.is_finite() && self.servings_per_pizza > 0.0 {
            Ok(())
        } else {
            Err(PlannerError::InvalidPizzaSize {
                name: self.name.clone(),
                servings: self.servings_per_pizza,
            })
        }
    }

    /// Guests a half pizza can feed.
    pub fn half_servings(&self) -> f64 {
        self.servings_per_pizza / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaStyle {
    pub id: String,
    pub name: String,
}

impl PizzaStyle {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

impl Default for PizzaStyle {
    fn default() -> Self {
        Self::new("classic", "Classic")
    }
}

/// A delivery time slot and the share of guests expected for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wave {
    pub id: String,
    pub arrival_time: DateTime<Utc>,
    #[serde(default)]
    pub guest_allocation: u32,
    #[serde(default = "default_wave_weight")]
    pub weight: f64,
    #[serde(default)]
    pub label: String,
}

fn default_wave_weight() -> f64 {
    1.0
}

impl Wave {
    pub fn new(id: &str, arrival_time: DateTime<Utc>, guest_allocation: u32, label: &str) -> Self {
        Self {
            id: id.to_string(),
            arrival_time,
            guest_allocation,
            weight: default_wave_weight(),
            label: label.to_string(),
        }
    }

    /// Guest allocation scaled by weight; `None` when the weight is unusable.
    pub fn effective_allocation(&self) -> Option<f64> {
        if self.weight.is_finite() && self.weight >= 0.0 {
            Some(self.guest_allocation as f64 * self.weight)
        } else {
            None
        }
    }
}
