use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Beverage, Guest, PizzaSize, PizzaStyle, Topping, Wave};
use crate::planner::constants::DEFAULT_BEVERAGES_PER_GUEST;
use crate::planner::{EngineConfig, RecommendationRequest};

fn default_beverages_per_guest() -> f64 {
    DEFAULT_BEVERAGES_PER_GUEST
}

/// A party as exported by the party/guest service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySnapshot {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub max_guests: Option<u32>,

    #[serde(default)]
    pub requires_approval: bool,

    #[serde(default)]
    pub event_start: Option<DateTime<Utc>>,

    pub size: PizzaSize,

    #[serde(default)]
    pub style: PizzaStyle,

    #[serde(default)]
    pub available_toppings: Vec<Topping>,

    #[serde(default)]
    pub available_beverages: Vec<Beverage>,

    #[serde(default)]
    pub waves: Vec<Wave>,

    #[serde(default = "default_beverages_per_guest")]
    pub beverages_per_guest: f64,

    #[serde(default)]
    pub guests: Vec<Guest>,
}

impl PartySnapshot {
    /// Guests who count as respondents.
    ///
    /// When the party requires approval, rejected and pending guests are left out.
    pub fn respondents(&self) -> Vec<Guest> {
        self.guests
            .iter()
            .filter(|g| !self.requires_approval || g.approved == Some(true))
            .cloned()
            .collect()
    }

    /// Trim dietary restrictions and drop blank ones for every guest.
    pub fn normalize(&mut self) {
        for guest in &mut self.guests {
            guest.dietary_restrictions = guest.effective_restrictions();
        }
    }

    /// Build the engine request for this party.
    pub fn to_request(&self) -> RecommendationRequest {
        RecommendationRequest {
            guests: self.respondents(),
            available_toppings: self.available_toppings.clone(),
            available_beverages: self.available_beverages.clone(),
            size: self.size.clone(),
            style: self.style.clone(),
            expected_guest_count: self.max_guests,
            waves: self.waves.clone(),
            event_start: self.event_start,
            config: EngineConfig {
                beverages_per_guest: self.beverages_per_guest,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(requires_approval: bool) -> PartySnapshot {
        let mut approved = Guest::new("a", "Approved");
        approved.approved = Some(true);
        let mut rejected = Guest::new("b", "Rejected");
        rejected.approved = Some(false);
        let pending = Guest::new("c", "Pending");

        PartySnapshot {
            name: "Test".to_string(),
            max_guests: Some(10),
            requires_approval,
            event_start: None,
            size: PizzaSize::new(14, "Large", 4.0),
            style: PizzaStyle::default(),
            available_toppings: Vec::new(),
            available_beverages: Vec::new(),
            waves: Vec::new(),
            beverages_per_guest: 1.0,
            guests: vec![approved, rejected, pending],
        }
    }

    #[test]
    fn test_respondents_without_approval() {
        assert_eq!(snapshot(false).respondents().len(), 3);
    }

    #[test]
    fn test_respondents_with_approval() {
        let respondents = snapshot(true).respondents();
        assert_eq!(respondents.len(), 1);
        assert_eq!(respondents[0].id, "a");
    }

    #[test]
    fn test_to_request_carries_configuration() {
        let request = snapshot(true).to_request();
        assert_eq!(request.guests.len(), 1);
        assert_eq!(request.expected_guest_count, Some(10));
        assert_eq!(request.config.beverages_per_guest, 1.0);
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let party: PartySnapshot = serde_json::from_str(
            r#"{"size": {"diameterInches": 12, "name": "Medium", "servingsPerPizza": 3}}"#,
        )
        .unwrap();
        assert_eq!(party.beverages_per_guest, DEFAULT_BEVERAGES_PER_GUEST);
        assert_eq!(party.style, PizzaStyle::default());
        assert!(party.guests.is_empty());
        assert_eq!(party.max_guests, None);
    }

    #[test]
    fn test_normalize_cleans_restrictions() {
        let mut party = snapshot(false);
        party.guests[0] = Guest::new("a", "A").with_restrictions(&[" Vegan ", ""]);
        party.normalize();
        let restrictions: Vec<&str> = party.guests[0]
            .dietary_restrictions
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(restrictions, vec!["Vegan"]);
    }
}
