use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A guest's RSVP preferences.
///
/// Topping and beverage references are catalog ids. `approved` is `None` while
/// the host has not reviewed the RSVP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub dietary_restrictions: BTreeSet<String>,

    #[serde(default)]
    pub liked_toppings: BTreeSet<String>,

    #[serde(default)]
    pub disliked_toppings: BTreeSet<String>,

    #[serde(default)]
    pub liked_beverages: BTreeSet<String>,

    #[serde(default)]
    pub disliked_beverages: BTreeSet<String>,

    #[serde(default)]
    pub approved: Option<bool>,
}

impl Guest {
    /// A guest with no preferences at all.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            dietary_restrictions: BTreeSet::new(),
            liked_toppings: BTreeSet::new(),
            disliked_toppings: BTreeSet::new(),
            liked_beverages: BTreeSet::new(),
            disliked_beverages: BTreeSet::new(),
            approved: None,
        }
    }

    pub fn with_restrictions(mut self, restrictions: &[&str]) -> Self {
        self.dietary_restrictions = restrictions.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn liking_toppings(mut self, ids: &[&str]) -> Self {
        self.liked_toppings = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn disliking_toppings(mut self, ids: &[&str]) -> Self {
        self.disliked_toppings = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn liking_beverages(mut self, ids: &[&str]) -> Self {
        self.liked_beverages = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn disliking_beverages(mut self, ids: &[&str]) -> Self {
        self.disliked_beverages = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Dietary restrictions with whitespace trimmed and blanks dropped.
    pub fn effective_restrictions(&self) -> BTreeSet<String> {
        self.dietary_restrictions
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_restrictions_trims_and_drops_blanks() {
        let guest = Guest::new("g1", "Ada").with_restrictions(&[" Vegan ", "", "  "]);
        let restrictions: Vec<String> = guest.effective_restrictions().into_iter().collect();
        assert_eq!(restrictions, vec!["Vegan".to_string()]);
    }

    #[test]
    fn test_deserialize_minimal_guest() {
        let guest: Guest = serde_json::from_str(r#"{"id": "g1"}"#).unwrap();
        assert!(guest.liked_toppings.is_empty());
        assert_eq!(guest.approved, None);
    }

    #[test]
    fn test_deserialize_camel_case_fields() {
        let guest: Guest = serde_json::from_str(
            r#"{"id": "g2", "name": "Bo", "likedToppings": ["pep", "pep"], "approved": true}"#,
        )
        .unwrap();
        assert_eq!(guest.liked_toppings.len(), 1);
        assert_eq!(guest.approved, Some(true));
    }
}
