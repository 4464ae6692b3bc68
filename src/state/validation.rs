use std::collections::{BTreeSet, HashSet};
use std::fmt;

use strsim::jaro_winkler;

use crate::models::Guest;
use crate::planner::PortionTable;
use crate::state::{CatalogIndex, PartySnapshot};

/// Minimum similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.pad(name)
    }
}

/// One problem found in a party snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn new(severity: Severity, message: String) -> Self {
        Self { severity, message }
    }
}

/// Best fuzzy match for an unknown id among catalog ids and names.
pub fn suggest<'a>(
    unknown: &str,
    candidates: impl Iterator<Item = (&'a str, &'a str)>,
) -> Option<&'a str> {
    let needle = unknown.to_lowercase();
    candidates
        .map(|(id, name)| {
            let score = jaro_winkler(&needle, &id.to_lowercase())
                .max(jaro_winkler(&needle, &name.to_lowercase()));
            (id, score)
        })
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(id, _)| id)
}

fn unknown_reference(kind: &str, guest: &Guest, id: &str, suggestion: Option<&str>) -> Finding {
    let hint = suggestion
        .map(|s| format!(" (did you mean '{}'?)", s))
        .unwrap_or_default();
    Finding::new(
        Severity::Warning,
        format!(
            "Guest '{}' references unknown {} '{}'{}",
            guest.id, kind, id, hint
        ),
    )
}

fn check_references(party: &PartySnapshot, catalog: &CatalogIndex, findings: &mut Vec<Finding>) {
    let check_toppings = !catalog.toppings().is_empty();
    let check_beverages = !catalog.beverages().is_empty();

    for guest in &party.guests {
        if check_toppings {
            let ids: BTreeSet<&String> = guest
                .liked_toppings
                .iter()
                .chain(guest.disliked_toppings.iter())
                .collect();
            for id in ids.into_iter().filter(|id| !catalog.has_topping(id)) {
                let suggestion = suggest(
                    id,
                    catalog
                        .toppings()
                        .iter()
                        .map(|t| (t.id.as_str(), t.name.as_str())),
                );
                findings.push(unknown_reference("topping", guest, id, suggestion));
            }
        }

        if check_beverages {
            let ids: BTreeSet<&String> = guest
                .liked_beverages
                .iter()
                .chain(guest.disliked_beverages.iter())
                .collect();
            for id in ids.into_iter().filter(|id| !catalog.has_beverage(id)) {
                let suggestion = suggest(
                    id,
                    catalog
                        .beverages()
                        .iter()
                        .map(|b| (b.id.as_str(), b.name.as_str())),
                );
                findings.push(unknown_reference("beverage", guest, id, suggestion));
            }
        }
    }
}

fn check_waves(party: &PartySnapshot, findings: &mut Vec<Finding>) {
    if party.waves.len() < 2 {
        return;
    }

    for wave in &party.waves {
        if wave.effective_allocation().is_none() {
            findings.push(Finding::new(
                Severity::Warning,
                format!(
                    "Wave '{}' has an invalid weight {}; the order will not be split",
                    wave.id, wave.weight
                ),
            ));
        }
    }

    let allocated: u32 = party.waves.iter().map(|w| w.guest_allocation).sum();
    if allocated == 0 {
        findings.push(Finding::new(
            Severity::Warning,
            "Waves allocate no guests; the order will not be split".to_string(),
        ));
    } else if let Some(max) = party.max_guests {
        if allocated != max {
            findings.push(Finding::new(
                Severity::Info,
                format!(
                    "Waves allocate {} guests but the party expects {}",
                    allocated, max
                ),
            ));
        }
    }
}

/// Inspect a party snapshot for problems the planner would silently absorb.
///
/// Findings are sorted most severe first.
pub fn validate_party(party: &PartySnapshot) -> Vec<Finding> {
    let mut findings = Vec::new();

    if let Err(e) = party.size.validate() {
        let hint = PortionTable::standard()
            .servings_for(party.size.diameter_inches)
            .map(|s| format!(" (a standard {}\" pizza feeds {})", party.size.diameter_inches, s))
            .unwrap_or_default();
        findings.push(Finding::new(Severity::Error, format!("{}{}", e, hint)));
    }
    if !party.beverages_per_guest.is_finite() || party.beverages_per_guest < 0.0 {
        findings.push(Finding::new(
            Severity::Error,
            format!(
                "Beverages per guest must be zero or more, got {}",
                party.beverages_per_guest
            ),
        ));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for guest in &party.guests {
        if !seen.insert(guest.id.as_str()) {
            findings.push(Finding::new(
                Severity::Warning,
                format!("Duplicate guest id '{}'", guest.id),
            ));
        }
    }

    let catalog = CatalogIndex::new(&party.available_toppings, &party.available_beverages);
    check_references(party, &catalog, &mut findings);
    check_waves(party, &mut findings);

    let respondents = party.respondents().len() as u32;
    if let Some(max) = party.max_guests {
        if respondents > max {
            findings.push(Finding::new(
                Severity::Info,
                format!(
                    "{} guests responded but the party expects only {}",
                    respondents, max
                ),
            ));
        }
    }

    findings.sort_by(|a, b| b.severity.cmp(&a.severity));
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PizzaSize, PizzaStyle, Topping, ToppingCategory, Wave};

    fn party(guests: Vec<Guest>) -> PartySnapshot {
        PartySnapshot {
            name: "Test".to_string(),
            max_guests: None,
            requires_approval: false,
            event_start: None,
            size: PizzaSize::new(14, "Large", 4.0),
            style: PizzaStyle::default(),
            available_toppings: vec![
                Topping::new("pepperoni", "Pepperoni", ToppingCategory::Meat),
                Topping::new("mushroom", "Mushrooms", ToppingCategory::Vegetable),
            ],
            available_beverages: Vec::new(),
            waves: Vec::new(),
            beverages_per_guest: 1.0,
            guests,
        }
    }

    #[test]
    fn test_clean_party_has_no_findings() {
        let findings = validate_party(&party(vec![
            Guest::new("a", "A").liking_toppings(&["pepperoni"]),
        ]));
        assert!(findings.is_empty());
    }

    #[test]
    fn test_unknown_topping_with_suggestion() {
        let findings = validate_party(&party(vec![
            Guest::new("a", "A").liking_toppings(&["peperoni"]),
        ]));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.contains("did you mean 'pepperoni'"));
    }

    #[test]
    fn test_unrelated_id_has_no_suggestion() {
        let findings = validate_party(&party(vec![
            Guest::new("a", "A").disliking_toppings(&["zzz"]),
        ]));
        assert_eq!(findings.len(), 1);
        assert!(!findings[0].message.contains("did you mean"));
    }

    #[test]
    fn test_bad_size_is_error_and_sorted_first() {
        let mut p = party(vec![
            Guest::new("a", "A"),
            Guest::new("a", "A again"),
        ]);
        p.size.servings_per_pizza = 0.0;
        let findings = validate_party(&p);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.ends_with("(a standard 14\" pizza feeds 4)"));
        assert!(findings.iter().any(|f| f.message.contains("Duplicate guest id")));
    }

    #[test]
    fn test_zero_wave_allocation_warns() {
        let mut p = party(Vec::new());
        p.waves = vec![
            Wave::new("w1", Default::default(), 0, "A"),
            Wave::new("w2", Default::default(), 0, "B"),
        ];
        let findings = validate_party(&p);
        assert!(findings.iter().any(|f| f.message.contains("allocate no guests")));
    }

    #[test]
    fn test_suggest_prefers_closest() {
        let candidates = vec![("mushroom", "Mushrooms"), ("pepperoni", "Pepperoni")];
        let best = suggest("mushrom", candidates.iter().map(|(a, b)| (*a, *b)));
        assert_eq!(best, Some("mushroom"));
    }
}
