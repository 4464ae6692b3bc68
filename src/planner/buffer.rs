use std::collections::BTreeSet;

use crate::models::{PizzaKind, PizzaRecommendation, PizzaSize, PizzaStyle};
use crate::planner::constants::{CHEESE_LABEL, NON_RESPONDENT_LABEL};
use crate::planner::portions::pizzas_needed;

/// Guests expected but not yet responded.
pub fn non_respondent_gap(expected_guest_count: Option<u32>, respondent_count: u32) -> u32 {
    expected_guest_count
        .map(|expected| expected.saturating_sub(respondent_count))
        .unwrap_or(0)
}

/// Plain cheese pizzas for guests who have not responded.
///
/// Returns `None` when everyone expected has responded. The entry is kept
/// separate from respondent pizzas so hosts can see it on its own line.
pub fn pizza_buffer(
    expected_guest_count: Option<u32>,
    respondent_count: u32,
    size: &PizzaSize,
    style: &PizzaStyle,
) -> Option<PizzaRecommendation> {
    let gap = non_respondent_gap(expected_guest_count, respondent_count);
    if gap == 0 {
        return None;
    }

    Some(PizzaRecommendation {
        id: "pizza-non-respondents".to_string(),
        kind: PizzaKind::Plain {
            toppings: Vec::new(),
            guests: Vec::new(),
            dietary_restrictions: BTreeSet::new(),
        },
        guest_count: gap,
        size: size.clone(),
        style: style.clone(),
        quantity: pizzas_needed(gap, size),
        label: format!("{} ({})", CHEESE_LABEL, NON_RESPONDENT_LABEL),
        is_for_non_respondents: true,
    })
}
