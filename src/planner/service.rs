use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{
    Beverage, Guest, PizzaSize, PizzaStyle, Recommendations, Topping, Wave,
};
use crate::planner::aggregation::aggregate;
use crate::planner::beverages::{allocate_beverages, beverage_buffer};
use crate::planner::buffer::{non_respondent_gap, pizza_buffer};
use crate::planner::halves::optimize_halves;
use crate::planner::portions::EngineConfig;
use crate::planner::waves::allocate_waves;
use crate::state::CatalogIndex;

/// A snapshot of everything the engine needs for one party.
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    /// Respondents; approval filtering has already happened.
    pub guests: Vec<Guest>,
    pub available_toppings: Vec<Topping>,
    pub available_beverages: Vec<Beverage>,
    pub size: PizzaSize,
    pub style: PizzaStyle,
    /// The party's expected head count (`maxGuests`).
    pub expected_guest_count: Option<u32>,
    pub waves: Vec<Wave>,
    pub event_start: Option<DateTime<Utc>>,
    pub config: EngineConfig,
}

impl RecommendationRequest {
    pub fn new(guests: Vec<Guest>, size: PizzaSize) -> Self {
        Self {
            guests,
            available_toppings: Vec::new(),
            available_beverages: Vec::new(),
            size,
            style: PizzaStyle::default(),
            expected_guest_count: None,
            waves: Vec::new(),
            event_start: None,
            config: EngineConfig::default(),
        }
    }
}

/// Produce the full pizza and beverage order for a party.
///
/// Pure function of the request: the same input always yields the same
/// output. Fails only on an unusable pizza size or beverage ratio.
pub fn generate_recommendations(request: &RecommendationRequest) -> Result<Recommendations> {
    request.size.validate()?;
    request.config.validate()?;

    let catalog = CatalogIndex::new(&request.available_toppings, &request.available_beverages);
    let respondent_count = request.guests.len() as u32;
    let non_respondent_count = non_respondent_gap(request.expected_guest_count, respondent_count);

    let clusters = aggregate(&request.guests, &catalog);
    let mut pizzas = optimize_halves(&clusters, &request.size, &request.style, &catalog);
    if let Some(buffer) = pizza_buffer(
        request.expected_guest_count,
        respondent_count,
        &request.size,
        &request.style,
    ) {
        pizzas.push(buffer);
    }

    let per_guest = request.config.beverages_per_guest;
    let mut beverages = allocate_beverages(&request.guests, &catalog, per_guest);
    if let Some(buffer) = beverage_buffer(
        request.expected_guest_count,
        &request.guests,
        &catalog,
        per_guest,
    ) {
        beverages.push(buffer);
    }

    let waves = allocate_waves(
        &pizzas,
        &beverages,
        &request.waves,
        &request.size,
        request.event_start,
    );

    let total_pizzas = pizzas.iter().map(|p| p.quantity).sum();
    let total_beverages = beverages.iter().map(|b| b.quantity).sum();

    tracing::info!(
        respondents = respondent_count,
        non_respondents = non_respondent_count,
        clusters = clusters.len(),
        pizzas = total_pizzas,
        beverages = total_beverages,
        waves = waves.len(),
        "Generated recommendations"
    );

    Ok(Recommendations {
        pizzas,
        beverages,
        waves,
        respondent_count,
        non_respondent_count,
        total_pizzas,
        total_beverages,
    })
}
