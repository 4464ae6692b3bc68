use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{Beverage, Guest, PizzaSize, PizzaStyle, Topping, Wave};

/// One side of a half-and-half pizza.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaHalf {
    pub toppings: Vec<Topping>,
    pub guests: Vec<Guest>,
    pub dietary_restrictions: BTreeSet<String>,
}

/// What goes on the pizza: one topping set, or two independent halves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PizzaKind {
    #[serde(rename_all = "camelCase")]
    Plain {
        toppings: Vec<Topping>,
        guests: Vec<Guest>,
        dietary_restrictions: BTreeSet<String>,
    },
    HalfAndHalf { left: PizzaHalf, right: PizzaHalf },
}

/// A line of the pizza order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaRecommendation {
    pub id: String,
    pub kind: PizzaKind,
    pub guest_count: u32,
    pub size: PizzaSize,
    pub style: PizzaStyle,
    pub quantity: u32,
    pub label: String,
    pub is_for_non_respondents: bool,
}

impl PizzaRecommendation {
    pub fn is_half_and_half(&self) -> bool {
        matches!(self.kind, PizzaKind::HalfAndHalf { .. })
    }

    pub fn halves(&self) -> Option<(&PizzaHalf, &PizzaHalf)> {
        match &self.kind {
            PizzaKind::HalfAndHalf { left, right } => Some((left, right)),
            PizzaKind::Plain { .. } => None,
        }
    }

    /// All toppings on the pizza; for half-and-half, the union of both halves.
    pub fn toppings(&self) -> Vec<&Topping> {
        match &self.kind {
            PizzaKind::Plain { toppings, .. } => toppings.iter().collect(),
            PizzaKind::HalfAndHalf { left, right } => {
                let mut seen = BTreeSet::new();
                left.toppings
                    .iter()
                    .chain(right.toppings.iter())
                    .filter(|t| seen.insert(t.id.as_str()))
                    .collect()
            }
        }
    }

    pub fn guests(&self) -> Vec<&Guest> {
        match &self.kind {
            PizzaKind::Plain { guests, .. } => guests.iter().collect(),
            PizzaKind::HalfAndHalf { left, right } => {
                left.guests.iter().chain(right.guests.iter()).collect()
            }
        }
    }

    /// Dietary badges for the pizza; both halves' restrictions are kept.
    pub fn dietary_restrictions(&self) -> BTreeSet<String> {
        match &self.kind {
            PizzaKind::Plain {
                dietary_restrictions,
                ..
            } => dietary_restrictions.clone(),
            PizzaKind::HalfAndHalf { left, right } => left
                .dietary_restrictions
                .union(&right.dietary_restrictions)
                .cloned()
                .collect(),
        }
    }
}

/// A line of the beverage order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeverageRecommendation {
    pub id: String,
    pub beverage: Beverage,
    pub quantity: u32,
    pub guest_count: u32,
    pub is_for_non_respondents: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The order for a single delivery wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveRecommendation {
    pub wave: Wave,
    pub pizzas: Vec<PizzaRecommendation>,
    pub beverages: Vec<BeverageRecommendation>,
    pub total_pizzas: u32,
    pub total_beverages: u32,
}

impl WaveRecommendation {
    pub fn new(
        wave: Wave,
        pizzas: Vec<PizzaRecommendation>,
        beverages: Vec<BeverageRecommendation>,
    ) -> Self {
        let total_pizzas = pizzas.iter().map(|p| p.quantity).sum();
        let total_beverages = beverages.iter().map(|b| b.quantity).sum();
        Self {
            wave,
            pizzas,
            beverages,
            total_pizzas,
            total_beverages,
        }
    }
}

/// Everything the engine produces for one party snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub pizzas: Vec<PizzaRecommendation>,
    pub beverages: Vec<BeverageRecommendation>,
    pub waves: Vec<WaveRecommendation>,
    pub respondent_count: u32,
    pub non_respondent_count: u32,
    pub total_pizzas: u32,
    pub total_beverages: u32,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.pizzas.is_empty() && self.beverages.is_empty()
    }

    /// Whether the order is split across more than one delivery.
    pub fn is_multi_wave(&self) -> bool {
        self.waves.len() > 1
    }
}
