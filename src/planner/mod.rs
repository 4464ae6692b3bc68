pub mod aggregation;
pub mod beverages;
pub mod buffer;
pub mod constants;
pub mod halves;
pub mod portions;
pub mod service;
pub mod waves;

pub use aggregation::{aggregate, Cluster, PreferenceKey};
pub use beverages::{aggregate_beverages, allocate_beverages, beverage_buffer, most_liked_beverage};
pub use buffer::{non_respondent_gap, pizza_buffer};
pub use constants::*;
pub use halves::{optimize_halves, toppings_label};
pub use portions::{beverages_needed, pizzas_needed, EngineConfig};
pub use service::{generate_recommendations, RecommendationRequest};
pub use waves::allocate_waves;
