mod catalog;
mod guest;
mod party;
mod recommendation;

pub use catalog::{Beverage, BeverageCategory, Topping, ToppingCategory};
pub use guest::Guest;
pub use party::{PizzaSize, PizzaStyle, Wave};
pub use recommendation::{
    BeverageRecommendation, PizzaHalf, PizzaKind, PizzaRecommendation, Recommendations,
    WaveRecommendation,
};
