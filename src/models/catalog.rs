use serde::{Deserialize, Serialize};

/// Broad grouping used when displaying the topping menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToppingCategory {
    Meat,
    Vegetable,
    Cheese,
    Fruit,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeverageCategory {
    Soda,
    Juice,
    Water,
    Alcohol,
    #[default]
    Other,
}

/// A topping from the party's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topping {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: ToppingCategory,
}

impl Topping {
    pub fn new(id: &str, name: &str, category: ToppingCategory) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
        }
    }

    /// Stand-in for an id that is not in the catalog: the raw id is the label.
    pub fn opaque(id: &str) -> Self {
        Self::new(id, id, ToppingCategory::Other)
    }
}

/// A beverage from the party's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Beverage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: BeverageCategory,
}

impl Beverage {
    pub fn new(id: &str, name: &str, category: BeverageCategory) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
        }
    }

    pub fn opaque(id: &str) -> Self {
        Self::new(id, id, BeverageCategory::Other)
    }
}
