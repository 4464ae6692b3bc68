use std::collections::{BTreeSet, HashMap};

use crate::models::{Beverage, Topping};

/// Id lookup over the party's available toppings and beverages.
///
/// Ids missing from the catalog resolve to opaque entries labelled with the
/// raw id, so unknown references never break planning.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    toppings: Vec<Topping>,
    beverages: Vec<Beverage>,
    topping_pos: HashMap<String, usize>,
    beverage_pos: HashMap<String, usize>,
}

impl CatalogIndex {
    /// Build the index; duplicate ids keep their first occurrence.
    pub fn new(toppings: &[Topping], beverages: &[Beverage]) -> Self {
        let mut index = Self::default();
        for topping in toppings {
            if !index.topping_pos.contains_key(&topping.id) {
                index
                    .topping_pos
                    .insert(topping.id.clone(), index.toppings.len());
                index.toppings.push(topping.clone());
            }
        }
        for beverage in beverages {
            if !index.beverage_pos.contains_key(&beverage.id) {
                index
                    .beverage_pos
                    .insert(beverage.id.clone(), index.beverages.len());
                index.beverages.push(beverage.clone());
            }
        }
        index
    }

    pub fn toppings(&self) -> &[Topping] {
        &self.toppings
    }

    pub fn beverages(&self) -> &[Beverage] {
        &self.beverages
    }

    pub fn has_topping(&self, id: &str) -> bool {
        self.topping_pos.contains_key(id)
    }

    pub fn has_beverage(&self, id: &str) -> bool {
        self.beverage_pos.contains_key(id)
    }

    /// Resolve a topping id, falling back to an opaque entry.
    pub fn topping(&self, id: &str) -> Topping {
        self.topping_pos
            .get(id)
            .map(|&i| self.toppings[i].clone())
            .unwrap_or_else(|| Topping::opaque(id))
    }

    pub fn beverage(&self, id: &str) -> Beverage {
        self.beverage_pos
            .get(id)
            .map(|&i| self.beverages[i].clone())
            .unwrap_or_else(|| Beverage::opaque(id))
    }

    /// Position of a beverage in the catalog, unknown ids sort last.
    pub fn beverage_rank(&self, id: &str) -> usize {
        self.beverage_pos.get(id).copied().unwrap_or(usize::MAX)
    }

    /// Resolve topping ids in catalog order; unknown ids follow, sorted.
    pub fn resolve_toppings(&self, ids: &BTreeSet<String>) -> Vec<Topping> {
        let mut known: Vec<(usize, Topping)> = Vec::new();
        let mut unknown: Vec<Topping> = Vec::new();
        for id in ids {
            match self.topping_pos.get(id) {
                Some(&i) => known.push((i, self.toppings[i].clone())),
                None => unknown.push(Topping::opaque(id)),
            }
        }
        known.sort_by_key(|(i, _)| *i);
        known.into_iter().map(|(_, t)| t).chain(unknown).collect()
    }

    /// Keep only liked toppings the host offers.
    ///
    /// An empty menu means the host has not restricted toppings.
    pub fn restrict_toppings(&self, ids: &BTreeSet<String>) -> BTreeSet<String> {
        if self.toppings.is_empty() {
            return ids.clone();
        }
        ids.iter()
            .filter(|id| self.has_topping(id))
            .cloned()
            .collect()
    }

    pub fn restrict_beverages(&self, ids: &BTreeSet<String>) -> BTreeSet<String> {
        ids.iter()
            .filter(|id| self.has_beverage(id))
            .cloned()
            .collect()
    }
}
