use std::collections::{BTreeSet, HashMap};

use crate::models::Guest;
use crate::state::CatalogIndex;

/// The effective preference signature two guests must share to share a pizza.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreferenceKey {
    pub dietary_restrictions: BTreeSet<String>,
    pub liked_toppings: BTreeSet<String>,
    pub disliked_toppings: BTreeSet<String>,
}

impl PreferenceKey {
    /// Build a guest's key against the party menu.
    ///
    /// This is not the raw (restrictions, likes, dislikes) triple. Liked
    /// toppings are limited to what the host offers, and with nothing liked
    /// the pizza is plain cheese, so dislikes are dropped from the key.
    pub fn for_guest(guest: &Guest, catalog: &CatalogIndex) -> Self {
        let liked_toppings = catalog.restrict_toppings(&guest.liked_toppings);
        let disliked_toppings = if liked_toppings.is_empty() {
            BTreeSet::new()
        } else {
            guest.disliked_toppings.clone()
        };
        Self {
            dietary_restrictions: guest.effective_restrictions(),
            liked_toppings,
            disliked_toppings,
        }
    }
}

/// Guests sharing one preference signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// 1-based first-seen position, stable across runs.
    pub index: usize,
    pub guests: Vec<Guest>,
    pub dietary_restrictions: BTreeSet<String>,
    pub liked_toppings: BTreeSet<String>,
    pub disliked_toppings: BTreeSet<String>,
}

impl Cluster {
    fn from_key(index: usize, key: PreferenceKey) -> Self {
        Self {
            index,
            guests: Vec::new(),
            dietary_restrictions: key.dietary_restrictions,
            liked_toppings: key.liked_toppings,
            disliked_toppings: key.disliked_toppings,
        }
    }

    pub fn guest_count(&self) -> u32 {
        self.guests.len() as u32
    }

    pub fn is_default_cheese(&self) -> bool {
        self.dietary_restrictions.is_empty() && self.liked_toppings.is_empty()
    }
}

/// Partition guests into clusters of identical preference keys.
///
/// Largest clusters come first; equal sizes keep first-seen order.
pub fn aggregate(guests: &[Guest], catalog: &CatalogIndex) -> Vec<Cluster> {
    let mut positions: HashMap<PreferenceKey, usize> = HashMap::new();
    let mut clusters: Vec<Cluster> = Vec::new();

    for guest in guests {
        let key = PreferenceKey::for_guest(guest, catalog);
        let pos = match positions.get(&key) {
            Some(&pos) => pos,
            None => {
                let pos = clusters.len();
                positions.insert(key.clone(), pos);
                clusters.push(Cluster::from_key(pos + 1, key));
                pos
            }
        };
        clusters[pos].guests.push(guest.clone());
    }

    // Stable sort keeps first-seen order among equal sizes
    clusters.sort_by(|a, b| b.guests.len().cmp(&a.guests.len()));

    let cheese_guests: u32 = clusters
        .iter()
        .filter(|c| c.is_default_cheese())
        .map(Cluster::guest_count)
        .sum();
    tracing::debug!(
        guests = guests.len(),
        clusters = clusters.len(),
        cheese_guests,
        "Aggregated guest preferences"
    );

    clusters
}
