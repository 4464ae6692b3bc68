use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use crate::models::{BeverageRecommendation, Guest};
use crate::planner::buffer::non_respondent_gap;
use crate::planner::constants::NON_RESPONDENT_LABEL;
use crate::planner::portions::beverages_needed;
use crate::state::CatalogIndex;

/// Guests sharing the same beverage likes and dislikes.
#[derive(Debug, Clone, PartialEq)]
pub struct BeverageCluster {
    pub index: usize,
    pub guests: Vec<Guest>,
    pub liked_beverages: BTreeSet<String>,
    pub disliked_beverages: BTreeSet<String>,
}

/// Partition guests by beverage preferences limited to the party menu.
///
/// Same ordering rule as topping clusters: largest first, first-seen ties.
pub fn aggregate_beverages(guests: &[Guest], catalog: &CatalogIndex) -> Vec<BeverageCluster> {
    let mut positions: HashMap<(BTreeSet<String>, BTreeSet<String>), usize> = HashMap::new();
    let mut clusters: Vec<BeverageCluster> = Vec::new();

    for guest in guests {
        let key = (
            catalog.restrict_beverages(&guest.liked_beverages),
            catalog.restrict_beverages(&guest.disliked_beverages),
        );
        let pos = match positions.get(&key) {
            Some(&pos) => pos,
            None => {
                let pos = clusters.len();
                positions.insert(key.clone(), pos);
                clusters.push(BeverageCluster {
                    index: pos + 1,
                    guests: Vec::new(),
                    liked_beverages: key.0,
                    disliked_beverages: key.1,
                });
                pos
            }
        };
        clusters[pos].guests.push(guest.clone());
    }

    clusters.sort_by(|a, b| b.guests.len().cmp(&a.guests.len()));
    clusters
}

/// How many guests like each available beverage.
fn like_counts(guests: &[Guest], catalog: &CatalogIndex) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for guest in guests {
        for id in catalog.restrict_beverages(&guest.liked_beverages) {
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    counts
}

/// The most commonly liked beverage, or the first on the menu.
pub fn most_liked_beverage(guests: &[Guest], catalog: &CatalogIndex) -> Option<String> {
    let counts = like_counts(guests, catalog);
    catalog
        .beverages()
        .iter()
        .filter(|b| counts.get(&b.id).copied().unwrap_or(0) > 0)
        .max_by_key(|b| (counts[&b.id], Reverse(catalog.beverage_rank(&b.id))))
        .or_else(|| catalog.beverages().first())
        .map(|b| b.id.clone())
}

/// Pick the one beverage a cluster will be served.
fn choose_beverage(
    cluster: &BeverageCluster,
    counts: &HashMap<String, u32>,
    catalog: &CatalogIndex,
) -> Option<String> {
    let popularity = |id: &str| {
        (
            counts.get(id).copied().unwrap_or(0),
            Reverse(catalog.beverage_rank(id)),
        )
    };

    if let Some(id) = cluster
        .liked_beverages
        .iter()
        .max_by_key(|id| popularity(id.as_str()))
    {
        return Some(id.clone());
    }

    let acceptable: Vec<&str> = catalog
        .beverages()
        .iter()
        .map(|b| b.id.as_str())
        .filter(|id| !cluster.disliked_beverages.contains(*id))
        .collect();

    acceptable
        .iter()
        .copied()
        .filter(|id| counts.get(*id).copied().unwrap_or(0) > 0)
        .max_by_key(|id| popularity(*id))
        .or_else(|| acceptable.first().copied())
        .or_else(|| catalog.beverages().first().map(|b| b.id.as_str()))
        .map(str::to_string)
}

/// Beverage order lines for respondents.
///
/// Clusters served the same beverage are merged before rounding so the
/// order stays minimal. An empty beverage menu yields no lines.
pub fn allocate_beverages(
    guests: &[Guest],
    catalog: &CatalogIndex,
    per_guest: f64,
) -> Vec<BeverageRecommendation> {
    if catalog.beverages().is_empty() {
        return Vec::new();
    }

    let counts = like_counts(guests, catalog);
    let clusters = aggregate_beverages(guests, catalog);

    let mut merged: Vec<(String, u32)> = Vec::new();
    for cluster in &clusters {
        let Some(id) = choose_beverage(cluster, &counts, catalog) else {
            continue;
        };
        let size = cluster.guests.len() as u32;
        match merged.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, count)) => *count += size,
            None => merged.push((id, size)),
        }
    }

    let mut lines: Vec<BeverageRecommendation> = merged
        .into_iter()
        .map(|(id, guest_count)| BeverageRecommendation {
            id: format!("beverage-{id}"),
            beverage: catalog.beverage(&id),
            quantity: beverages_needed(guest_count, per_guest),
            guest_count,
            is_for_non_respondents: false,
            label: None,
        })
        .filter(|line| line.quantity > 0)
        .collect();

    lines.sort_by(|a, b| b.quantity.cmp(&a.quantity));

    tracing::debug!(
        clusters = clusters.len(),
        lines = lines.len(),
        "Allocated beverages"
    );

    lines
}

/// Extra beverages for guests who have not responded.
pub fn beverage_buffer(
    expected_guest_count: Option<u32>,
    guests: &[Guest],
    catalog: &CatalogIndex,
    per_guest: f64,
) -> Option<BeverageRecommendation> {
    let gap = non_respondent_gap(expected_guest_count, guests.len() as u32);
    if gap == 0 {
        return None;
    }
    let id = most_liked_beverage(guests, catalog)?;
    let quantity = beverages_needed(gap, per_guest);
    if quantity == 0 {
        return None;
    }

    Some(BeverageRecommendation {
        id: "beverage-non-respondents".to_string(),
        beverage: catalog.beverage(&id),
        quantity,
        guest_count: gap,
        is_for_non_respondents: true,
        label: Some(NON_RESPONDENT_LABEL.to_string()),
    })
}
