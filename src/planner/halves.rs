use crate::models::{Guest, PizzaHalf, PizzaKind, PizzaRecommendation, PizzaSize, PizzaStyle, Topping};
use crate::planner::aggregation::Cluster;
use crate::planner::constants::{CHEESE_LABEL, HALF_PIZZA_THRESHOLD};
use crate::planner::portions::{full_pizzas_and_remainder, pizzas_needed};
use crate::state::CatalogIndex;

/// Display label for a topping list.
pub fn toppings_label(toppings: &[Topping]) -> String {
    if toppings.is_empty() {
        CHEESE_LABEL.to_string()
    } else {
        toppings
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Whole pizzas allocated to one cluster.
#[derive(Debug)]
struct FullAllocation<'a> {
    cluster: &'a Cluster,
    quantity: u32,
    guests: Vec<Guest>,
}

/// Guests of one cluster waiting for a half pizza.
#[derive(Debug)]
struct PendingHalf<'a> {
    cluster: &'a Cluster,
    guests: Vec<Guest>,
}

/// Whether a leftover group is small enough to share a pizza.
fn fits_half(remainder: u32, size: &PizzaSize) -> bool {
    remainder > 0
        && pizzas_needed(remainder, size) == 1
        && (remainder as f64) < size.servings_per_pizza * HALF_PIZZA_THRESHOLD
}

/// Turn clusters into pizza lines, pairing small leftovers into half-and-half.
///
/// Clusters are processed in the order given. Leftovers smaller than half a
/// pizza are paired oldest-first regardless of toppings; an unpaired last
/// leftover goes back to its own cluster as one more pizza. Full pizzas come
/// first by descending quantity, half-and-half pizzas after.
pub fn optimize_halves(
    clusters: &[Cluster],
    size: &PizzaSize,
    style: &PizzaStyle,
    catalog: &CatalogIndex,
) -> Vec<PizzaRecommendation> {
    let mut full: Vec<FullAllocation> = Vec::new();
    let mut pool: Vec<PendingHalf> = Vec::new();

    for cluster in clusters {
        let count = cluster.guest_count();
        if count == 0 {
            continue;
        }

        let (full_pizzas, remainder) = full_pizzas_and_remainder(count, size);
        if fits_half(remainder, size) {
            let split_at = (count - remainder) as usize;
            let mut guests = cluster.guests.clone();
            let leftover = guests.split_off(split_at);
            if full_pizzas > 0 {
                full.push(FullAllocation {
                    cluster,
                    quantity: full_pizzas,
                    guests,
                });
            }
            pool.push(PendingHalf {
                cluster,
                guests: leftover,
            });
        } else {
            full.push(FullAllocation {
                cluster,
                quantity: pizzas_needed(count, size),
                guests: cluster.guests.clone(),
            });
        }
    }

    tracing::debug!(
        full = full.len(),
        pending_halves = pool.len(),
        "Allocated full pizzas"
    );

    let mut halves: Vec<(PendingHalf, PendingHalf)> = Vec::new();
    let mut pending = pool.into_iter();
    while let Some(left) = pending.next() {
        match pending.next() {
            Some(right) => halves.push((left, right)),
            None => {
                // Odd one out gets a whole pizza with the rest of its cluster
                match full
                    .iter_mut()
                    .find(|f| f.cluster.index == left.cluster.index)
                {
                    Some(existing) => {
                        existing.quantity += 1;
                        existing.guests.extend(left.guests);
                    }
                    None => full.push(FullAllocation {
                        cluster: left.cluster,
                        quantity: 1,
                        guests: left.guests,
                    }),
                }
            }
        }
    }

    full.sort_by(|a, b| b.quantity.cmp(&a.quantity));

    let mut pizzas: Vec<PizzaRecommendation> = full
        .into_iter()
        .map(|f| plain_pizza(f, size, style, catalog))
        .collect();
    pizzas.extend(
        halves
            .into_iter()
            .map(|(left, right)| half_and_half_pizza(left, right, size, style, catalog)),
    );
    pizzas
}

fn plain_pizza(
    allocation: FullAllocation,
    size: &PizzaSize,
    style: &PizzaStyle,
    catalog: &CatalogIndex,
) -> PizzaRecommendation {
    let toppings = catalog.resolve_toppings(&allocation.cluster.liked_toppings);
    let label = toppings_label(&toppings);
    PizzaRecommendation {
        id: format!("pizza-{}", allocation.cluster.index),
        guest_count: allocation.guests.len() as u32,
        kind: PizzaKind::Plain {
            toppings,
            guests: allocation.guests,
            dietary_restrictions: allocation.cluster.dietary_restrictions.clone(),
        },
        size: size.clone(),
        style: style.clone(),
        quantity: allocation.quantity,
        label,
        is_for_non_respondents: false,
    }
}

fn to_half(pending: PendingHalf, catalog: &CatalogIndex) -> PizzaHalf {
    PizzaHalf {
        toppings: catalog.resolve_toppings(&pending.cluster.liked_toppings),
        guests: pending.guests,
        dietary_restrictions: pending.cluster.dietary_restrictions.clone(),
    }
}

fn half_and_half_pizza(
    left: PendingHalf,
    right: PendingHalf,
    size: &PizzaSize,
    style: &PizzaStyle,
    catalog: &CatalogIndex,
) -> PizzaRecommendation {
    let id = format!("pizza-{}-{}", left.cluster.index, right.cluster.index);
    let left = to_half(left, catalog);
    let right = to_half(right, catalog);
    let label = format!(
        "{} / {}",
        toppings_label(&left.toppings),
        toppings_label(&right.toppings)
    );
    PizzaRecommendation {
        id,
        guest_count: (left.guests.len() + right.guests.len()) as u32,
        kind: PizzaKind::HalfAndHalf { left, right },
        size: size.clone(),
        style: style.clone(),
        quantity: 1,
        label,
        is_for_non_respondents: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ToppingCategory;
    use crate::planner::aggregation::aggregate;

    fn catalog() -> CatalogIndex {
        CatalogIndex::new(
            &[
                Topping::new("pep", "Pepperoni", ToppingCategory::Meat),
                Topping::new("mush", "Mushrooms", ToppingCategory::Vegetable),
                Topping::new("olive", "Olives", ToppingCategory::Vegetable),
            ],
            &[],
        )
    }

    fn large() -> PizzaSize {
        PizzaSize::new(14, "Large", 4.0)
    }

    fn guests_liking(prefix: &str, topping: &str, count: usize) -> Vec<Guest> {
        (0..count)
            .map(|i| Guest::new(&format!("{prefix}{i}"), prefix).liking_toppings(&[topping]))
            .collect()
    }

    fn plan(guests: &[Guest]) -> Vec<PizzaRecommendation> {
        let catalog = catalog();
        let clusters = aggregate(guests, &catalog);
        optimize_halves(&clusters, &large(), &PizzaStyle::default(), &catalog)
    }

    #[test]
    fn test_two_singletons_share_a_half_and_half() {
        let mut guests = guests_liking("a", "pep", 1);
        guests.extend(guests_liking("b", "mush", 1));
        let pizzas = plan(&guests);

        assert_eq!(pizzas.len(), 1);
        let (left, right) = pizzas[0].halves().unwrap();
        assert_eq!(left.toppings[0].name, "Pepperoni");
        assert_eq!(right.toppings[0].name, "Mushrooms");
        assert_eq!(pizzas[0].label, "Pepperoni / Mushrooms");
        assert_eq!(pizzas[0].quantity, 1);
    }

    #[test]
    fn test_lone_remainder_rejoins_its_cluster() {
        let guests: Vec<Guest> = guests_liking("v", "mush", 5)
            .into_iter()
            .map(|g| g.with_restrictions(&["Vegetarian"]))
            .collect();
        let pizzas = plan(&guests);

        assert_eq!(pizzas.len(), 1);
        assert_eq!(pizzas[0].quantity, 2);
        assert_eq!(pizzas[0].guest_count, 5);
        assert!(!pizzas[0].is_half_and_half());
        assert!(pizzas[0].dietary_restrictions().contains("Vegetarian"));
    }

    #[test]
    fn test_large_remainder_gets_whole_pizza() {
        let pizzas = plan(&guests_liking("p", "pep", 7));
        assert_eq!(pizzas.len(), 1);
        assert_eq!(pizzas[0].quantity, 2);
        assert_eq!(pizzas[0].guest_count, 7);
    }

    #[test]
    fn test_full_pizzas_before_halves_sorted_by_quantity() {
        let mut guests = guests_liking("p", "pep", 5);
        guests.extend(guests_liking("m", "mush", 9));
        guests.extend(guests_liking("o", "olive", 1));
        let pizzas = plan(&guests);

        // mush: 2 full + leftover, pep: 1 full + leftover, olive: leftover only
        let quantities: Vec<u32> = pizzas.iter().map(|p| p.quantity).collect();
        assert_eq!(quantities, vec![2, 1, 1, 1]);
        let ids: Vec<&str> = pizzas.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["pizza-2", "pizza-1", "pizza-3", "pizza-2-1"]);
        // mush and pep leftovers are paired; olive is the odd one out
        assert!(pizzas[3].is_half_and_half());
        assert_eq!(pizzas[2].guest_count, 1);

        let total: u32 = pizzas.iter().map(|p| p.guest_count).sum();
        assert_eq!(total, 15);
    }

    #[test]
    fn test_halves_are_disjoint() {
        let mut guests = guests_liking("a", "pep", 1);
        guests.extend(guests_liking("b", "mush", 1));
        let pizzas = plan(&guests);
        let (left, right) = pizzas[0].halves().unwrap();
        for guest in &left.guests {
            assert!(!right.guests.iter().any(|g| g.id == guest.id));
        }
        assert_eq!(
            (left.guests.len() + right.guests.len()) as u32,
            pizzas[0].guest_count
        );
    }

    #[test]
    fn test_restrictions_survive_pairing() {
        let guests = vec![
            Guest::new("a", "A")
                .liking_toppings(&["pep"])
                .with_restrictions(&["Halal"]),
            Guest::new("b", "B")
                .liking_toppings(&["mush"])
                .with_restrictions(&["Vegan"]),
        ];
        let pizzas = plan(&guests);
        let restrictions = pizzas[0].dietary_restrictions();
        assert!(restrictions.contains("Halal"));
        assert!(restrictions.contains("Vegan"));
    }

    #[test]
    fn test_empty_input() {
        assert!(plan(&[]).is_empty());
    }
}
