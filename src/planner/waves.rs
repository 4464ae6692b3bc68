use chrono::{DateTime, Utc};

use crate::models::{
    BeverageRecommendation, Guest, PizzaKind, PizzaRecommendation, PizzaSize, Wave,
    WaveRecommendation,
};
use crate::planner::constants::{QUANTITY_EPSILON, SINGLE_WAVE_ID, SINGLE_WAVE_LABEL};
use crate::planner::portions::pizzas_needed;

/// The wave that carries the whole order when it is not split.
fn single_wave(
    waves: &[Wave],
    pizzas: &[PizzaRecommendation],
    event_start: Option<DateTime<Utc>>,
) -> Wave {
    if let [only] = waves {
        return only.clone();
    }
    let arrival_time = waves
        .iter()
        .map(|w| w.arrival_time)
        .min()
        .or(event_start)
        .unwrap_or_default();
    Wave::new(
        SINGLE_WAVE_ID,
        arrival_time,
        pizzas.iter().map(|p| p.guest_count).sum(),
        SINGLE_WAVE_LABEL,
    )
}

/// Each wave's fraction of the guests, or `None` if the split is unusable.
fn wave_shares(waves: &[Wave]) -> Option<Vec<f64>> {
    let allocations: Vec<f64> = waves
        .iter()
        .map(Wave::effective_allocation)
        .collect::<Option<Vec<f64>>>()?;
    let total: f64 = allocations.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }
    Some(allocations.iter().map(|a| a / total).collect())
}

/// Split `count` by `shares`, flooring each part; the leftover goes first.
fn split_count(count: u32, shares: &[f64]) -> Vec<u32> {
    let mut parts: Vec<u32> = shares
        .iter()
        .map(|share| (count as f64 * share + QUANTITY_EPSILON).floor() as u32)
        .collect();
    let assigned: u32 = parts.iter().sum();
    if let Some(first) = parts.first_mut() {
        *first += count.saturating_sub(assigned);
    }
    parts
}

/// Index of the largest share; ties go to the earliest wave.
fn largest_share(shares: &[f64]) -> usize {
    let mut best = 0;
    for (i, share) in shares.iter().enumerate() {
        if *share > shares[best] {
            best = i;
        }
    }
    best
}

/// Split one plain pizza line into per-wave lines.
fn split_plain(
    pizza: &PizzaRecommendation,
    shares: &[f64],
    size: &PizzaSize,
) -> Vec<Option<PizzaRecommendation>> {
    let PizzaKind::Plain {
        toppings,
        guests,
        dietary_restrictions,
    } = &pizza.kind
    else {
        return Vec::new();
    };

    let guest_parts = split_count(pizza.guest_count, shares);
    let mut quantities: Vec<u32> = guest_parts.iter().map(|g| pizzas_needed(*g, size)).collect();

    // Never deliver fewer pizzas than the unsplit order
    let delivered: u32 = quantities.iter().sum();
    if let Some(first) = quantities.first_mut() {
        *first += pizza.quantity.saturating_sub(delivered);
    }

    let mut remaining: &[Guest] = guests;
    guest_parts
        .iter()
        .zip(quantities)
        .map(|(&wave_guests, quantity)| {
            let take = (wave_guests as usize).min(remaining.len());
            let (chunk, rest) = remaining.split_at(take);
            remaining = rest;
            if quantity == 0 {
                return None;
            }
            Some(PizzaRecommendation {
                kind: PizzaKind::Plain {
                    toppings: toppings.clone(),
                    guests: chunk.to_vec(),
                    dietary_restrictions: dietary_restrictions.clone(),
                },
                guest_count: wave_guests,
                quantity,
                ..pizza.clone()
            })
        })
        .collect()
}

/// Distribute the order across delivery waves.
///
/// With fewer than two usable waves the full lists ride on one wave.
/// Otherwise each plain pizza line is split by the waves' guest shares and
/// rounded up per wave, with any shortfall against the unsplit quantity added
/// to the earliest wave. Half-and-half pizzas are a single unit and go whole
/// to the wave with the largest share. Beverages are ordered once and ride
/// with the first wave.
pub fn allocate_waves(
    pizzas: &[PizzaRecommendation],
    beverages: &[BeverageRecommendation],
    waves: &[Wave],
    size: &PizzaSize,
    event_start: Option<DateTime<Utc>>,
) -> Vec<WaveRecommendation> {
    let single = || {
        vec![WaveRecommendation::new(
            single_wave(waves, pizzas, event_start),
            pizzas.to_vec(),
            beverages.to_vec(),
        )]
    };

    if waves.len() <= 1 {
        return single();
    }

    let mut ordered: Vec<Wave> = waves.to_vec();
    ordered.sort_by_key(|w| w.arrival_time);

    let Some(shares) = wave_shares(&ordered) else {
        tracing::warn!(
            waves = waves.len(),
            "Wave guest allocations are unusable, ordering as a single wave"
        );
        return single();
    };

    let mut per_wave: Vec<Vec<PizzaRecommendation>> = vec![Vec::new(); ordered.len()];
    let biggest = largest_share(&shares);

    for pizza in pizzas {
        if pizza.is_half_and_half() {
            per_wave[biggest].push(pizza.clone());
            continue;
        }
        for (i, line) in split_plain(pizza, &shares, size).into_iter().enumerate() {
            if let Some(line) = line {
                per_wave[i].push(line);
            }
        }
    }

    tracing::debug!(waves = ordered.len(), "Split pizzas across waves");

    ordered
        .into_iter()
        .zip(per_wave)
        .enumerate()
        .map(|(i, (wave, wave_pizzas))| {
            let wave_beverages = if i == 0 {
                beverages.to_vec()
            } else {
                Vec::new()
            };
            WaveRecommendation::new(wave, wave_pizzas, wave_beverages)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::TimeZone;

    use super::*;
    use crate::models::{Beverage, BeverageCategory, PizzaHalf, PizzaStyle};

    fn large() -> PizzaSize {
        PizzaSize::new(14, "Large", 4.0)
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 31, hour, 0, 0).unwrap()
    }

    fn guests(count: usize) -> Vec<Guest> {
        (0..count)
            .map(|i| Guest::new(&format!("g{i}"), "G"))
            .collect()
    }

    fn cheese(guest_count: usize) -> PizzaRecommendation {
        PizzaRecommendation {
            id: "pizza-1".to_string(),
            kind: PizzaKind::Plain {
                toppings: Vec::new(),
                guests: guests(guest_count),
                dietary_restrictions: BTreeSet::new(),
            },
            guest_count: guest_count as u32,
            size: large(),
            style: PizzaStyle::default(),
            quantity: pizzas_needed(guest_count as u32, &large()),
            label: "Cheese".to_string(),
            is_for_non_respondents: false,
        }
    }

    fn half_and_half() -> PizzaRecommendation {
        let side = |id: &str| PizzaHalf {
            toppings: Vec::new(),
            guests: vec![Guest::new(id, id)],
            dietary_restrictions: BTreeSet::new(),
        };
        PizzaRecommendation {
            id: "pizza-2-3".to_string(),
            kind: PizzaKind::HalfAndHalf {
                left: side("x"),
                right: side("y"),
            },
            guest_count: 2,
            quantity: 1,
            label: "Cheese / Cheese".to_string(),
            ..cheese(0)
        }
    }

    fn cola() -> BeverageRecommendation {
        BeverageRecommendation {
            id: "beverage-cola".to_string(),
            beverage: Beverage::new("cola", "Cola", BeverageCategory::Soda),
            quantity: 8,
            guest_count: 8,
            is_for_non_respondents: false,
            label: None,
        }
    }

    #[test]
    fn test_no_waves_gives_synthetic_single_wave() {
        let result = allocate_waves(&[cheese(8)], &[cola()], &[], &large(), Some(at(18)));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].wave.id, SINGLE_WAVE_ID);
        assert_eq!(result[0].wave.arrival_time, at(18));
        assert_eq!(result[0].total_pizzas, 2);
        assert_eq!(result[0].total_beverages, 8);
    }

    #[test]
    fn test_one_wave_is_used_as_is() {
        let wave = Wave::new("w1", at(19), 8, "Dinner");
        let result = allocate_waves(&[cheese(8)], &[], &[wave.clone()], &large(), None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].wave, wave);
        assert_eq!(result[0].pizzas, vec![cheese(8)]);
    }

    #[test]
    fn test_zero_allocations_fall_back_to_single_wave() {
        let waves = vec![Wave::new("w1", at(18), 0, "A"), Wave::new("w2", at(20), 0, "B")];
        let result = allocate_waves(&[cheese(8)], &[], &waves, &large(), None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].wave.arrival_time, at(18));
        assert_eq!(result[0].total_pizzas, 2);
    }

    #[test]
    fn test_even_split() {
        let waves = vec![Wave::new("w1", at(18), 10, "A"), Wave::new("w2", at(20), 10, "B")];
        let result = allocate_waves(&[cheese(8)], &[cola()], &waves, &large(), None);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].total_pizzas, 1);
        assert_eq!(result[1].total_pizzas, 1);
        assert_eq!(result[0].pizzas[0].guest_count, 4);
        assert_eq!(result[1].pizzas[0].guests()[0].id, "g4");
        // beverages are ordered once, with the first delivery
        assert_eq!(result[0].total_beverages, 8);
        assert!(result[1].beverages.is_empty());
    }

    #[test]
    fn test_rounding_never_under_delivers() {
        let waves = vec![
            Wave::new("w1", at(18), 1, "A"),
            Wave::new("w2", at(19), 1, "B"),
            Wave::new("w3", at(20), 1, "C"),
        ];
        let result = allocate_waves(&[cheese(5)], &[], &waves, &large(), None);
        let guest_parts: Vec<u32> = result.iter().map(|w| w.pizzas[0].guest_count).collect();
        assert_eq!(guest_parts, vec![3, 1, 1]);
        let total: u32 = result.iter().map(|w| w.total_pizzas).sum();
        assert!(total >= 2);
    }

    #[test]
    fn test_waves_sorted_by_arrival() {
        let waves = vec![Wave::new("late", at(21), 5, "Late"), Wave::new("early", at(17), 5, "Early")];
        let result = allocate_waves(&[cheese(4)], &[cola()], &waves, &large(), None);
        assert_eq!(result[0].wave.id, "early");
        assert_eq!(result[0].total_beverages, 8);
    }

    #[test]
    fn test_half_and_half_goes_to_largest_wave() {
        let waves = vec![Wave::new("w1", at(18), 2, "A"), Wave::new("w2", at(20), 6, "B")];
        let result = allocate_waves(&[half_and_half()], &[], &waves, &large(), None);
        assert!(result[0].pizzas.is_empty());
        assert_eq!(result[1].pizzas.len(), 1);
        assert!(result[1].pizzas[0].is_half_and_half());
    }

    #[test]
    fn test_weight_scales_share() {
        let mut light = Wave::new("w1", at(18), 4, "A");
        light.weight = 0.0;
        let waves = vec![light, Wave::new("w2", at(20), 4, "B")];
        let result = allocate_waves(&[cheese(8)], &[], &waves, &large(), None);
        assert_eq!(result[0].total_pizzas, 0);
        assert_eq!(result[1].total_pizzas, 2);
    }

    #[test]
    fn test_split_count_conserves_guests() {
        assert_eq!(split_count(10, &[0.5, 0.3, 0.2]), vec![5, 3, 2]);
        assert_eq!(split_count(7, &[0.25, 0.25, 0.5]), vec![3, 1, 3]);
        assert_eq!(split_count(0, &[0.5, 0.5]), vec![0, 0]);
    }
}
