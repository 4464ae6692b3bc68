use std::fmt::Write;

use crate::models::{PizzaRecommendation, Recommendations};
use crate::planner::toppings_label;

fn plural(count: u32, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

fn pizza_phrase(pizza: &PizzaRecommendation) -> String {
    let what = match pizza.halves() {
        Some((left, right)) => format!(
            "half {}, half {}",
            toppings_label(&left.toppings),
            toppings_label(&right.toppings)
        ),
        None => pizza.label.clone(),
    };
    let noun = if pizza.quantity == 1 { "pizza" } else { "pizzas" };
    format!(
        "{} {} {} {}: {}",
        pizza.quantity, pizza.size.name, pizza.style.name, noun, what
    )
}

fn write_pizzas(out: &mut String, pizzas: &[PizzaRecommendation]) {
    for pizza in pizzas {
        let _ = writeln!(out, "- {}", pizza_phrase(pizza));
    }
}

/// Plain-text order to read over the phone or paste into a chat.
pub fn order_script(recs: &Recommendations, party_name: &str, pizzeria: Option<&str>) -> String {
    let mut out = String::new();

    match pizzeria {
        Some(name) => {
            let _ = writeln!(out, "Hi {}, I'd like to place an order for {}.", name, party_name);
        }
        None => {
            let _ = writeln!(out, "Hi, I'd like to place an order for {}.", party_name);
        }
    }

    if recs.is_empty() {
        let _ = writeln!(out, "Actually, nothing to order yet. Thanks!");
        return out;
    }

    if recs.is_multi_wave() {
        let _ = writeln!(out, "We need it in {} deliveries.", recs.waves.len());
        for wave in &recs.waves {
            if wave.pizzas.is_empty() && wave.beverages.is_empty() {
                continue;
            }
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Delivery at {} ({}):",
                wave.wave.arrival_time.format("%H:%M on %Y-%m-%d"),
                wave.wave.label
            );
            write_pizzas(&mut out, &wave.pizzas);
            for beverage in &wave.beverages {
                let _ = writeln!(out, "- {} x {}", beverage.quantity, beverage.beverage.name);
            }
        }
    } else {
        let _ = writeln!(out);
        write_pizzas(&mut out, &recs.pizzas);
        if !recs.beverages.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "And to drink:");
            for beverage in &recs.beverages {
                let _ = writeln!(out, "- {} x {}", beverage.quantity, beverage.beverage.name);
            }
        }
    }

    // Per-wave rounding can deliver more than the unsplit order
    let delivered: u32 = recs.waves.iter().map(|w| w.total_pizzas).sum();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "That's {} and {} in total. Thanks!",
        plural(delivered, "pizza", "pizzas"),
        plural(recs.total_beverages, "drink", "drinks")
    );
    out
}
