use crate::models::{BeverageRecommendation, PizzaRecommendation, Recommendations};
use crate::planner::{toppings_label, PortionTable};
use crate::state::Finding;

/// Dietary badges as "[Vegan] [Halal]".
fn badges(pizza: &PizzaRecommendation) -> String {
    pizza
        .dietary_restrictions()
        .iter()
        .map(|r| format!("[{}]", r))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One printed line for a pizza.
pub fn pizza_line(pizza: &PizzaRecommendation) -> String {
    let description = match pizza.halves() {
        Some((left, right)) => format!(
            "Half & half: {} | {}",
            toppings_label(&left.toppings),
            toppings_label(&right.toppings)
        ),
        None => pizza.label.clone(),
    };
    let badges = badges(pizza);
    let badges = if badges.is_empty() {
        String::new()
    } else {
        format!(" {}", badges)
    };

    format!(
        "{:>3} x {}\" {} {} - {}{} ({} guests)",
        pizza.quantity,
        pizza.size.diameter_inches,
        pizza.style.name,
        pizza.size.name,
        description,
        badges,
        pizza.guest_count
    )
}

pub fn beverage_line(beverage: &BeverageRecommendation) -> String {
    let note = beverage
        .label
        .as_ref()
        .map(|l| format!(" [{}]", l))
        .unwrap_or_default();
    format!(
        "{:>3} x {}{} ({} guests)",
        beverage.quantity, beverage.beverage.name, note, beverage.guest_count
    )
}

fn print_pizzas(pizzas: &[PizzaRecommendation]) {
    if pizzas.is_empty() {
        println!("  (no pizzas)");
        return;
    }
    for pizza in pizzas {
        println!("  {}", pizza_line(pizza));
    }
}

fn print_beverages(beverages: &[BeverageRecommendation]) {
    if beverages.is_empty() {
        println!("  (no beverages)");
        return;
    }
    for beverage in beverages {
        println!("  {}", beverage_line(beverage));
    }
}

/// Display the order summary, per wave when the order is split.
pub fn display_recommendations(recs: &Recommendations) {
    if recs.is_empty() {
        println!("Nothing to order yet (no responses and no expected guest count).");
        return;
    }

    println!();
    println!("=== Pizza Order ===");

    if recs.is_multi_wave() {
        for (i, wave) in recs.waves.iter().enumerate() {
            println!();
            println!(
                "--- Wave {}: {} at {} ({} pizzas) ---",
                i + 1,
                wave.wave.label,
                wave.wave.arrival_time.format("%Y-%m-%d %H:%M"),
                wave.total_pizzas
            );
            print_pizzas(&wave.pizzas);
        }
    } else {
        println!();
        print_pizzas(&recs.pizzas);
    }

    println!();
    println!("=== Beverages (order once) ===");
    println!();
    print_beverages(&recs.beverages);

    println!();
    println!("--- Summary ---");
    println!("Respondents: {}", recs.respondent_count);
    if recs.non_respondent_count > 0 {
        println!("Not yet responded: {}", recs.non_respondent_count);
    }
    let wave_pizzas: u32 = recs.waves.iter().map(|w| w.total_pizzas).sum();
    println!("Total pizzas: {}", wave_pizzas);
    println!("Total beverages: {}", recs.total_beverages);
    println!();
}

/// Display validation findings.
pub fn display_findings(findings: &[Finding]) {
    if findings.is_empty() {
        println!("No problems found.");
        return;
    }
    for finding in findings {
        println!("{:>7}: {}", finding.severity, finding.message);
    }
}

/// Display the standard size ladder.
pub fn display_portion_table(table: &PortionTable) {
    println!();
    println!("=== Pizza Sizes ===");
    println!();
    for size in table.sizes() {
        println!(
            "  {:>2}\" {:<12} feeds {:.1}",
            size.diameter_inches, size.name, size.servings_per_pizza
        );
    }
    println!();
}
