use std::path::Path;

use crate::error::Result;
use crate::models::Recommendations;

fn join(items: impl IntoIterator<Item = String>) -> String {
    items.into_iter().collect::<Vec<_>>().join("; ")
}

/// Write the order as one CSV row per wave line.
pub fn write_order_csv(recs: &Recommendations, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "wave",
        "arrival_time",
        "item",
        "id",
        "label",
        "quantity",
        "guest_count",
        "size",
        "style",
        "dietary",
        "non_respondents",
    ])?;

    for wave in &recs.waves {
        let arrival = wave.wave.arrival_time.to_rfc3339();

        for pizza in &wave.pizzas {
            wtr.write_record([
                wave.wave.id.clone(),
                arrival.clone(),
                "pizza".to_string(),
                pizza.id.clone(),
                pizza.label.clone(),
                pizza.quantity.to_string(),
                pizza.guest_count.to_string(),
                format!("{}\" {}", pizza.size.diameter_inches, pizza.size.name),
                pizza.style.name.clone(),
                join(pizza.dietary_restrictions()),
                pizza.is_for_non_respondents.to_string(),
            ])?;
        }

        for beverage in &wave.beverages {
            wtr.write_record([
                wave.wave.id.clone(),
                arrival.clone(),
                "beverage".to_string(),
                beverage.id.clone(),
                beverage.beverage.name.clone(),
                beverage.quantity.to_string(),
                beverage.guest_count.to_string(),
                String::new(),
                String::new(),
                String::new(),
                beverage.is_for_non_respondents.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    tracing::info!(path = %path.display(), "Wrote order CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Beverage, BeverageCategory, Guest, PizzaSize};
    use crate::planner::{generate_recommendations, RecommendationRequest};
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_order_csv() {
        let mut request = RecommendationRequest::new(
            vec![
                Guest::new("a", "A").with_restrictions(&["Vegan"]),
                Guest::new("b", "B").with_restrictions(&["Vegan"]),
            ],
            PizzaSize::new(14, "Large", 4.0),
        );
        request.available_beverages = vec![Beverage::new("cola", "Cola", BeverageCategory::Soda)];
        request.expected_guest_count = Some(4);
        let recs = generate_recommendations(&request).unwrap();

        let file = NamedTempFile::new().unwrap();
        write_order_csv(&recs, file.path()).unwrap();

        let mut rdr = csv::Reader::from_path(file.path()).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(&headers[0], "wave");
        assert_eq!(headers.len(), 11);

        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        let pizzas: Vec<&csv::StringRecord> = rows.iter().filter(|r| &r[2] == "pizza").collect();
        assert_eq!(pizzas.len(), 2);
        assert_eq!(&pizzas[0][9], "Vegan");
        assert_eq!(&pizzas[1][10], "true");
        assert!(rows.iter().any(|r| &r[2] == "beverage" && &r[4] == "Cola"));
    }
}
