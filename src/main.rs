use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use pizza_party_planner_rs::cli::{Cli, Command};
use pizza_party_planner_rs::error::Result;
use pizza_party_planner_rs::interface::{
    display_findings, display_portion_table, display_recommendations, order_script,
    prompt_yes_no, write_order_csv,
};
use pizza_party_planner_rs::planner::{generate_recommendations, PortionTable};
use pizza_party_planner_rs::state::{load_party, save_party, validate_party, Severity};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Recommend {
            csv,
            script,
            pizzeria,
        } => cmd_recommend(&cli.file, csv, script, pizzeria.as_deref()),
        Command::Check { fix } => cmd_check(&cli.file, fix),
        Command::Sizes => {
            display_portion_table(PortionTable::standard());
            Ok(())
        }
    }
}

/// Generate and print the order for a party.
fn cmd_recommend(
    file_path: &str,
    csv: Option<PathBuf>,
    script: bool,
    pizzeria: Option<&str>,
) -> Result<()> {
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Party file not found: {}", file_path);
        eprintln!("Export the party snapshot to party.json or pass --file.");
        return Ok(());
    }

    let party = load_party(path)?;
    let respondents = party.respondents();
    println!(
        "Loaded '{}': {} guests, {} respondents",
        party.name,
        party.guests.len(),
        respondents.len()
    );

    let recs = generate_recommendations(&party.to_request())?;
    display_recommendations(&recs);

    if script {
        println!("--- Order Script ---");
        println!();
        print!("{}", order_script(&recs, &party.name, pizzeria));
        println!();
    }

    if let Some(csv_path) = csv {
        if csv_path.exists() {
            let overwrite = prompt_yes_no(
                &format!("{} already exists. Overwrite?", csv_path.display()),
                false,
            )?;
            if !overwrite {
                println!("CSV export skipped.");
                return Ok(());
            }
        }
        write_order_csv(&recs, &csv_path)?;
        println!("Order written to {}", csv_path.display());
    }

    Ok(())
}

/// Validate a party snapshot and print what was found.
///
/// With `fix`, the loaded snapshot is normalized and written back.
fn cmd_check(file_path: &str, fix: bool) -> Result<()> {
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Party file not found: {}", file_path);
        return Ok(());
    }

    let mut party = load_party(path)?;
    let findings = validate_party(&party);
    display_findings(&findings);

    if findings.iter().any(|f| f.severity == Severity::Error) {
        println!();
        println!("The planner cannot run until the errors above are fixed.");
    }

    if fix {
        party.normalize();
        if prompt_yes_no(&format!("Rewrite {}?", file_path), true)? {
            save_party(path, &party)?;
            println!("Party snapshot saved.");
        }
    }

    Ok(())
}
