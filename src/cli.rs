use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// PizzaPartyPlanner: turns guest RSVPs into a pizza and beverage order.
#[derive(Parser, Debug)]
#[command(name = "pizza_party_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the party snapshot JSON file.
    #[arg(short, long, default_value = "party.json")]
    pub file: String,

    /// Log engine progress (RUST_LOG takes precedence).
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Generate the pizza and beverage order.
    Recommend {
        /// Also export the order as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print a phone/clipboard order script.
        #[arg(long)]
        script: bool,

        /// Pizzeria name to greet in the order script.
        #[arg(long)]
        pizzeria: Option<String>,
    },

    /// Check the party snapshot for problems.
    Check {
        /// Write the cleaned-up snapshot back to the party file.
        #[arg(long)]
        fix: bool,
    },

    /// Show the standard pizza sizes.
    Sizes,
}

impl Default for Command {
    fn default() -> Self {
        Command::Recommend {
            csv: None,
            script: false,
            pizzeria: None,
        }
    }
}
