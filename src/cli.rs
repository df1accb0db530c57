use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "skindex")]
#[command(about = "CS2 skin market pricing CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve market prices for catalog items
    Prices {
        /// Only price skins for this weapon (e.g. "AK-47")
        #[arg(short, long)]
        weapon: Option<String>,

        /// Maximum number of items to price
        #[arg(short, long, default_value_t = 24)]
        limit: usize,
    },
    /// Look up a single skin and fetch a live quote
    Skin {
        /// Search text matched against skin and weapon names
        query: String,
    },
    /// Check upstream connectivity and configuration
    Doctor,
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Prices { weapon, limit } => {
            commands::prices::run(weapon, limit).await;
        }
        Commands::Skin { query } => {
            commands::skin::run(query).await;
        }
        Commands::Doctor => {
            commands::doctor::run().await;
        }
    }
}
