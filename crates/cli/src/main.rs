//! Pressroom CLI - fixture and pricing tools.
//!
//! # Usage
//!
//! ```bash
//! # Write the built-in dataset to a file (or stdout without --output)
//! pressroom-cli fixtures export --output fixtures.yaml
//!
//! # Validate an edited fixture file before pointing ADMIN_FIXTURES_PATH at it
//! pressroom-cli fixtures check fixtures.yaml
//!
//! # Price 250 A5 flyers on silk stock
//! pressroom-cli quote --group 2 --quantity 250 \
//!     --select "Paper Size=A5" --select "Paper Type=Silk 170gsm" --select "Finishing=None"
//! ```
//!
//! # Commands
//!
//! - `fixtures export` - Dump the built-in dataset as YAML
//! - `fixtures check` - Validate a YAML fixture file
//! - `quote` - Price a print option selection

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pressroom-cli")]
#[command(author, version, about = "Pressroom CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export or validate fixture files
    Fixtures {
        #[command(subcommand)]
        action: FixturesAction,
    },
    /// Price a print option group for a quantity and selection
    Quote {
        /// Print option group id
        #[arg(short, long)]
        group: i32,

        /// Quantity; must be one of the group's tiers
        #[arg(short, long)]
        quantity: u32,

        /// One `attribute=value` per attribute
        #[arg(short, long = "select", value_name = "ATTR=VALUE")]
        selections: Vec<String>,

        /// YAML fixtures to read instead of the built-in dataset
        #[arg(short, long)]
        fixtures: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum FixturesAction {
    /// Write the built-in dataset as YAML
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a YAML fixture file
    Check {
        /// File to validate
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so exported YAML on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pressroom_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Fixtures { action } => match action {
            FixturesAction::Export { output } => {
                commands::fixtures::export(output.as_deref()).await?;
            }
            FixturesAction::Check { file } => commands::fixtures::check(&file).await?,
        },
        Commands::Quote {
            group,
            quantity,
            selections,
            fixtures,
        } => {
            commands::quote::run(group, quantity, &selections, fixtures.as_deref()).await?;
        }
    }
    Ok(())
}
