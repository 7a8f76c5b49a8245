//! Loomwood CLI - Content backend seeding and export tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the catalog from a YAML file
//! lw-cli seed catalog -f crates/cli/fixtures/catalog.yaml
//!
//! # Export all documents of a type as JSON
//! lw-cli export -t product
//! lw-cli export -t order -o orders.json
//! ```
//!
//! # Commands
//!
//! - `seed catalog` - Create products from a YAML seed file
//! - `export` - Dump documents of one type as pretty-printed JSON

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lw-cli")]
#[command(author, version, about = "Loomwood CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the content backend with demo data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Export documents of one type as JSON
    Export {
        /// Document type (`product`, `order`, `user`, `message`)
        #[arg(short = 't', long)]
        doc_type: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Create products from a YAML seed file
    Catalog {
        /// Path to the YAML catalog file
        #[arg(short, long)]
        file: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { target } => match target {
            SeedTarget::Catalog { file } => commands::seed::catalog(&file).await?,
        },
        Commands::Export { doc_type, output } => {
            commands::export::documents(&doc_type, output.as_deref()).await?;
        }
    }

    Ok(())
}
