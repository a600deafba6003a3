//! Stark Products CLI - Cart inspection and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the persisted cart document
//! stark-cli cart show
//!
//! # Empty the persisted cart document
//! stark-cli cart clear
//!
//! # Verify a UPI transaction against the payment collaborator
//! stark-cli payment verify-upi <TRANSACTION_ID>
//!
//! # Seed demo products through the admin API
//! # (needs ADMIN_USERNAME / ADMIN_PASSWORD in the environment)
//! stark-cli seed products
//! ```
//!
//! # Commands
//!
//! - `cart` - Inspect or clear the device-local cart document
//! - `payment` - Payment collaborator utilities
//! - `seed` - Seed demo data through the admin API

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "stark-cli")]
#[command(author, version, about = "Stark Products CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or clear the device-local cart document
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Payment collaborator utilities
    Payment {
        #[command(subcommand)]
        action: PaymentAction,
    },
    /// Seed demo data through the admin API
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the persisted cart lines and total
    Show,
    /// Empty the persisted cart document
    Clear,
}

#[derive(Subcommand)]
enum PaymentAction {
    /// Verify a UPI transaction with the payment collaborator
    VerifyUpi {
        /// Processor transaction id
        transaction_id: String,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Create demo products through the admin API
    Products,
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

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
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show()?,
            CartAction::Clear => commands::cart::clear()?,
        },
        Commands::Payment { action } => match action {
            PaymentAction::VerifyUpi { transaction_id } => {
                commands::payment::verify_upi(&transaction_id).await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::Products => commands::seed::products().await?,
        },
    }
    Ok(())
}
