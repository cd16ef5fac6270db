//! Paseo CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! paseo-cli migrate
//!
//! # Seed demo data (idempotent)
//! paseo-cli seed
//!
//! # Create a user
//! paseo-cli user create -e admin@example.com -n "Admin" -r admin
//!
//! # Mint a session token for a user
//! paseo-cli session issue -e user@example.com --ttl-hours 72
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the database with demo data
//! - `user create` - Create user accounts
//! - `session issue` - Mint session tokens (there are no HTTP login routes)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "paseo-cli")]
#[command(author, version, about = "Paseo CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with demo data
    Seed,
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage session tokens
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Role (`admin`, `user`)
        #[arg(short, long, default_value = "user")]
        role: String,

        /// Password (a random one is generated when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Mint a session token for an existing user
    Issue {
        /// Email address of the user
        #[arg(short, long)]
        email: String,

        /// How long the token stays valid
        #[arg(long, default_value_t = 72)]
        ttl_hours: i64,
    },
    /// Delete expired session tokens
    Purge,
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                name,
                role,
                password,
            } => commands::user::create(&email, &name, &role, password.as_deref()).await?,
        },
        Commands::Session { action } => match action {
            SessionAction::Issue { email, ttl_hours } => {
                commands::session::issue(&email, ttl_hours).await?;
            }
            SessionAction::Purge => commands::session::purge().await?,
        },
    }

    Ok(())
}
