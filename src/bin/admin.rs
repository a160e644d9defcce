//! CLI administration tool for alias-shortener.
//!
//! Creates and resolves short links and performs database checks without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Bind a URL to a generated alias
//! cargo run --bin admin -- link create https://example.com
//!
//! # Bind a URL to a chosen alias
//! cargo run --bin admin -- link create https://example.com --alias docs
//!
//! # Look up an alias
//! cargo run --bin admin -- link resolve docs
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `ALIAS_LENGTH`, `ALIAS_MAX_RETRIES` (optional): generation policy

use alias_shortener::api::dto::save::SaveRequest;
use alias_shortener::application::services::{
    AssignmentError, AssignmentPolicy, AssignmentService, RedirectService, ResolveError,
};
use alias_shortener::config;
use alias_shortener::domain::entities::Assignment;
use alias_shortener::domain::repositories::UrlStore;
use alias_shortener::infrastructure::persistence::PgUrlStore;
use alias_shortener::utils::alias_generator::{RandomAliasGenerator, validate_custom_alias};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use validator::Validate;

/// CLI tool for managing alias-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Bind a URL to an alias
    Create {
        /// Target URL
        url: String,

        /// Alias to claim (generated if not provided)
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Show the URL bound to an alias
    Resolve { alias: String },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, pool: PgPool) -> Result<()> {
    let store = Arc::new(PgUrlStore::new(Arc::new(pool)));

    match action {
        LinkAction::Create { url, alias } => {
            let policy = config::assignment_policy_from_env()?;
            create_link(store, policy, url, alias).await?;
            Ok(())
        }
        LinkAction::Resolve { alias } => resolve_link(store, alias).await,
    }
}

/// Binds `url` through the same validation and assignment rules as `POST /url`.
///
/// A taken alias is an error.
async fn create_link<S: UrlStore + ?Sized>(
    store: Arc<S>,
    policy: AssignmentPolicy,
    url: String,
    alias: Option<String>,
) -> Result<Assignment> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let request = SaveRequest { url, alias };
    request
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid request: {}", e))?;

    let alias = request.alias.as_deref().filter(|a| !a.is_empty());
    if let Some(alias) = alias {
        validate_custom_alias(alias).map_err(|e| anyhow::anyhow!("{}", e))?;
    }

    let service = AssignmentService::new(store, RandomAliasGenerator::new(), policy);

    match service
        .assign(&request.url, alias, &CancellationToken::new())
        .await
    {
        Ok(assignment) => {
            println!("{}", "✅ Link created".green().bold());
            println!();
            println!("  Alias: {}", assignment.alias.bright_yellow().bold());
            println!("  URL:   {}", request.url.cyan());
            println!("  ID:    {}", assignment.id.to_string().bright_black());
            println!();
            Ok(assignment)
        }
        Err(AssignmentError::AliasTaken(alias)) => {
            println!("{} {}", "❌ Alias already exists:".red(), alias.yellow());
            anyhow::bail!("Alias '{}' is already taken", alias)
        }
        Err(e) => Err(anyhow::anyhow!("Failed to create link: {}", e)),
    }
}

async fn resolve_link(store: Arc<PgUrlStore>, alias: String) -> Result<()> {
    let service = RedirectService::new(store);

    match service.resolve(&alias).await {
        Ok(url) => {
            println!("  {} → {}", alias.bright_yellow(), url.cyan());
            Ok(())
        }
        Err(ResolveError::NotFound(_)) => {
            println!("{} {}", "⚠️  No link for alias".yellow(), alias.bright_white());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to resolve alias: {}", e)),
    }
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Links:      {}",
                links_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
