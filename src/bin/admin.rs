//! CLI administration tool for link-hub.
//!
//! Inspects the link counter, lists and deletes stored links, and checks the
//! database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the current counter value
//! cargo run --bin admin -- counter show
//!
//! # List recent links for a source
//! cargo run --bin admin -- links list --source instagram
//!
//! # Delete a link
//! cargo run --bin admin -- links delete lnk_000042
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `COUNTER_KEY` (optional): counter to inspect, default `link_counter`
//! - `DEFAULT_ACTOR` (optional): actor recorded on deletions, default `admin_cli`

use link_hub::application::services::{DEFAULT_COUNTER_KEY, format_link_id};
use link_hub::domain::repositories::{CounterStore, LinkFilter, LinkRepository};
use link_hub::infrastructure::counter::PgCounterStore;
use link_hub::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-hub.
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
    /// Inspect the link identifier counter
    Counter {
        #[command(subcommand)]
        action: CounterAction,
    },

    /// Manage stored links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum CounterAction {
    /// Show the current counter value and the next identifier
    Show,
}

#[derive(Subcommand)]
enum LinksAction {
    /// List links, newest first
    List {
        /// Only links with this utm_source
        #[arg(short, long)]
        source: Option<String>,

        /// Only links with this utm_campaign
        #[arg(short, long)]
        campaign: Option<String>,

        /// Maximum number of links to show
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
    },

    /// Delete a link by identifier
    Delete {
        /// Link identifier, e.g. lnk_000042
        id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
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
        Commands::Counter { action } => handle_counter_action(action, &pool).await?,
        Commands::Links { action } => handle_links_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_counter_action(action: CounterAction, pool: &PgPool) -> Result<()> {
    let store = PgCounterStore::new(Arc::new(pool.clone()));
    let key = std::env::var("COUNTER_KEY").unwrap_or_else(|_| DEFAULT_COUNTER_KEY.to_string());

    match action {
        CounterAction::Show => {
            println!("{}", "🔢 Link Counter".bright_blue().bold());
            println!();

            let value = store
                .get_counter(&key)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to read counter: {}", e))?;

            let current = value.unwrap_or(0);
            println!("  Key:     {}", key.cyan());
            match value {
                Some(v) => println!("  Value:   {}", v.to_string().bright_green().bold()),
                None => println!("  Value:   {}", "not initialized".yellow()),
            }
            println!(
                "  Next ID: {}",
                format_link_id(current + 1).bright_yellow().bold()
            );
            println!();
        }
    }

    Ok(())
}

async fn handle_links_action(action: LinksAction, pool: &PgPool) -> Result<()> {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    match action {
        LinksAction::List {
            source,
            campaign,
            limit,
        } => {
            let filter = LinkFilter {
                utm_source: source,
                utm_campaign: campaign,
                limit: Some(limit),
                ..Default::default()
            };
            list_links(&repo, filter).await?;
        }
        LinksAction::Delete { id, yes } => delete_link(&repo, &id, yes).await?,
    }

    Ok(())
}

/// Prints links as a table.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   ID           Type      Source        Campaign                 Created
///   ───────────────────────────────────────────────────────────────────────────
///   lnk_000042   vendas    whatsapp      vde1f_90d_evento_01-24   2026-02-12 10:30
/// ```
async fn list_links(repo: &PgLinkRepository, filter: LinkFilter) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = repo
        .list(filter)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<12} {:<9} {:<13} {:<24} {:<16}",
        "ID".bright_white().bold(),
        "Type".bright_white().bold(),
        "Source".bright_white().bold(),
        "Campaign".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(78).bright_black());

    for link in &links {
        println!(
            "  {:<12} {:<9} {:<13} {:<24} {}",
            link.id.cyan(),
            link.link_type.as_str(),
            link.utm_source,
            link.utm_campaign,
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a link after showing it, asking for confirmation unless `skip_confirm`.
async fn delete_link(repo: &PgLinkRepository, id: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    let link = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Link not found")?;

    println!("  ID:  {}", link.id.cyan());
    println!("  URL: {}", link.full_url.bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let actor = std::env::var("DEFAULT_ACTOR").unwrap_or_else(|_| "admin_cli".to_string());
    repo.delete(&link.id, &actor)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await
                .context("Links table missing; start the service once to run migrations")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Links stored: {}", links_count.to_string().bright_green());
        }
    }

    Ok(())
}
