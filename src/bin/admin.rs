//! CLI administration tool for short-url-service.
//!
//! Inspects users and short URLs, removes abusive URLs, and runs the short
//! code codec without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List the most recent users
//! cargo run --bin admin -- user list --limit 20
//!
//! # Show one user and their URLs
//! cargo run --bin admin -- user show john@x.com
//!
//! # Inspect or delete a short URL
//! cargo run --bin admin -- url show 00000a
//! cargo run --bin admin -- url delete 00000a
//!
//! # Convert between ids and codes
//! cargo run --bin admin -- codec encode 10
//! cargo run --bin admin -- codec decode 00000a
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (see the `config` module)

use short_url_service::config::{Config, mask_connection_string};
use short_url_service::domain::repositories::{UrlRepository, UserRepository};
use short_url_service::infrastructure::persistence::{PgUrlRepository, PgUserRepository};
use short_url_service::utils::base62;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing short-url-service.
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
    /// Inspect user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Inspect or delete short URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Convert between numeric ids and short codes (offline)
    Codec {
        #[command(subcommand)]
        action: CodecAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List live users, newest first
    List {
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
    },

    /// Show a user and their URLs
    Show { email: String },
}

#[derive(Subcommand)]
enum UrlAction {
    /// Show a short URL and its click count
    Show { code: String },

    /// Delete a short URL with its metadata and history
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CodecAction {
    /// Print the short code for an id
    Encode { id: u64 },

    /// Print the id behind a short code
    Decode { code: String },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info and row counts
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // The codec needs no database.
    if let Commands::Codec { action } = cli.command {
        return handle_codec_action(action);
    }

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;
    let pool = Arc::new(pool);

    match cli.command {
        Commands::User { action } => handle_user_action(action, pool).await?,
        Commands::Url { action } => handle_url_action(action, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Codec { .. } => {}
    }

    Ok(())
}

fn handle_codec_action(action: CodecAction) -> Result<()> {
    match action {
        CodecAction::Encode { id } => {
            let code = base62::short_code(id);
            println!("{}", code.bright_yellow().bold());
            if code.len() > base62::CODE_WIDTH {
                println!(
                    "{}",
                    format!("warning: code is wider than {} characters", base62::CODE_WIDTH)
                        .yellow()
                );
            }
        }
        CodecAction::Decode { code } => {
            let id = base62::decode(&code)
                .with_context(|| format!("'{code}' is not a base-62 code"))?;
            println!("{}", id.to_string().bright_yellow().bold());
        }
    }

    Ok(())
}

/// Dispatches user inspection commands.
async fn handle_user_action(action: UserAction, pool: Arc<PgPool>) -> Result<()> {
    let users = PgUserRepository::new(pool.clone());

    match action {
        UserAction::List { limit } => {
            println!("{}", "Users".bright_blue().bold());
            println!();

            let list = users
                .list(limit)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

            if list.is_empty() {
                println!("{}", "  No users found".yellow());
                return Ok(());
            }

            println!(
                "  {:<22} {:<32} {:<20} {:<17}",
                "Public ID".bright_white().bold(),
                "Email".bright_white().bold(),
                "Username".bright_white().bold(),
                "Created".bright_white().bold()
            );
            println!("  {}", "-".repeat(93).bright_black());

            for user in &list {
                println!(
                    "  {:<22} {:<32} {:<20} {}",
                    user.public_id.bright_black(),
                    user.email.cyan(),
                    user.username,
                    user.created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black()
                );
            }

            let total = users
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;
            println!();
            println!(
                "  Showing {} of {}",
                list.len().to_string().bright_white().bold(),
                total.to_string().bright_white().bold()
            );
        }
        UserAction::Show { email } => {
            let user = users
                .find_by_email(&email)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("User not found")?;

            println!("{}", "User".bright_blue().bold());
            println!();
            println!("  Public ID: {}", user.public_id.cyan());
            println!("  Email:     {}", user.email);
            println!("  Username:  {}", user.username);
            println!(
                "  Session:   {}",
                if user.refresh_token_hash.is_some() {
                    "active".green()
                } else {
                    "none".bright_black()
                }
            );
            println!(
                "  Created:   {}",
                user.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
            );

            let urls = PgUrlRepository::new(pool)
                .list_by_owner(user.id)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list URLs: {}", e))?;

            println!();
            println!("  URLs: {}", urls.len().to_string().bright_white().bold());
            for url in &urls {
                println!("    {}  {}", url.code.bright_yellow(), url.original_url);
            }
        }
    }

    println!();
    Ok(())
}

/// Dispatches short URL commands.
async fn handle_url_action(action: UrlAction, pool: Arc<PgPool>) -> Result<()> {
    let urls = PgUrlRepository::new(pool);

    match action {
        UrlAction::Show { code } => {
            let url = urls
                .find_by_code(&code)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("Short URL not found")?;

            let clicks = urls
                .list_clicks(url.id)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            println!("{}", "Short URL".bright_blue().bold());
            println!();
            println!("  ID:       {}", url.id.to_string().bright_black());
            println!("  Code:     {}", url.code.bright_yellow().bold());
            println!("  Target:   {}", url.original_url.cyan());
            println!(
                "  Created:  {}",
                url.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
            );
            println!("  Clicks:   {}", clicks.len().to_string().bright_green().bold());
            if let Some(last) = clicks.last() {
                println!(
                    "  Last hit: {}",
                    last.clicked_time.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
                );
            }
        }
        UrlAction::Delete { code, yes } => {
            let url = urls
                .find_by_code(&code)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("Short URL not found")?;

            println!("  Code:   {}", url.code.bright_yellow());
            println!("  Target: {}", url.original_url.cyan());
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete this URL and its click history?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "Cancelled".red());
                    return Ok(());
                }
            }

            let deleted = urls
                .delete_by_code(&code)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to delete URL: {}", e))?;

            if deleted {
                println!("{}", "Short URL deleted".green().bold());
            } else {
                println!("{}", "Short URL was already gone".yellow());
            }
        }
    }

    println!();
    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &Arc<PgPool>) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool.as_ref()).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool.as_ref())
                .await?;

            let users = PgUserRepository::new(pool.clone())
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;
            let urls = PgUrlRepository::new(pool.clone())
                .count_all()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count URLs: {}", e))?;
            let clicks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_click_history")
                .fetch_one(pool.as_ref())
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Users:      {}", users.to_string().bright_green().bold());
            println!("  URLs:       {}", urls.to_string().bright_green().bold());
            println!("  Clicks:     {}", clicks.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
