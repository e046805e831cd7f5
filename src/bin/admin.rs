//! CLI administration tool for shortlink.
//!
//! Drives the same allocation engine as the HTTP API directly against
//! PostgreSQL.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (optionally with a custom code)
//! cargo run --bin admin -- shorten https://example.com/a --code mylink
//!
//! # Look up where a code points
//! cargo run --bin admin -- resolve mylink
//!
//! # Count stored links
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`shortlink::config`].

use shortlink::application::services::ShortenerService;
use shortlink::config::{self, Config};
use shortlink::domain::errors::ShortenError;
use shortlink::infrastructure::persistence::PgShortUrlRepository;
use shortlink::server::{allocation_settings, connect_pool};
use shortlink::utils::code_generator::{RandomCodeGenerator, normalize_custom_code};
use shortlink::utils::url_validation::check_target_url;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
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
    /// Create a short link
    Shorten {
        /// Target URL (http or https)
        url: String,

        /// Custom short code (4-16 letters and digits)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Show the target of a short code
    Resolve {
        code: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
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
    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Shorten { url, code } => shorten(&config, &pool, &url, code.as_deref()).await?,
        Commands::Resolve { code } => resolve(&config, &pool, &code).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn shortener(config: &Config, pool: &PgPool) -> ShortenerService {
    ShortenerService::new(
        Arc::new(PgShortUrlRepository::new(Arc::new(pool.clone()))),
        Arc::new(RandomCodeGenerator::new()),
        allocation_settings(config),
    )
}

async fn shorten(config: &Config, pool: &PgPool, url: &str, code: Option<&str>) -> Result<()> {
    if let Err(e) = check_target_url(url) {
        println!("{} {}", "Invalid URL:".red().bold(), e);
        return Ok(());
    }

    let code = normalize_custom_code(code);
    let service = shortener(config, pool);

    match service.allocate(url, code).await {
        Ok(record) => {
            println!("{}", "Short link ready".green().bold());
            println!("  Code:    {}", record.code.bright_yellow().bold());
            println!("  URL:     {}", service.short_url(&record.code).cyan());
            println!("  Target:  {}", record.target_url);
            println!("  Created: {}", record.created_at);
            if let Some(requested) = code
                && requested != record.code
            {
                println!(
                    "{}",
                    "Target was already shortened; existing code returned.".yellow()
                );
            }
        }
        Err(
            e @ (ShortenError::InvalidCustomCode { .. }
            | ShortenError::CodeInUse(_)
            | ShortenError::AllocationExhausted { .. }),
        ) => {
            println!("{} {}", "Failed:".red().bold(), e);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

async fn resolve(config: &Config, pool: &PgPool, code: &str) -> Result<()> {
    match shortener(config, pool).resolve(code).await {
        Ok(target) => println!("{} -> {}", code.bright_yellow(), target.cyan()),
        Err(ShortenError::NotFound(_)) => {
            println!("{} {}", "No short link with code".red(), code.bold());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Displays the number of stored links.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links: {}",
        links_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
