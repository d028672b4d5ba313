//! CLI administration tool for shorts.
//!
//! Manages users, prints the usage reports and checks the database without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for missing values)
//! cargo run --bin admin -- user create --name alice
//!
//! # List users
//! cargo run --bin admin -- user list
//!
//! # Top domains and the usage graph
//! cargo run --bin admin -- stats top
//! cargo run --bin admin -- stats graph
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` (required): PostgreSQL connection
//! - `PASSWORD_SECRET` (required for `user create`): must match the server's

use shorts::application::services::{StatsService, UserService};
use shorts::application::services::user_service::{MAX_PASSWORD_LEN, MIN_PASSWORD_LEN};
use shorts::config::{Config, mask_connection_string};
use shorts::infrastructure::persistence::{PgUsageRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shorts.
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
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show usage reports
    Stats {
        #[command(subcommand)]
        action: StatsAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// User name (at least 5 characters)
        #[arg(short, long)]
        name: Option<String>,

        /// Password (5 to 16 characters); prompted for if omitted
        #[arg(short, long)]
        password: Option<String>,

        /// Generate a random password instead of prompting
        #[arg(short, long)]
        generate: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,
}

#[derive(Subcommand)]
enum StatsAction {
    /// Top 20 hosts by redirect count
    Top,

    /// Redirects per day, hour and minute
    Graph,

    /// Link, use and user totals
    Summary,
}

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

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats { action } => handle_stats_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn user_repository(pool: &PgPool) -> Arc<PgUserRepository> {
    Arc::new(PgUserRepository::new(Arc::new(pool.clone())))
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    match action {
        UserAction::Create {
            name,
            password,
            generate,
            yes,
        } => {
            let secret =
                std::env::var("PASSWORD_SECRET").context("PASSWORD_SECRET must be set")?;
            let service = UserService::new(user_repository(pool), secret);
            create_user(&service, name, password, generate, yes).await?;
        }
        UserAction::List => {
            let service = UserService::read_only(user_repository(pool));
            list_users(&service).await?;
        }
    }

    Ok(())
}

/// Creates a user, prompting for whatever was not given on the command line.
///
/// A generated password is shown once; only its keyed hash is stored.
async fn create_user(
    service: &UserService<PgUserRepository>,
    name: Option<String>,
    password: Option<String>,
    generate: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("User name").interact_text()?,
    };

    let (password, show_password) = match password {
        Some(p) => (p, false),
        None if generate => (generate_password(), true),
        None => (
            Password::new()
                .with_prompt(format!(
                    "Password ({}-{} characters)",
                    MIN_PASSWORD_LEN, MAX_PASSWORD_LEN
                ))
                .with_confirmation("Repeat password", "Passwords do not match")
                .interact()?,
            false,
        ),
    };

    println!();
    println!("  Name:     {}", name.cyan());
    if show_password {
        println!("  Password: {}", password.bright_yellow().bold());
        println!();
        println!(
            "{}",
            "⚠️  Save this password now. It cannot be shown again."
                .red()
                .bold()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = service
        .register(&name, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} (id {})",
        "✅ User created successfully!".green().bold(),
        user.id
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -u {}:<password> http://localhost:8080/v1/shorts",
        user.name.bright_yellow()
    );
    println!();

    Ok(())
}

async fn list_users(service: &UserService<PgUserRepository>) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = service
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<6} {:<30} {:<20}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(58).bright_black());

    for user in &users {
        println!(
            "  {:<6} {:<30} {}",
            user.id.to_string().bright_black(),
            user.name.cyan(),
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn handle_stats_action(action: StatsAction, pool: &PgPool) -> Result<()> {
    let service = StatsService::new(Arc::new(PgUsageRepository::new(Arc::new(pool.clone()))));

    match action {
        StatsAction::Top => {
            println!("{}", "🏆 Top Domains".bright_blue().bold());
            println!();

            let top = service
                .top_domains()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to rank domains: {}", e))?;

            if top.is_empty() {
                println!("{}", "  No redirects recorded yet".yellow());
            }
            for (rank, entry) in top.iter().enumerate() {
                println!(
                    "  {:>2}. {:<40} {}",
                    rank + 1,
                    entry.host.cyan(),
                    entry.uses.to_string().bright_green().bold()
                );
            }
            println!();
        }
        StatsAction::Graph => {
            println!("{}", "📈 Usage Graph (UTC)".bright_blue().bold());
            println!();

            let graph = service
                .usage_graph()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to build usage graph: {}", e))?;

            if graph.is_empty() {
                println!("{}", "  No redirects recorded yet".yellow());
            }
            for (day, hours) in graph.days() {
                println!("  {}", day.bright_white().bold());
                for (hour, minutes) in hours {
                    for (minute, count) in minutes {
                        println!(
                            "    {:02}:{:02}  {}",
                            hour,
                            minute,
                            count.to_string().bright_green()
                        );
                    }
                }
            }
            println!();
            println!("  Total: {}", graph.total().to_string().bright_white().bold());
            println!();
        }
        StatsAction::Summary => {
            println!("{}", "📊 Statistics".bright_blue().bold());
            println!();

            let links_count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE code IS NOT NULL")
                    .fetch_one(pool)
                    .await?;
            let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await?;
            let uses_count = service
                .total_uses()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count uses: {}", e))?;

            println!("  Users: {}", users_count.to_string().bright_green().bold());
            println!("  Links: {}", links_count.to_string().bright_green().bold());
            println!("  Uses:  {}", uses_count.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
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
            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

/// Generates a random password of the maximum accepted length.
fn generate_password() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789";

    let mut rng = rand::rng();

    (0..MAX_PASSWORD_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
