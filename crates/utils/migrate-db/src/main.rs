//! # Migrate DB Utility
//!
//! Brings the database schema to the latest embedded migration.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=sqlite:data/app.db cargo run --package migrate-db
//! ```
//!
//! The program will:
//! 1. Connect to the database (creating the file if missing)
//! 2. Apply every pending migration in version order
//! 3. Report the applied versions
//!
//! Any failure exits non-zero, which stops the startup script before the
//! server is launched.

use anyhow::Context;
use lib_core::config::DEFAULT_DATABASE_URL;
use lib_core::model::store::applied_migrations;
use lib_core::{create_pool, run_migrations, MIGRATOR};
use lib_utils::get_env_or;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    println!("============================================");
    println!("  Migrate DB Utility");
    println!("============================================");
    println!();

    let database_url = get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL);

    println!("Connecting to database: {}", database_url);
    let pool = create_pool(&database_url).await?;
    println!("Connected successfully.");
    println!();

    let before = applied_migrations(&pool).await.unwrap_or_default();
    let embedded = MIGRATOR.iter().count();
    println!("{} of {} migration(s) already applied.", before.len(), embedded);

    run_migrations(&pool).await.context("migration failed")?;

    let after = applied_migrations(&pool).await?;
    println!("Applied {} new migration(s).", after.len().saturating_sub(before.len()));
    for version in &after {
        println!("  - {}", version);
    }
    println!();
    println!("Schema is at head.");

    pool.close().await;
    Ok(())
}
