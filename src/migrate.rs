//! Database migration utilities

use std::{path::Path, str::FromStr};

use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

use crate::config::Config;

/// Run all database migrations
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Migrating database");

    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    run_migrations(&pool).await?;
    pool.close().await;

    Ok(())
}

/// Drop the database file if it exists and run migrations
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    let options = SqliteConnectOptions::from_str(&config.database.url)?;
    let filename = options.get_filename();

    if filename != Path::new(":memory:") {
        for suffix in ["", "-wal", "-shm"] {
            let path = format!("{}{suffix}", filename.display());

            if Path::new(&path).exists() {
                std::fs::remove_file(&path)?;
                tracing::info!("Dropped database file: {}", path);
            }
        }
    }

    migrate(config).await
}

pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let mut conn = pool.acquire().await?;
    weekplan_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(())
}
