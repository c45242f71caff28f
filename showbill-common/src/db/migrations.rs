//! Database schema migrations
//!
//! Versioned, idempotent migrations tracked in the `schema_version` table.
//!
//! # Migration Guidelines
//!
//! 1. **Never modify existing migrations** - databases in the field already ran them
//! 2. **Always add new migrations** - one function per schema change, bump `CURRENT_SCHEMA_VERSION`
//! 3. **Stay idempotent** - check before altering (`IF NOT EXISTS`, `pragma_table_info`)

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::Result;

/// Current schema version
///
/// **IMPORTANT:** Increment this when adding new migrations
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Get current schema version from database
///
/// Returns 0 if schema_version table doesn't exist or has no rows
pub async fn get_schema_version(pool: &SqlitePool) -> Result<i32> {
    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type='table' AND name='schema_version'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    Ok(version.unwrap_or(0))
}

async fn set_schema_version(pool: &SqlitePool, version: i32) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await?;

    Ok(())
}

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let current_version = get_schema_version(pool).await?;

    if current_version == CURRENT_SCHEMA_VERSION {
        info!("Database schema is up to date (v{})", current_version);
        return Ok(());
    }

    if current_version > CURRENT_SCHEMA_VERSION {
        warn!(
            "Database schema version ({}) is newer than code version ({})",
            current_version, CURRENT_SCHEMA_VERSION
        );
        return Ok(());
    }

    info!(
        "Running database migrations: v{} -> v{}",
        current_version, CURRENT_SCHEMA_VERSION
    );

    if current_version < 1 {
        migrate_v1(pool).await?;
        set_schema_version(pool, 1).await?;
        info!("✓ Migration v1 completed");
    }

    if current_version < 2 {
        migrate_v2(pool).await?;
        set_schema_version(pool, 2).await?;
        info!("✓ Migration v2 completed");
    }

    Ok(())
}

/// Migration v1: indexes for the per-venue / per-artist show lookups
async fn migrate_v1(pool: &SqlitePool) -> Result<()> {
    info!("Running migration v1: Add show lookup indexes");

    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_shows_venue_id ON shows(venue_id)",
        "CREATE INDEX IF NOT EXISTS idx_shows_artist_id ON shows(artist_id)",
        "CREATE INDEX IF NOT EXISTS idx_shows_start_time ON shows(start_time)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

/// Migration v2: `created_at` on venues and artists (home page "recently listed")
///
/// Tables created by this version already have the column; older databases get
/// it added and back-filled. SQLite refuses a non-constant default in
/// `ADD COLUMN`, hence the separate UPDATE.
async fn migrate_v2(pool: &SqlitePool) -> Result<()> {
    info!("Running migration v2: Add created_at to venues and artists");

    for table in ["venues", "artists"] {
        let has_column: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM pragma_table_info('{}') WHERE name = 'created_at'",
            table
        ))
        .fetch_one(pool)
        .await?;

        if has_column > 0 {
            info!("  {}.created_at already exists - skipping", table);
            continue;
        }

        match sqlx::query(&format!("ALTER TABLE {} ADD COLUMN created_at TIMESTAMP", table))
            .execute(pool)
            .await
        {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("duplicate column") => {
                info!("  {}.created_at added concurrently - skipping", table);
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        sqlx::query(&format!(
            "UPDATE {} SET created_at = CURRENT_TIMESTAMP WHERE created_at IS NULL",
            table
        ))
        .execute(pool)
        .await?;

        info!("  ✓ Added created_at column to {}", table);
    }

    Ok(())
}
