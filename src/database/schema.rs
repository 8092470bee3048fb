use sqlx::SqlitePool;
use tracing::info;

use crate::database::manager::DatabaseError;

const CREATE_CATEGORY: &str = r#"
    CREATE TABLE IF NOT EXISTS category (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        catelog TEXT NOT NULL
    )
"#;

const CREATE_SITES: &str = r#"
    CREATE TABLE IF NOT EXISTS sites (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        url TEXT NOT NULL,
        logo TEXT,
        "desc" TEXT,
        catelog_id INTEGER NOT NULL,
        sort_order INTEGER NOT NULL DEFAULT 0,
        create_time TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Create the `category` and `sites` tables when they do not exist yet.
pub async fn migrate(pool: &SqlitePool) -> Result<(), DatabaseError> {
    let mut tx = pool.begin().await?;
    sqlx::query(CREATE_CATEGORY).execute(&mut *tx).await?;
    sqlx::query(CREATE_SITES).execute(&mut *tx).await?;
    tx.commit().await?;

    info!("Database schema is up to date");
    Ok(())
}
