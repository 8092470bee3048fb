use sqlx::SqlitePool;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error};

use crate::database::manager::DatabaseError;

const INDEX_STATEMENTS: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS idx_sites_catelog_id ON sites(catelog_id)",
    "CREATE INDEX IF NOT EXISTS idx_sites_sort_order ON sites(sort_order)",
];

/// Lazily creates the secondary indexes the listing queries rely on.
///
/// The first successful run flips `done`; until then every call retries.
/// Concurrent first calls may both run the batch, which is harmless because
/// each statement is `IF NOT EXISTS`. Failures are logged and never returned.
#[derive(Debug, Default)]
pub struct IndexEnsurer {
    done: AtomicBool,
}

impl IndexEnsurer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    pub async fn ensure(&self, pool: &SqlitePool) {
        if self.is_done() {
            return;
        }

        match Self::create_indexes(pool).await {
            Ok(()) => {
                self.done.store(true, Ordering::Release);
                debug!("Site indexes ensured");
            }
            Err(e) => error!("Failed to ensure indexes: {}", e),
        }
    }

    /// Runs the index statements as one batch.
    pub async fn create_indexes(pool: &SqlitePool) -> Result<(), DatabaseError> {
        let mut tx = pool.begin().await?;
        for statement in INDEX_STATEMENTS {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
