use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A listed site, joined with the display name of its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Site {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub logo: Option<String>,
    pub desc: Option<String>,
    pub catelog_id: i64,
    pub sort_order: i64,
    pub create_time: String,
    pub catelog: String,
}

/// Validated values for a new `sites` row. Identity and `create_time` come from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSite {
    pub name: String,
    pub url: String,
    pub logo: Option<String>,
    pub desc: Option<String>,
    pub catelog_id: i64,
    pub sort_order: i64,
}

/// Outcome of an insert, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertResult {
    pub success: bool,
    pub meta: InsertMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertMeta {
    pub last_row_id: i64,
    pub changes: u64,
    /// Statement time in milliseconds
    pub duration: f64,
}
