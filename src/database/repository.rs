use sqlx::SqlitePool;
use std::time::Instant;
use tracing::debug;

use crate::database::manager::DatabaseError;
use crate::database::models::{Category, InsertMeta, InsertResult, NewSite, Site};
use crate::database::query_builder::{bind_params, SiteQuery};

pub struct SiteRepository {
    pool: SqlitePool,
}

impl SiteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn select_page(&self, query: &SiteQuery) -> Result<Vec<Site>, DatabaseError> {
        let sql_result = query.to_sql();
        debug!(sql = %sql_result.query, "select sites");

        let rows = bind_params(sqlx::query_as::<_, Site>(&sql_result.query), &sql_result.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Exact number of rows matching the query's filter, ignoring pagination.
    pub async fn count(&self, query: &SiteQuery) -> Result<i64, DatabaseError> {
        let sql_result = query.to_count_sql();
        debug!(sql = %sql_result.query, "count sites");

        let row = bind_params(sqlx::query_as::<_, (i64,)>(&sql_result.query), &sql_result.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(total,)| total).unwrap_or(0))
    }

    pub async fn insert(&self, site: &NewSite) -> Result<InsertResult, DatabaseError> {
        let started = Instant::now();
        let result = sqlx::query(
            r#"INSERT INTO sites (name, url, logo, "desc", catelog_id, sort_order)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&site.name)
        .bind(&site.url)
        .bind(&site.logo)
        .bind(&site.desc)
        .bind(site.catelog_id)
        .bind(site.sort_order)
        .execute(&self.pool)
        .await?;

        Ok(InsertResult {
            success: true,
            meta: InsertMeta {
                last_row_id: result.last_insert_rowid(),
                changes: result.rows_affected(),
                duration: started.elapsed().as_secs_f64() * 1000.0,
            },
        })
    }
}

pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Category>, DatabaseError> {
        let category = sqlx::query_as::<_, Category>("SELECT id, catelog FROM category WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    pub async fn list(&self) -> Result<Vec<Category>, DatabaseError> {
        let categories = sqlx::query_as::<_, Category>("SELECT id, catelog FROM category ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    pub async fn create(&self, catelog: &str) -> Result<Category, DatabaseError> {
        let result = sqlx::query("INSERT INTO category (catelog) VALUES (?)")
            .bind(catelog)
            .execute(&self.pool)
            .await?;
        Ok(Category {
            id: result.last_insert_rowid(),
            catelog: catelog.to_string(),
        })
    }
}
