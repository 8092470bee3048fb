use sqlx::query::QueryAs;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Page sizes at or above this are "give me everything" requests; the exact
/// count query is skipped for them.
pub const UNBOUNDED_PAGE_SIZE: i64 = 1000;

const SITE_COLUMNS: &str =
    "s.id, s.name, s.url, s.logo, s.\"desc\", s.catelog_id, s.sort_order, s.create_time, c.catelog";
const SITE_JOIN: &str = "FROM sites s INNER JOIN category c ON s.catelog_id = c.id";
const SITE_ORDER: &str = "ORDER BY s.sort_order ASC, s.create_time DESC";

/// A bound value. Listing queries only ever bind integers and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}

/// Which rows a listing selects. Only one filter is ever active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteFilter {
    All,
    CatalogId(String),
    Catalog(String),
    Keyword(String),
}

impl SiteFilter {
    /// Pick the most specific filter: keyword, then category id, then category name.
    pub fn resolve(keyword: Option<String>, catalog_id: Option<String>, catalog: Option<String>) -> Self {
        if let Some(keyword) = keyword {
            SiteFilter::Keyword(keyword)
        } else if let Some(id) = catalog_id {
            SiteFilter::CatalogId(id)
        } else if let Some(name) = catalog {
            SiteFilter::Catalog(name)
        } else {
            SiteFilter::All
        }
    }

    fn where_clause(&self) -> (String, Vec<SqlParam>) {
        match self {
            SiteFilter::All => (String::new(), vec![]),
            SiteFilter::CatalogId(id) => {
                // Numeric ids bind as integers so they compare against the INTEGER column directly
                let param = id
                    .trim()
                    .parse::<i64>()
                    .map(SqlParam::Int)
                    .unwrap_or_else(|_| SqlParam::Text(id.clone()));
                ("WHERE s.catelog_id = ?".to_string(), vec![param])
            }
            SiteFilter::Catalog(name) => ("WHERE c.catelog = ?".to_string(), vec![SqlParam::Text(name.clone())]),
            SiteFilter::Keyword(keyword) => {
                let pattern = SqlParam::Text(format!("%{}%", escape_like(keyword)));
                (
                    "WHERE s.name LIKE ? ESCAPE '\\' OR s.url LIKE ? ESCAPE '\\' OR c.catelog LIKE ? ESCAPE '\\'"
                        .to_string(),
                    vec![pattern.clone(), pattern.clone(), pattern],
                )
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Values are kept as given. SQLite reads a negative LIMIT as "no limit"
    /// and a negative OFFSET as zero.
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn is_unbounded(&self) -> bool {
        self.page_size >= UNBOUNDED_PAGE_SIZE
    }
}

/// Listing query over `sites` joined with `category`
#[derive(Debug, Clone, PartialEq)]
pub struct SiteQuery {
    pub filter: SiteFilter,
    pub pagination: Pagination,
}

impl SiteQuery {
    pub fn new(filter: SiteFilter, pagination: Pagination) -> Self {
        Self { filter, pagination }
    }

    pub fn to_sql(&self) -> SqlResult {
        let (where_sql, mut params) = self.filter.where_clause();
        let select = format!("SELECT {}", SITE_COLUMNS);
        let query = join_sql(&[
            select.as_str(),
            SITE_JOIN,
            where_sql.as_str(),
            SITE_ORDER,
            "LIMIT ? OFFSET ?",
        ]);
        params.push(SqlParam::Int(self.pagination.page_size));
        params.push(SqlParam::Int(self.pagination.offset()));
        SqlResult { query, params }
    }

    pub fn to_count_sql(&self) -> SqlResult {
        let (where_sql, params) = self.filter.where_clause();
        let query = join_sql(&["SELECT COUNT(*) AS total", SITE_JOIN, where_sql.as_str()]);
        SqlResult { query, params }
    }
}

fn join_sql(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

pub(crate) fn bind_params<'q, O>(
    mut q: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    params: &'q [SqlParam],
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>>
where
    O: for<'r> FromRow<'r, SqliteRow>,
{
    for param in params {
        q = match param {
            SqlParam::Int(i) => q.bind(*i),
            SqlParam::Text(s) => q.bind(s.as_str()),
        };
    }
    q
}
