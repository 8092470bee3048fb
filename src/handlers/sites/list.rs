use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use crate::database::models::Site;
use crate::database::query_builder::{Pagination, SiteFilter, SiteQuery, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::database::SiteRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::utils::{non_empty, parse_int_lenient};

const LIST_FAILED: &str = "Failed to fetch config data";

/// Raw query string. Numbers stay strings here so bad input falls back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub catalog: Option<String>,
    #[serde(rename = "catalogId")]
    pub catalog_id: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
    pub keyword: Option<String>,
}

impl ListQuery {
    pub fn into_site_query(self) -> SiteQuery {
        let pagination = Pagination::new(
            parse_int_lenient(self.page.as_deref(), DEFAULT_PAGE),
            parse_int_lenient(self.page_size.as_deref(), DEFAULT_PAGE_SIZE),
        );
        let filter = SiteFilter::resolve(
            non_empty(self.keyword),
            non_empty(self.catalog_id),
            non_empty(self.catalog),
        );
        SiteQuery::new(filter, pagination)
    }
}

#[derive(Debug, Serialize)]
pub struct SitePage {
    pub data: Vec<Site>,
    pub total: i64,
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
}

/// GET /api/config - one page of sites, optionally filtered
pub async fn list(State(state): State<AppState>, Query(query): Query<ListQuery>) -> ApiResult<SitePage> {
    state.indexes.ensure(&state.pool).await;

    let query = query.into_site_query();
    let repository = SiteRepository::new(state.pool.clone());

    let data = repository
        .select_page(&query)
        .await
        .map_err(|e| ApiError::store(LIST_FAILED, e))?;

    // Large pages skip the COUNT; the total is only an approximation then.
    let total = if query.pagination.is_unbounded() {
        query.pagination.offset().saturating_add(data.len() as i64)
    } else {
        repository
            .count(&query)
            .await
            .map_err(|e| ApiError::store(LIST_FAILED, e))?
    };

    Ok(ApiResponse::success(SitePage {
        data,
        total,
        page: query.pagination.page,
        page_size: query.pagination.page_size,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let mut q = ListQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "catalog" => q.catalog = value,
                "catalogId" => q.catalog_id = value,
                "page" => q.page = value,
                "pageSize" => q.page_size = value,
                "keyword" => q.keyword = value,
                _ => unreachable!(),
            }
        }
        q
    }

    #[test]
    fn defaults_when_params_absent_or_garbage() {
        let site_query = ListQuery::default().into_site_query();
        assert_eq!(site_query.pagination, Pagination { page: 1, page_size: 10 });
        assert_eq!(site_query.filter, SiteFilter::All);

        let site_query = query(&[("page", "x"), ("pageSize", "")]).into_site_query();
        assert_eq!(site_query.pagination, Pagination { page: 1, page_size: 10 });
    }

    #[test]
    fn empty_filters_are_ignored() {
        let site_query = query(&[("keyword", ""), ("catalogId", ""), ("catalog", "Tools")]).into_site_query();
        assert_eq!(site_query.filter, SiteFilter::Catalog("Tools".to_string()));
    }

    #[test]
    fn keyword_overrides_catalog_id() {
        let site_query = query(&[("keyword", "rust"), ("catalogId", "2"), ("page", "2"), ("pageSize", "5")])
            .into_site_query();
        assert_eq!(site_query.filter, SiteFilter::Keyword("rust".to_string()));
        assert_eq!(site_query.pagination.offset(), 5);
    }
}
