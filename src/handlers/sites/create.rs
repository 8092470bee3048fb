use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::config::AppConfig;
use crate::database::models::{InsertResult, NewSite};
use crate::database::{CategoryRepository, SiteRepository};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::utils::{derive_logo, normalize_sort_order, trim_to_option};

const CREATE_FAILED: &str = "Failed to create config";
const REQUIRED_FIELDS: &str = "Name, URL and Catelog are required";

/// `catelogId` arrives either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CategoryIdInput {
    Number(i64),
    Float(f64),
    Text(String),
}

impl CategoryIdInput {
    fn is_blank(&self) -> bool {
        match self {
            CategoryIdInput::Number(n) => *n == 0,
            CategoryIdInput::Float(f) => *f == 0.0,
            CategoryIdInput::Text(s) => s.trim().is_empty(),
        }
    }

    fn to_id(&self) -> Option<i64> {
        match self {
            CategoryIdInput::Number(n) => Some(*n),
            // Only whole numbers inside the i64 range name a row
            CategoryIdInput::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(*f as i64),
            CategoryIdInput::Float(_) => None,
            CategoryIdInput::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateSiteRequest {
    pub name: Option<String>,
    pub url: Option<String>,
    pub logo: Option<String>,
    pub desc: Option<String>,
    #[serde(rename = "catelogId")]
    pub catelog_id: Option<CategoryIdInput>,
    pub sort_order: Option<Value>,
}

impl CreateSiteRequest {
    /// Trim, normalize and validate the body, deriving a logo when none was given.
    pub fn into_new_site(self, config: &AppConfig) -> Result<NewSite, ApiError> {
        let name = self.name.unwrap_or_default().trim().to_string();
        let url = self.url.unwrap_or_default().trim().to_string();
        let logo = trim_to_option(self.logo);
        let desc = trim_to_option(self.desc);
        let sort_order = normalize_sort_order(self.sort_order.as_ref());

        // 0 and "" count as missing, like any other falsy id
        let catelog_id = match self.catelog_id {
            Some(id) if !id.is_blank() && !name.is_empty() && !url.is_empty() => id,
            _ => return Err(ApiError::validation_error(REQUIRED_FIELDS)),
        };
        let catelog_id = catelog_id
            .to_id()
            .ok_or_else(|| ApiError::validation_error("Invalid catelogId"))?;

        let logo = logo.or_else(|| {
            let (icon_api, configured) = config.icon_api();
            derive_logo(&url, icon_api, configured)
        });

        Ok(NewSite {
            name,
            url,
            logo,
            desc,
            catelog_id,
            sort_order,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SiteCreated {
    pub message: &'static str,
    pub insert: InsertResult,
}

/// POST /api/config - create a site (admin only, enforced by middleware)
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateSiteRequest>, JsonRejection>,
) -> ApiResult<SiteCreated> {
    let Json(request) = payload.map_err(|e| ApiError::invalid_json(e.body_text()))?;
    let site = request.into_new_site(&state.config)?;

    let category = CategoryRepository::new(state.pool.clone())
        .find_by_id(site.catelog_id)
        .await
        .map_err(|e| ApiError::store(CREATE_FAILED, e))?;
    if category.is_none() {
        return Err(ApiError::bad_request("Category not found."));
    }

    let insert = SiteRepository::new(state.pool.clone())
        .insert(&site)
        .await
        .map_err(|e| ApiError::store(CREATE_FAILED, e))?;

    info!(
        id = insert.meta.last_row_id,
        catelog_id = site.catelog_id,
        "Created site {}",
        site.name
    );

    Ok(ApiResponse::created(SiteCreated {
        message: "Config created successfully",
        insert,
    }))
}
