//! Lookups Service - reference lists and category metadata
//!
//! | Operation | Endpoint |
//! |---|---|
//! | `get_categories` | `GET /lookups/categories` |
//! | `get_by_category` | `GET /lookups/categories/{code}/values` |

use super::error::ServiceError;
use super::http::ApiClient;
use crate::models::{deserialize_categories, LookupCategory, LookupValue};
use async_trait::async_trait;
use serde::Deserialize;

const LOOKUPS: &str = "lookups";
const CATEGORIES: &str = "categories";
const VALUES: &str = "values";

#[async_trait]
pub trait LookupsService: Send + Sync {
    /// Category metadata (labels, spatial flags, icons)
    async fn get_categories(&self) -> Result<Vec<LookupCategory>, ServiceError>;

    /// Values of one category, for level-specific selectors
    async fn get_by_category(&self, code: &str) -> Result<Vec<LookupValue>, ServiceError>;
}

#[derive(Deserialize)]
#[serde(transparent)]
struct Categories(#[serde(deserialize_with = "deserialize_categories")] Vec<LookupCategory>);

/// [`LookupsService`] over the REST API
#[derive(Debug, Clone)]
pub struct HttpLookupsService {
    api: ApiClient,
}

impl HttpLookupsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl LookupsService for HttpLookupsService {
    async fn get_categories(&self) -> Result<Vec<LookupCategory>, ServiceError> {
        let Categories(categories) = self.api.get_json(&[LOOKUPS, CATEGORIES]).await?;
        Ok(categories)
    }

    async fn get_by_category(&self, code: &str) -> Result<Vec<LookupValue>, ServiceError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ServiceError::invalid_request("lookup category code is empty"));
        }
        self.api
            .get_json(&[LOOKUPS, CATEGORIES, code, VALUES])
            .await
    }
}
