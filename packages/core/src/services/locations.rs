//! Locations Service - spatial tree endpoints
//!
//! | Operation | Endpoint |
//! |---|---|
//! | `get_tree` | `GET /locations/tree` |
//! | `create` | `POST /locations` |
//! | `update` | `PUT /locations/{level}/{id}` |
//! | `delete` | `DELETE /locations/{level}/{id}` |
//!
//! Deleting a node removes its descendants server-side. Mutations return no
//! data the registry uses; callers refetch the whole tree afterwards.

use super::error::ServiceError;
use super::http::ApiClient;
use crate::models::{
    assign_missing_keys, CreateLocation, SpatialLevel, SpatialNode, UpdateLocation,
};
use async_trait::async_trait;
use reqwest::Method;

const LOCATIONS: &str = "locations";
const TREE: &str = "tree";

/// Spatial tree persistence, implemented server-side
#[async_trait]
pub trait LocationsService: Send + Sync {
    /// Fetch the full nested hierarchy, roots in display order
    async fn get_tree(&self) -> Result<Vec<SpatialNode>, ServiceError>;

    /// Persist a new node at any level
    async fn create(&self, data: CreateLocation) -> Result<(), ServiceError>;

    /// Apply a sparse update to one node
    async fn update(
        &self,
        level: SpatialLevel,
        id: i64,
        data: UpdateLocation,
    ) -> Result<(), ServiceError>;

    /// Remove a node and everything beneath it
    async fn delete(&self, level: SpatialLevel, id: i64) -> Result<(), ServiceError>;
}

/// [`LocationsService`] over the REST API
#[derive(Debug, Clone)]
pub struct HttpLocationsService {
    api: ApiClient,
}

impl HttpLocationsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl LocationsService for HttpLocationsService {
    async fn get_tree(&self) -> Result<Vec<SpatialNode>, ServiceError> {
        let mut tree: Vec<SpatialNode> = self.api.get_json(&[LOCATIONS, TREE]).await?;
        assign_missing_keys(&mut tree);
        tracing::debug!("Fetched spatial tree with {} root(s)", tree.len());
        Ok(tree)
    }

    async fn create(&self, data: CreateLocation) -> Result<(), ServiceError> {
        data.validate()?;
        self.api.send_json(Method::POST, &[LOCATIONS], &data).await
    }

    async fn update(
        &self,
        level: SpatialLevel,
        id: i64,
        data: UpdateLocation,
    ) -> Result<(), ServiceError> {
        if data.is_empty() {
            return Err(ServiceError::invalid_request("update contains no changes"));
        }
        let id = id.to_string();
        self.api
            .send_json(Method::PUT, &[LOCATIONS, level.path_segment(), id.as_str()], &data)
            .await
    }

    async fn delete(&self, level: SpatialLevel, id: i64) -> Result<(), ServiceError> {
        let id = id.to_string();
        self.api
            .delete(&[LOCATIONS, level.path_segment(), id.as_str()])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ClientConfig;
    use std::time::Duration;

    // Port 9 (discard) is never contacted: every case fails before sending.
    fn service() -> HttpLocationsService {
        let api = ApiClient::new(&ClientConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            api_token: None,
            timeout: Duration::from_millis(50),
        })
        .unwrap();
        HttpLocationsService::new(api)
    }

    #[test]
    fn test_empty_update_is_rejected_locally() {
        let err = tokio_test::block_on(service().update(
            SpatialLevel::Plot,
            7,
            UpdateLocation::new(),
        ))
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(_)));
    }

    #[test]
    fn test_invalid_create_is_rejected_locally() {
        let blank_code = CreateLocation::zone("  ", "Nameless");
        let err = tokio_test::block_on(service().create(blank_code)).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
