//! Location Mutation Payloads
//!
//! Request bodies for creating and editing nodes of the spatial tree. The
//! backend owns validation and cascade rules; these types only shape the
//! request.

use super::spatial::{SpatialLevel, SpatialNode, ValidationError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Payload for `POST /locations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocation {
    #[serde(rename = "type")]
    pub level: SpatialLevel,

    /// Backend id of the parent, `None` for zones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,

    pub code: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_area: Option<f64>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl CreateLocation {
    /// Payload for a new zone at the root of the tree
    pub fn zone(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            level: SpatialLevel::Zone,
            parent_id: None,
            code: code.into(),
            name: name.into(),
            area: None,
            contract_area: None,
            attributes: Map::new(),
        }
    }

    /// Payload for a new child of `parent`
    ///
    /// # Errors
    ///
    /// - `RoomHasChildren` when `parent` is a room
    /// - `MissingField("realId")` when `parent` has no backend id
    pub fn child_of(
        parent: &SpatialNode,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let level = parent
            .level
            .child_level()
            .ok_or_else(|| ValidationError::RoomHasChildren {
                node_id: parent.id.clone(),
            })?;
        let parent_id = parent
            .real_id
            .ok_or_else(|| ValidationError::MissingField("realId".to_string()))?;

        Ok(Self {
            level,
            parent_id: Some(parent_id),
            code: code.into(),
            name: name.into(),
            area: None,
            contract_area: None,
            attributes: Map::new(),
        })
    }

    pub fn with_area(mut self, area: f64, contract_area: Option<f64>) -> Self {
        self.area = Some(area);
        self.contract_area = contract_area;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Reject payloads the backend would refuse outright
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::MissingField("code".to_string()));
        }
        if self.level != SpatialLevel::Zone && self.parent_id.is_none() {
            return Err(ValidationError::MissingField("parentId".to_string()));
        }
        Ok(())
    }
}

/// Accept either `T` or `null`, so `null` means "clear" and absence means "keep"
fn deserialize_optional_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::<T>::deserialize(deserializer)?))
}

/// Sparse payload for `PUT /locations/{level}/{id}`
///
/// Area fields use the double-Option pattern:
///
/// - `None`: leave unchanged
/// - `Some(None)`: clear the value
/// - `Some(Some(v))`: set the value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub area: Option<Option<f64>>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub contract_area: Option<Option<f64>>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl UpdateLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_area(mut self, area: Option<f64>) -> Self {
        self.area = Some(area);
        self
    }

    /// Check if the update contains any changes
    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.name.is_none()
            && self.area.is_none()
            && self.contract_area.is_none()
            && self.attributes.is_empty()
    }
}
