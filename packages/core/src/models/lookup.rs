//! Lookup Categories and Values
//!
//! Lookups are server-maintained reference lists (room statuses, land uses,
//! construction phases, ...). Categories also tell the registry which spatial
//! levels can be browsed as a cross-section ("discovery").

use super::spatial::SpatialLevel;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Metadata describing one lookup category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupCategory {
    #[serde(default)]
    pub id: Option<i64>,

    pub code: String,

    #[serde(default)]
    pub label: String,

    /// Whether the category describes a level of the spatial hierarchy
    #[serde(default)]
    pub is_spatial: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Spatial level named by `code`, resolved on deserialization
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub level: Option<SpatialLevel>,
}

impl LookupCategory {
    pub fn new(code: impl Into<String>, label: impl Into<String>, is_spatial: bool) -> Self {
        let code = code.into();
        let level = code.parse().ok();
        Self {
            id: None,
            code,
            label: label.into(),
            is_spatial,
            icon: None,
            level,
        }
    }

    /// Resolve `level` from `code`
    pub fn resolve_level(&mut self) {
        self.level = self.code.parse().ok();
    }
}

/// One selectable value inside a lookup category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupValue {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Deserialize a category list and resolve each category's level
pub(crate) fn deserialize_categories<'de, D>(
    deserializer: D,
) -> Result<Vec<LookupCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut categories = Vec::<LookupCategory>::deserialize(deserializer)?;
    categories.iter_mut().for_each(LookupCategory::resolve_level);
    Ok(categories)
}

/// Levels that have a spatial lookup category, in hierarchy order
pub fn discoverable_levels(categories: &[LookupCategory]) -> Vec<SpatialLevel> {
    SpatialLevel::ALL
        .into_iter()
        .filter(|level| {
            categories
                .iter()
                .any(|category| category.is_spatial && category.level == Some(*level))
        })
        .collect()
}
