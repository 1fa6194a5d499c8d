//! Per-level column schemas for registry grids
//!
//! Hand-authored tables, one per level. `column_schema` is an exhaustive
//! match, so a new level cannot ship without its columns.

use super::adapter::occupancy_status;
use super::flatten::FlattenedNode;
use crate::models::SpatialLevel;
use serde::Serialize;
use serde_json::Value;

const EMPTY_CELL: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// How a cell value is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CellRender {
    Text,
    /// Square metres, two decimals
    Area,
    /// Signed square metres
    Variance,
    /// Status pill
    Badge,
    /// Number of children
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub header: &'static str,
    pub accessor: &'static str,
    pub width: u16,
    pub align: Alignment,
    pub render: CellRender,
}

const fn col(
    header: &'static str,
    accessor: &'static str,
    width: u16,
    align: Alignment,
    render: CellRender,
) -> ColumnDef {
    ColumnDef {
        header,
        accessor,
        width,
        align,
        render,
    }
}

use Alignment::{Center, Left, Right};
use CellRender::{Area, Badge, Count, Text, Variance};

const ZONE_COLUMNS: &[ColumnDef] = &[
    col("Code", "code", 120, Left, Text),
    col("Zone", "name", 240, Left, Text),
    col("Blocks", "children", 90, Right, Count),
    col("Status", "status", 120, Center, Badge),
];

const BLOCK_COLUMNS: &[ColumnDef] = &[
    col("Code", "code", 120, Left, Text),
    col("Block", "name", 220, Left, Text),
    col("Zone", "parentRefName", 180, Left, Text),
    col("Plots", "children", 90, Right, Count),
];

const PLOT_COLUMNS: &[ColumnDef] = &[
    col("Code", "code", 120, Left, Text),
    col("Plot", "name", 200, Left, Text),
    col("Block", "parentRefName", 160, Left, Text),
    col("Area", "area", 130, Right, Area),
    col("Contract Area", "contractArea", 130, Right, Area),
    col("Variance", "areaVariance", 120, Right, Variance),
    col("Land Use", "landUse", 140, Left, Text),
];

const BUILDING_COLUMNS: &[ColumnDef] = &[
    col("Code", "code", 120, Left, Text),
    col("Building", "name", 220, Left, Text),
    col("Plot", "parentRefName", 160, Left, Text),
    col("Floors", "children", 90, Right, Count),
    col("Construction", "constructionStatus", 150, Center, Badge),
];

const FLOOR_COLUMNS: &[ColumnDef] = &[
    col("Code", "code", 120, Left, Text),
    col("Floor", "name", 200, Left, Text),
    col("Building", "parentRefName", 180, Left, Text),
    col("Rooms", "children", 90, Right, Count),
];

const ROOM_COLUMNS: &[ColumnDef] = &[
    col("Code", "code", 120, Left, Text),
    col("Room", "name", 180, Left, Text),
    col("Floor", "parentRefName", 160, Left, Text),
    col("Area", "area", 120, Right, Area),
    col("Occupant", "occupantName", 200, Left, Text),
    col("Residency", "occupancyStatus", 130, Center, Badge),
];

/// Columns for rows of `level`
pub fn column_schema(level: SpatialLevel) -> &'static [ColumnDef] {
    match level {
        SpatialLevel::Zone => ZONE_COLUMNS,
        SpatialLevel::Block => BLOCK_COLUMNS,
        SpatialLevel::Plot => PLOT_COLUMNS,
        SpatialLevel::Building => BUILDING_COLUMNS,
        SpatialLevel::Floor => FLOOR_COLUMNS,
        SpatialLevel::Room => ROOM_COLUMNS,
    }
}

impl ColumnDef {
    /// Text rendering of this column for one row
    pub fn cell(&self, row: &FlattenedNode<'_>) -> String {
        let node = row.node;
        let text = match self.accessor {
            "code" => Some(node.code.clone()),
            "name" => Some(node.display_name().to_string()),
            "parentRefName" => row.parent_ref_name.clone(),
            "children" => Some(node.children.len().to_string()),
            "area" => node.area.map(|v| self.format_number(v)),
            "contractArea" => node.contract_area.map(|v| self.format_number(v)),
            "areaVariance" => node.area_variance.map(|v| self.format_number(v)),
            "occupantName" => node.occupant_name().map(str::to_string),
            "occupancyStatus" => occupancy_status(node).map(str::to_string),
            other => node.attributes.get(other).and_then(attribute_text),
        };

        text.filter(|value| !value.is_empty())
            .unwrap_or_else(|| EMPTY_CELL.to_string())
    }

    fn format_number(&self, value: f64) -> String {
        match self.render {
            CellRender::Area => format!("{:.2} m²", value),
            CellRender::Variance => format!("{:+.2} m²", value),
            CellRender::Text | CellRender::Badge | CellRender::Count => value.to_string(),
        }
    }
}

fn attribute_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("Yes".to_string()),
        Value::Bool(false) => Some("No".to_string()),
        Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_string),
        Value::Null | Value::Array(_) => None,
    }
}
