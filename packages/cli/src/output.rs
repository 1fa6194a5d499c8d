//! Plain-text rendering for terminal output

use plotline_core::models::SpatialLevel;
use plotline_core::navigator::{
    Alignment, Breadcrumb, ColumnDef, FlattenedNode, RenderNode, TreeMetrics,
};
use std::fmt::Write;

/// Grid of `rows` under `columns`, widths fitted to content
pub fn render_table(columns: &[ColumnDef], rows: &[FlattenedNode<'_>]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|column| column.cell(row)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad(column.header, *width, column.align))
        .collect();
    push_line(&mut out, &header.join("  "));

    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut out, &rule.join("  "));

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(columns.iter().zip(&widths))
            .map(|(cell, (column, width))| pad(cell, *width, column.align))
            .collect();
        push_line(&mut out, &line.join("  "));
    }
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

// `format!` width counts chars, which is what the widths above measure.
fn pad(text: &str, width: usize, align: Alignment) -> String {
    match align {
        Alignment::Left => format!("{:<width$}", text),
        Alignment::Center => format!("{:^width$}", text),
        Alignment::Right => format!("{:>width$}", text),
    }
}

/// `Registry > Zone North > Block B1`
pub fn render_breadcrumbs(crumbs: &[Breadcrumb]) -> String {
    std::iter::once("Registry".to_string())
        .chain(
            crumbs
                .iter()
                .map(|crumb| format!("{} {}", crumb.level.label(), crumb.label)),
        )
        .collect::<Vec<_>>()
        .join(" > ")
}

pub fn render_metrics(metrics: &TreeMetrics) -> String {
    let mut out = String::new();
    for level in SpatialLevel::ALL {
        let _ = writeln!(out, "{:<10} {:>6}", level.plural_label(), metrics.count_for(level));
    }
    let _ = writeln!(out, "{:<10} {:>6.2} m²", "Total area", metrics.total_area);
    out
}

/// Indented outline of a render tree
pub fn render_outline(nodes: &[RenderNode]) -> String {
    let mut out = String::new();
    outline_into(nodes, 0, &mut out);
    out
}

fn outline_into(nodes: &[RenderNode], depth: usize, out: &mut String) {
    for node in nodes {
        let _ = write!(out, "{}{} [{}]", "  ".repeat(depth), node.label, node.meta.usage_type);
        if let Some(status) = &node.meta.occupancy_status {
            let _ = write!(out, " ({})", status);
        }
        out.push('\n');
        outline_into(&node.children, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotline_core::models::SpatialNode;
    use plotline_core::navigator::{column_schema, to_render_nodes};

    #[test]
    fn test_table_aligns_columns() {
        let plots = vec![
            SpatialNode::new("p1", SpatialLevel::Plot, "P1", "Corner").with_area(100.0),
            SpatialNode::new("p2", SpatialLevel::Plot, "P-22", "").with_area(7.5),
        ];
        let rows = FlattenedNode::siblings(&plots, Some("B1"));
        let table = render_table(column_schema(SpatialLevel::Plot), &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Code  Plot"));
        assert!(lines[2].starts_with("P1    Corner  B1"));
        assert!(lines[2].contains("100.00 m²"));
        assert!(lines[3].contains("  7.50 m²"));
        assert!(lines[3].starts_with("P-22  P-22"));
    }

    #[test]
    fn test_breadcrumbs_start_at_registry() {
        assert_eq!(render_breadcrumbs(&[]), "Registry");

        let zone = SpatialNode::new("z", SpatialLevel::Zone, "Z1", "North");
        let crumbs = vec![Breadcrumb::from_node(&zone)];
        assert_eq!(render_breadcrumbs(&crumbs), "Registry > Zone North");
    }

    #[test]
    fn test_outline_indents_children() {
        let room = SpatialNode::new("r", SpatialLevel::Room, "R1", "Lab");
        let floor = SpatialNode::new("f", SpatialLevel::Floor, "F1", "Ground").with_child(room);
        let outline = render_outline(&to_render_nodes(&[floor], None));

        assert_eq!(outline, "Ground [FLOOR]\n  Lab [ROOM] (Vacant)\n");
    }
}
