// 📊 Report - the workbook's sheets, computed in memory
//
// Everything here is a pure function of the catalog, the reference graph and
// the sorted anomaly list. No timestamps, no random ids: two runs over the
// same exports produce identical sheets.

use serde::{Deserialize, Serialize};

use crate::anomalies::{count_by_category, Anomaly};
use crate::catalog::Catalog;
use crate::object_types::ConfigType;
use crate::references::{NodeId, ReferenceGraph, TREE_ROOTS};
use crate::sheets;

pub const REPORT_TITLE: &str = "Holiday Credit Solution Documentation";
pub const SUMMARY_TITLE: &str = "Summary";
pub const DEPENDENCY_TREE_TITLE: &str = "Dependency Tree";
pub const ANOMALIES_TITLE: &str = "Anomalies";

// ============================================================================
// SHEET + REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(title: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Sheet {
            title: title.into(),
            headers,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell by header name
    pub fn cell(&self, row: usize, header: &str) -> Option<&str> {
        let col = self.headers.iter().position(|h| h == header)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub sheets: Vec<Sheet>,
}

impl Report {
    pub fn sheet(&self, title: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.title == title)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

/// Assemble every sheet; `anomalies` must already be sorted
pub fn build_report(
    catalog: &Catalog,
    graph: &ReferenceGraph,
    anomalies: &[Anomaly],
    source: &str,
) -> Report {
    let mut sheets = vec![summary_sheet(catalog, anomalies, source)];

    for config_type in ConfigType::ALL {
        if catalog.has_type(config_type) {
            sheets.push(sheets::type_sheet(catalog, config_type));
        }
    }

    if catalog.has_type(ConfigType::HolidayProfile) {
        sheets.push(sheets::profile_details_sheet(catalog));
    }

    sheets.push(dependency_tree_sheet(catalog, graph));
    sheets.push(anomalies_sheet(anomalies));

    tracing::info!(sheets = sheets.len(), "report built");

    Report { sheets }
}

fn strings<const N: usize>(items: [&str; N]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn summary_sheet(catalog: &Catalog, anomalies: &[Anomaly], source: &str) -> Sheet {
    let mut rows = vec![
        strings(["Title", REPORT_TITLE, "", ""]),
        strings(["Source", source, "", ""]),
    ];

    for config_type in catalog.loaded_types() {
        rows.push(vec![
            config_type.folder_name().to_string(),
            config_type.sheet_title().to_string(),
            catalog.count(config_type).to_string(),
            catalog.digest(config_type).unwrap_or("").to_string(),
        ]);
    }
    rows.push(vec![
        "Total Objects".to_string(),
        String::new(),
        catalog.len().to_string(),
        String::new(),
    ]);

    for (category, count) in count_by_category(anomalies) {
        rows.push(vec![
            "Anomalies".to_string(),
            category.as_str().to_string(),
            count.to_string(),
            String::new(),
        ]);
    }
    rows.push(vec![
        "Anomalies".to_string(),
        "Total".to_string(),
        anomalies.len().to_string(),
        String::new(),
    ]);

    Sheet::new(
        SUMMARY_TITLE,
        strings(["Section", "Item", "Count", "Export Digest"]),
        rows,
    )
}

pub fn dependency_tree_sheet(catalog: &Catalog, graph: &ReferenceGraph) -> Sheet {
    let mut rows = Vec::new();

    for root_type in TREE_ROOTS {
        for root in catalog.objects_of(root_type) {
            let root_id = NodeId::new(root_type, &root.name);
            for row in graph.dependency_tree(&root_id) {
                rows.push(vec![
                    row.root.name.clone(),
                    row.depth.to_string(),
                    format!("{}{}", "  ".repeat(row.depth), row.node.name),
                    row.node.config_type.sheet_title().to_string(),
                    row.via,
                    row.note.as_str().to_string(),
                ]);
            }
        }
    }

    Sheet::new(
        DEPENDENCY_TREE_TITLE,
        strings(["Root", "Depth", "Object", "Type", "Via", "Note"]),
        rows,
    )
}

pub fn anomalies_sheet(anomalies: &[Anomaly]) -> Sheet {
    let rows = anomalies
        .iter()
        .map(|a| {
            vec![
                a.category.as_str().to_string(),
                a.severity.as_str().to_string(),
                a.object_type
                    .map(|t| t.folder_name().to_string())
                    .unwrap_or_default(),
                a.affected.join(", "),
                a.description.clone(),
                a.recommendation.clone(),
            ]
        })
        .collect();

    Sheet::new(
        ANOMALIES_TITLE,
        strings([
            "Category",
            "Severity",
            "Type",
            "Affected",
            "Description",
            "Recommendation",
        ]),
        rows,
    )
}
