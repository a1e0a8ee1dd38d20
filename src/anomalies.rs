// 🚩 Anomalies - recorded findings, never execution failures
//
// Every recorded issue (missing export, duplicate name, dangling reference,
// cycle, failed consistency check) ends up here and on the anomaly sheet.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::object_types::ConfigType;

// ============================================================================
// CATEGORY + SEVERITY
// ============================================================================

/// Declaration order is the report's grouping order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnomalyCategory {
    MissingReference,
    InconsistentSetting,
    IncompleteData,
    NamingMismatch,
}

impl AnomalyCategory {
    pub const ALL: [AnomalyCategory; 4] = [
        AnomalyCategory::MissingReference,
        AnomalyCategory::InconsistentSetting,
        AnomalyCategory::IncompleteData,
        AnomalyCategory::NamingMismatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyCategory::MissingReference => "Missing Reference",
            AnomalyCategory::InconsistentSetting => "Inconsistent Setting",
            AnomalyCategory::IncompleteData => "Incomplete Data",
            AnomalyCategory::NamingMismatch => "Naming Mismatch",
        }
    }
}

impl fmt::Display for AnomalyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,    // Configuration is wrong and changes pay outcomes
    Medium,  // Settings disagree where they should match
    Warning, // Placeholder or questionable data in production
    Low,     // Missing detail, probably harmless
    Info,    // Worth a look, likely intentional
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Warning => "Warning",
            Severity::Low => "Low",
            Severity::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ANOMALY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    pub category: AnomalyCategory,
    pub severity: Severity,
    pub object_type: Option<ConfigType>,
    pub affected: Vec<String>,
    pub description: String,
    pub recommendation: String,
}

impl Anomaly {
    pub fn new(
        category: AnomalyCategory,
        severity: Severity,
        object_type: Option<ConfigType>,
        affected: Vec<String>,
        description: impl Into<String>,
    ) -> Self {
        Anomaly {
            category,
            severity,
            object_type,
            affected,
            description: description.into(),
            recommendation: String::new(),
        }
    }

    /// Builder pattern: add a recommendation
    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = recommendation.into();
        self
    }

    pub fn first_affected(&self) -> &str {
        self.affected.first().map(String::as_str).unwrap_or("")
    }

    pub fn summary(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.severity,
            self.category,
            self.description
        )
    }
}

/// Sort by category, then first affected object, then description
///
/// The trailing keys make the order total so reruns are byte-identical.
pub fn sort_anomalies(anomalies: &mut [Anomaly]) {
    anomalies.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.first_affected().cmp(b.first_affected()))
            .then_with(|| a.description.cmp(&b.description))
            .then_with(|| a.severity.cmp(&b.severity))
            .then_with(|| a.affected.cmp(&b.affected))
    });
}

/// Count per category, in category order (zero counts included)
pub fn count_by_category(anomalies: &[Anomaly]) -> Vec<(AnomalyCategory, usize)> {
    AnomalyCategory::ALL
        .iter()
        .map(|c| (*c, anomalies.iter().filter(|a| a.category == *c).count()))
        .collect()
}
