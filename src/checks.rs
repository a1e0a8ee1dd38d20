// 🏷️ Consistency Checks - Checks as Data
//
// Each check is parameterized by (type, field path, expected relation) and
// runs over the resolved catalog without side effects. Adding a holiday or a
// rule pairing means adding data to the battery, never a new branch.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::anomalies::{Anomaly, AnomalyCategory, Severity};
use crate::catalog::Catalog;
use crate::object::ConfigObject;
use crate::object_types::ConfigType;
use crate::references::{NodeId, ReferenceGraph, CREDIT_RULE_LABEL};

// ============================================================================
// BUILDING BLOCKS
// ============================================================================

/// A named field path, e.g. ("Before Holiday", "WSAEligibilityDeterminer....")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub label: String,
    pub path: String,
}

impl FieldRef {
    pub fn new(label: &str, path: &str) -> Self {
        FieldRef {
            label: label.to_string(),
            path: path.to_string(),
        }
    }
}

/// How an object name is selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePattern {
    /// Case-sensitive prefix
    Prefix(String),
    /// Case-insensitive substring
    Contains(String),
    /// Whitespace-delimited token sequence, case-sensitive
    Token(String),
}

impl NamePattern {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NamePattern::Prefix(p) => name.starts_with(p.as_str()),
            NamePattern::Contains(s) => name.to_lowercase().contains(&s.to_lowercase()),
            NamePattern::Token(t) => has_tokens(name, t),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            NamePattern::Prefix(p) => format!("starting with '{}'", p),
            NamePattern::Contains(s) => format!("containing '{}'", s),
            NamePattern::Token(t) => format!("marked '{}'", t),
        }
    }
}

/// Whether `needle`'s words appear as consecutive words of `name`
///
/// "Non Exempt PT" has the token "PT"; "EXEMPT" does not.
pub fn has_tokens(name: &str, needle: &str) -> bool {
    let words: Vec<&str> = name.split_whitespace().collect();
    let wanted: Vec<&str> = needle.split_whitespace().collect();
    if wanted.is_empty() || wanted.len() > words.len() {
        return false;
    }
    words.windows(wanted.len()).any(|w| w == wanted.as_slice())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPosition {
    #[default]
    Prefix,
    Suffix,
}

fn strip_marker<'a>(name: &'a str, marker: &str, at: MarkerPosition) -> Option<&'a str> {
    match at {
        MarkerPosition::Prefix => name.strip_prefix(marker),
        MarkerPosition::Suffix => name.strip_suffix(marker),
    }
}

/// Whether the rendered value at `field` is one of `values` (case-insensitive)
fn value_in(obj: &ConfigObject, field: &FieldRef, values: &[String]) -> bool {
    let value = obj.text(&field.path);
    values.iter().any(|v| v.eq_ignore_ascii_case(&value))
}

fn field_labels(fields: &[FieldRef]) -> String {
    fields
        .iter()
        .map(|f| f.label.as_str())
        .collect::<Vec<_>>()
        .join("/")
}

// ============================================================================
// CHECK DEFINITIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Check {
    /// Objects need at least `min` entries at `field`
    MinCount {
        object_type: ConfigType,
        field: FieldRef,
        min: usize,
    },

    /// Variant pairs (same base name, `left` vs `right` marker) must agree on `fields`
    PairedSymmetry {
        object_type: ConfigType,
        left: String,
        right: String,
        #[serde(default)]
        at: MarkerPosition,
        fields: Vec<FieldRef>,
    },

    /// All objects matching `name_pattern` must share one value of `field`
    UniformGroup {
        object_type: ConfigType,
        name_pattern: NamePattern,
        field: FieldRef,
    },

    /// Objects matching `name_pattern` must not have any of `fields` set to one of `values`
    ForbiddenValue {
        object_type: ConfigType,
        name_pattern: NamePattern,
        fields: Vec<FieldRef>,
        values: Vec<String>,
    },

    /// "All of `fields` set to one of `values`" must hold for all or none of the group
    UniformCondition {
        object_type: ConfigType,
        name_pattern: NamePattern,
        fields: Vec<FieldRef>,
        values: Vec<String>,
    },

    /// Population-specific sources must reference the population's variant
    VariantSelection {
        object_type: ConfigType,
        #[serde(default = "default_variant_label")]
        label: String,
        population: String,
        variant: String,
        #[serde(default)]
        conflicting: Vec<String>,
    },

    /// Placeholder objects must not be referenced by in-scope objects
    ///
    /// Names are matched case-insensitively; an empty `object_types` means every type.
    ReservedScope {
        #[serde(default)]
        object_types: Vec<ConfigType>,
        #[serde(default)]
        prefixes: Vec<String>,
        #[serde(default)]
        contains: Vec<String>,
        #[serde(default)]
        flag_unreferenced: bool,
    },

    /// Report every object whose name matches `name_pattern`
    NamePresence {
        object_type: ConfigType,
        name_pattern: NamePattern,
    },

    /// A marker in the name must be echoed by `field`
    NameEcho {
        object_type: ConfigType,
        marker: String,
        field: FieldRef,
    },

    /// `field` must not mention another holiday than the object's own name
    ///
    /// Each entry of `holidays` is a list of aliases for one holiday.
    HolidayEcho {
        object_type: ConfigType,
        field: FieldRef,
        holidays: Vec<Vec<String>>,
    },

    /// Objects matching `name_pattern` must have `field` populated
    RequiredField {
        object_type: ConfigType,
        name_pattern: NamePattern,
        field: FieldRef,
    },

    /// The export must mention every expected holiday (aliases per entry)
    Coverage {
        object_type: ConfigType,
        expected: Vec<Vec<String>>,
        #[serde(default)]
        exclude_prefix: Option<String>,
    },
}

fn default_variant_label() -> String {
    CREDIT_RULE_LABEL.to_string()
}

fn default_severity() -> Severity {
    Severity::Medium
}

/// One entry of the battery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDef {
    /// Check ID for tracking
    pub id: String,

    #[serde(flatten)]
    pub check: Check,

    #[serde(default = "default_severity")]
    pub severity: Severity,

    #[serde(default)]
    pub recommendation: String,
}

impl CheckDef {
    pub fn new(id: &str, check: Check, severity: Severity, recommendation: &str) -> Self {
        CheckDef {
            id: id.to_string(),
            check,
            severity,
            recommendation: recommendation.to_string(),
        }
    }

    /// Run this check; never mutates anything
    pub fn run(&self, catalog: &Catalog, graph: &ReferenceGraph) -> Vec<Anomaly> {
        let found = match &self.check {
            Check::MinCount {
                object_type,
                field,
                min,
            } => self.min_count(catalog, *object_type, field, *min),
            Check::PairedSymmetry {
                object_type,
                left,
                right,
                at,
                fields,
            } => self.paired_symmetry(catalog, *object_type, left, right, *at, fields),
            Check::UniformGroup {
                object_type,
                name_pattern,
                field,
            } => self.uniform_group(catalog, *object_type, name_pattern, field),
            Check::ForbiddenValue {
                object_type,
                name_pattern,
                fields,
                values,
            } => self.forbidden_value(catalog, *object_type, name_pattern, fields, values),
            Check::UniformCondition {
                object_type,
                name_pattern,
                fields,
                values,
            } => self.uniform_condition(catalog, *object_type, name_pattern, fields, values),
            Check::VariantSelection {
                object_type,
                label,
                population,
                variant,
                conflicting,
            } => self.variant_selection(
                catalog,
                graph,
                *object_type,
                label,
                population,
                variant,
                conflicting,
            ),
            Check::ReservedScope {
                object_types,
                prefixes,
                contains,
                flag_unreferenced,
            } => self.reserved_scope(
                catalog,
                graph,
                object_types,
                prefixes,
                contains,
                *flag_unreferenced,
            ),
            Check::NamePresence {
                object_type,
                name_pattern,
            } => self.name_presence(catalog, *object_type, name_pattern),
            Check::NameEcho {
                object_type,
                marker,
                field,
            } => self.name_echo(catalog, *object_type, marker, field),
            Check::HolidayEcho {
                object_type,
                field,
                holidays,
            } => self.holiday_echo(catalog, *object_type, field, holidays),
            Check::RequiredField {
                object_type,
                name_pattern,
                field,
            } => self.required_field(catalog, *object_type, name_pattern, field),
            Check::Coverage {
                object_type,
                expected,
                exclude_prefix,
            } => self.coverage(catalog, *object_type, expected, exclude_prefix.as_deref()),
        };

        if !found.is_empty() {
            tracing::debug!(check = %self.id, found = found.len(), "check fired");
        }
        found
    }

    fn anomaly(
        &self,
        category: AnomalyCategory,
        object_type: Option<ConfigType>,
        affected: Vec<String>,
        description: String,
    ) -> Anomaly {
        Anomaly::new(category, self.severity, object_type, affected, description)
            .with_recommendation(self.recommendation.clone())
    }

    // ========================================================================
    // CHECK IMPLEMENTATIONS
    // ========================================================================

    fn min_count(
        &self,
        catalog: &Catalog,
        object_type: ConfigType,
        field: &FieldRef,
        min: usize,
    ) -> Vec<Anomaly> {
        catalog
            .objects_of(object_type)
            .filter_map(|obj| {
                let count = obj.count(&field.path);
                (count < min).then(|| {
                    self.anomaly(
                        AnomalyCategory::IncompleteData,
                        Some(object_type),
                        vec![obj.name.clone()],
                        format!(
                            "{} '{}' has {} {} (expected at least {})",
                            object_type, obj.name, count, field.label, min
                        ),
                    )
                })
            })
            .collect()
    }

    fn paired_symmetry(
        &self,
        catalog: &Catalog,
        object_type: ConfigType,
        left: &str,
        right: &str,
        at: MarkerPosition,
        fields: &[FieldRef],
    ) -> Vec<Anomaly> {
        // Longer marker first so "Non Exempt " is never read as "Exempt "
        let (first, second, first_is_left) = if right.len() > left.len() {
            (right, left, false)
        } else {
            (left, right, true)
        };

        let mut pairs: BTreeMap<&str, (Option<&ConfigObject>, Option<&ConfigObject>)> =
            BTreeMap::new();
        for obj in catalog.objects_of(object_type) {
            let (base, is_left) = if let Some(base) = strip_marker(&obj.name, first, at) {
                (base, first_is_left)
            } else if let Some(base) = strip_marker(&obj.name, second, at) {
                (base, !first_is_left)
            } else {
                continue;
            };

            let slot = pairs.entry(base.trim()).or_default();
            if is_left {
                slot.0 = Some(obj);
            } else {
                slot.1 = Some(obj);
            }
        }

        let mut found = Vec::new();
        for (l, r) in pairs.values() {
            let (Some(l), Some(r)) = (l, r) else {
                continue;
            };
            for field in fields {
                let lv = l.text(&field.path);
                let rv = r.text(&field.path);
                if lv != rv {
                    found.push(self.anomaly(
                        AnomalyCategory::InconsistentSetting,
                        Some(object_type),
                        vec![l.name.clone(), r.name.clone()],
                        format!(
                            "'{}' and '{}' differ on {}: '{}' vs '{}'",
                            l.name, r.name, field.label, lv, rv
                        ),
                    ));
                }
            }
        }
        found
    }

    fn uniform_group(
        &self,
        catalog: &Catalog,
        object_type: ConfigType,
        name_pattern: &NamePattern,
        field: &FieldRef,
    ) -> Vec<Anomaly> {
        let mut by_value: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for obj in catalog
            .objects_of(object_type)
            .filter(|o| name_pattern.matches(&o.name))
        {
            by_value
                .entry(obj.text(&field.path))
                .or_default()
                .push(obj.name.clone());
        }

        if by_value.len() <= 1 {
            return Vec::new();
        }

        let values: Vec<String> = by_value
            .iter()
            .map(|(value, names)| format!("'{}' ({})", value, names.len()))
            .collect();
        let mut affected: Vec<String> = by_value.into_values().flatten().collect();
        affected.sort();

        vec![self.anomaly(
            AnomalyCategory::InconsistentSetting,
            Some(object_type),
            affected,
            format!(
                "{} objects {} disagree on {}: {}",
                object_type,
                name_pattern.describe(),
                field.label,
                values.join(", ")
            ),
        )]
    }

    fn forbidden_value(
        &self,
        catalog: &Catalog,
        object_type: ConfigType,
        name_pattern: &NamePattern,
        fields: &[FieldRef],
        values: &[String],
    ) -> Vec<Anomaly> {
        let offenders: Vec<String> = catalog
            .objects_of(object_type)
            .filter(|o| name_pattern.matches(&o.name))
            .filter(|o| fields.iter().any(|f| value_in(o, f, values)))
            .map(|o| o.name.clone())
            .collect();

        if offenders.is_empty() {
            return Vec::new();
        }

        vec![self.anomaly(
            AnomalyCategory::InconsistentSetting,
            Some(object_type),
            offenders.clone(),
            format!(
                "{} {} object(s) {} have {} set to {}",
                offenders.len(),
                object_type,
                name_pattern.describe(),
                field_labels(fields),
                values.join("/")
            ),
        )]
    }

    fn uniform_condition(
        &self,
        catalog: &Catalog,
        object_type: ConfigType,
        name_pattern: &NamePattern,
        fields: &[FieldRef],
        values: &[String],
    ) -> Vec<Anomaly> {
        let group: Vec<&ConfigObject> = catalog
            .objects_of(object_type)
            .filter(|o| name_pattern.matches(&o.name))
            .collect();
        let holding: Vec<String> = group
            .iter()
            .filter(|o| !fields.is_empty() && fields.iter().all(|f| value_in(o, f, values)))
            .map(|o| o.name.clone())
            .collect();

        if holding.is_empty() || holding.len() == group.len() {
            return Vec::new();
        }

        vec![self.anomaly(
            AnomalyCategory::InconsistentSetting,
            Some(object_type),
            holding.clone(),
            format!(
                "{} of {} {} objects {} have {} all set to {}",
                holding.len(),
                group.len(),
                object_type,
                name_pattern.describe(),
                field_labels(fields),
                values.join("/")
            ),
        )]
    }

    #[allow(clippy::too_many_arguments)]
    fn variant_selection(
        &self,
        catalog: &Catalog,
        graph: &ReferenceGraph,
        object_type: ConfigType,
        label: &str,
        population: &str,
        variant: &str,
        conflicting: &[String],
    ) -> Vec<Anomaly> {
        let mut found = Vec::new();

        for source in catalog
            .objects_of(object_type)
            .filter(|o| has_tokens(&o.name, population))
        {
            let node = NodeId::new(object_type, &source.name);
            for edge in graph.outgoing(&node).filter(|e| e.label == label) {
                let target = &edge.target.name;

                if let Some(conflict) = conflicting.iter().find(|c| has_tokens(target, c)) {
                    found.push(self.anomaly(
                        AnomalyCategory::InconsistentSetting,
                        Some(object_type),
                        vec![source.name.clone(), target.clone()],
                        format!(
                            "'{}' ({}) uses {} '{}', which is the {} variant",
                            source.name, population, label, target, conflict
                        ),
                    ));
                    continue;
                }

                let expected = format!("{} {}", target, variant);
                if !has_tokens(target, variant)
                    && catalog.contains(edge.target.config_type, &expected)
                {
                    found.push(self.anomaly(
                        AnomalyCategory::InconsistentSetting,
                        Some(object_type),
                        vec![source.name.clone(), target.clone()],
                        format!(
                            "'{}' ({}) uses generic {} '{}' although '{}' exists",
                            source.name, population, label, target, expected
                        ),
                    ));
                }
            }
        }
        found
    }

    fn reserved_scope(
        &self,
        catalog: &Catalog,
        graph: &ReferenceGraph,
        object_types: &[ConfigType],
        prefixes: &[String],
        contains: &[String],
        flag_unreferenced: bool,
    ) -> Vec<Anomaly> {
        let is_reserved = |name: &str| {
            let lower = name.to_lowercase();
            prefixes.iter().any(|p| lower.starts_with(&p.to_lowercase()))
                || contains.iter().any(|c| lower.contains(&c.to_lowercase()))
        };
        let in_scope =
            |config_type: ConfigType| object_types.is_empty() || object_types.contains(&config_type);

        let mut found = Vec::new();
        for obj in catalog
            .iter()
            .filter(|o| in_scope(o.config_type) && is_reserved(&o.name))
        {
            let node = NodeId::new(obj.config_type, &obj.name);
            let referrers: BTreeSet<&str> = graph
                .incoming(&node)
                .map(|e| e.source.name.as_str())
                .filter(|name| !is_reserved(name))
                .collect();

            if !referrers.is_empty() {
                let mut affected = vec![obj.name.clone()];
                affected.extend(referrers.iter().map(|s| s.to_string()));
                found.push(self.anomaly(
                    AnomalyCategory::NamingMismatch,
                    Some(obj.config_type),
                    affected,
                    format!(
                        "Placeholder {} '{}' is referenced by {} in-scope object(s): {}",
                        obj.config_type,
                        obj.name,
                        referrers.len(),
                        referrers.into_iter().collect::<Vec<_>>().join(", ")
                    ),
                ));
            } else if flag_unreferenced {
                found.push(self.anomaly(
                    AnomalyCategory::NamingMismatch,
                    Some(obj.config_type),
                    vec![obj.name.clone()],
                    format!(
                        "Placeholder {} '{}' is present in the export",
                        obj.config_type, obj.name
                    ),
                ));
            }
        }
        found
    }

    fn name_presence(
        &self,
        catalog: &Catalog,
        object_type: ConfigType,
        name_pattern: &NamePattern,
    ) -> Vec<Anomaly> {
        let names: Vec<String> = catalog
            .objects_of(object_type)
            .filter(|o| name_pattern.matches(&o.name))
            .map(|o| o.name.clone())
            .collect();

        if names.is_empty() {
            return Vec::new();
        }

        vec![self.anomaly(
            AnomalyCategory::NamingMismatch,
            Some(object_type),
            names.clone(),
            format!(
                "Found {} {} object(s) {}: {}",
                names.len(),
                object_type,
                name_pattern.describe(),
                names.join(", ")
            ),
        )]
    }

    fn name_echo(
        &self,
        catalog: &Catalog,
        object_type: ConfigType,
        marker: &str,
        field: &FieldRef,
    ) -> Vec<Anomaly> {
        let wanted = marker.to_lowercase();
        catalog
            .objects_of(object_type)
            .filter(|o| o.name.to_lowercase().contains(&wanted))
            .filter_map(|o| {
                let value = o.text(&field.path);
                (!value.to_lowercase().contains(&wanted)).then(|| {
                    self.anomaly(
                        AnomalyCategory::InconsistentSetting,
                        Some(object_type),
                        vec![o.name.clone()],
                        format!(
                            "'{}' is a '{}' object but its {} is '{}'",
                            o.name, marker, field.label, value
                        ),
                    )
                })
            })
            .collect()
    }

    fn holiday_echo(
        &self,
        catalog: &Catalog,
        object_type: ConfigType,
        field: &FieldRef,
        holidays: &[Vec<String>],
    ) -> Vec<Anomaly> {
        let mentions = |text: &str| -> BTreeSet<usize> {
            let upper = text.to_uppercase();
            holidays
                .iter()
                .enumerate()
                .filter(|(_, aliases)| aliases.iter().any(|a| upper.contains(&a.to_uppercase())))
                .map(|(idx, _)| idx)
                .collect()
        };

        let mut found = Vec::new();
        for obj in catalog.objects_of(object_type) {
            let own = mentions(&obj.name);
            let value = obj.text(&field.path);
            if own.is_empty() || value.is_empty() {
                continue;
            }
            let referenced = mentions(&value);
            if !referenced.is_empty() && referenced.is_disjoint(&own) {
                found.push(self.anomaly(
                    AnomalyCategory::InconsistentSetting,
                    Some(object_type),
                    vec![obj.name.clone(), value.clone()],
                    format!(
                        "'{}' uses {} '{}', which belongs to a different holiday",
                        obj.name, field.label, value
                    ),
                ));
            }
        }
        found
    }

    fn required_field(
        &self,
        catalog: &Catalog,
        object_type: ConfigType,
        name_pattern: &NamePattern,
        field: &FieldRef,
    ) -> Vec<Anomaly> {
        let missing: Vec<String> = catalog
            .objects_of(object_type)
            .filter(|o| name_pattern.matches(&o.name))
            .filter(|o| o.text(&field.path).is_empty())
            .map(|o| o.name.clone())
            .collect();

        if missing.is_empty() {
            return Vec::new();
        }

        vec![self.anomaly(
            AnomalyCategory::IncompleteData,
            Some(object_type),
            missing.clone(),
            format!(
                "{} {} object(s) {} are missing {}",
                missing.len(),
                object_type,
                name_pattern.describe(),
                field.label
            ),
        )]
    }

    fn coverage(
        &self,
        catalog: &Catalog,
        object_type: ConfigType,
        expected: &[Vec<String>],
        exclude_prefix: Option<&str>,
    ) -> Vec<Anomaly> {
        if !catalog.has_type(object_type) {
            return Vec::new();
        }

        let names: Vec<String> = catalog
            .objects_of(object_type)
            .filter(|o| exclude_prefix.map_or(true, |p| !o.name.starts_with(p)))
            .map(|o| o.name.to_uppercase())
            .collect();
        let all_names = names.join(" | ");

        let missing: Vec<String> = expected
            .iter()
            .filter(|aliases| !aliases.iter().any(|a| all_names.contains(&a.to_uppercase())))
            .filter_map(|aliases| aliases.first().cloned())
            .collect();

        if missing.is_empty() {
            return Vec::new();
        }

        vec![self.anomaly(
            AnomalyCategory::IncompleteData,
            Some(object_type),
            vec![object_type.folder_name().to_string()],
            format!(
                "{} export appears incomplete: {} object(s) considered, missing {}",
                object_type,
                names.len(),
                missing.join(", ")
            ),
        )]
    }
}

// ============================================================================
// CHECK BATTERY
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CheckBattery {
    checks: Vec<CheckDef>,
}

const ELIGIBILITY: &str = "WSAEligibilityDeterminer.WSAEligibilityDeterminer";

fn eligibility(label: &str, attribute: &str) -> FieldRef {
    FieldRef::new(label, &format!("{}.{}", ELIGIBILITY, attribute))
}

fn aliases(groups: &[&[&str]]) -> Vec<Vec<String>> {
    groups
        .iter()
        .map(|g| g.iter().map(|s| s.to_string()).collect())
        .collect()
}

const HOLIDAY_ALIASES: &[&[&str]] = &[
    &["NEW YEAR"],
    &["MLK", "MARTIN LUTHER KING"],
    &["PRESIDENTS"],
    &["MEMORIAL"],
    &["JUNETEENTH"],
    &["INDEPENDENCE"],
    &["LABOR"],
    &["VETERANS"],
    &["THANKSGIVING"],
    &["CHRISTMAS"],
];

const STANDARD_HOLIDAYS: &[&[&str]] = &[
    &["Independence Day"],
    &["Labor Day"],
    &["Martin Luther King", "MLK"],
    &["Memorial Day"],
    &["Presidents Day"],
    &["Veterans Day"],
];

impl CheckBattery {
    pub fn from_checks(checks: Vec<CheckDef>) -> Self {
        CheckBattery { checks }
    }

    /// Load a battery from a JSON array of check definitions
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read checks file: {:?}", path.as_ref()))?;

        let checks: Vec<CheckDef> =
            serde_json::from_str(&content).context("Failed to parse checks JSON")?;

        Ok(CheckBattery::from_checks(checks))
    }

    pub fn checks(&self) -> &[CheckDef] {
        &self.checks
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every check in order
    pub fn run(&self, catalog: &Catalog, graph: &ReferenceGraph) -> Vec<Anomaly> {
        let anomalies: Vec<Anomaly> = self
            .checks
            .iter()
            .flat_map(|check| check.run(catalog, graph))
            .collect();

        tracing::info!(
            checks = self.checks.len(),
            anomalies = anomalies.len(),
            "consistency checks done"
        );
        anomalies
    }

    /// The findings documented for the holiday credit solution
    pub fn default_battery() -> Self {
        use ConfigType::*;

        let mut checks = vec![
            CheckDef::new(
                "holiday_min_dates",
                Check::MinCount {
                    object_type: Holiday,
                    field: FieldRef::new("dates", "WSAHolidayDates.WSAHolidayDate"),
                    min: 3,
                },
                Severity::Warning,
                "Consider adding future year dates",
            ),
            CheckDef::new(
                "holiday_standard_coverage",
                Check::Coverage {
                    object_type: Holiday,
                    expected: aliases(STANDARD_HOLIDAYS),
                    exclude_prefix: Some("ADVS".to_string()),
                },
                Severity::High,
                "Re-export holidays to include all standard holidays",
            ),
            CheckDef::new(
                "advs_holidays",
                Check::NamePresence {
                    object_type: Holiday,
                    name_pattern: NamePattern::Prefix("ADVS".to_string()),
                },
                Severity::Info,
                "Verify ADVS holidays are correctly used in profiles",
            ),
            CheckDef::new(
                "placeholder_scope",
                Check::ReservedScope {
                    object_types: vec![HolidayCreditRule, ContributingShiftRule],
                    prefixes: Vec::new(),
                    contains: vec!["zz".to_string(), "TEST".to_string()],
                    flag_unreferenced: true,
                },
                Severity::Warning,
                "Review if test/zz placeholders should be removed or replaced by production objects",
            ),
            CheckDef::new(
                "credit_pay_code_type",
                Check::UniformGroup {
                    object_type: PayCode,
                    name_pattern: NamePattern::Contains("CREDIT".to_string()),
                    field: FieldRef::new("Type", "@Type"),
                },
                Severity::Medium,
                "Verify all CREDIT codes should have the same Type",
            ),
            CheckDef::new(
                "holiday_credit_pay_code_timekeeping",
                Check::UniformGroup {
                    object_type: PayCode,
                    name_pattern: NamePattern::Contains("HOLIDAY CREDIT".to_string()),
                    field: FieldRef::new("Timekeeping Only", "@TimekeepingOnly"),
                },
                Severity::Medium,
                "Verify all HOLIDAY CREDIT codes have consistent timekeeping settings",
            ),
            CheckDef::new(
                "labor_day_scheduled_shift",
                Check::UniformGroup {
                    object_type: HolidayCreditRule,
                    name_pattern: NamePattern::Contains("LABOR".to_string()),
                    field: eligibility("Scheduled Shift Check", "@ScheduledShiftTypeSwitch"),
                },
                Severity::High,
                "All LABOR DAY rules should have consistent scheduled shift settings",
            ),
            CheckDef::new(
                "exempt_pair_scheduled_shift",
                Check::PairedSymmetry {
                    object_type: HolidayCreditRule,
                    left: "Exempt ".to_string(),
                    right: "Non Exempt ".to_string(),
                    at: MarkerPosition::Prefix,
                    fields: vec![eligibility("Scheduled Shift Check", "@ScheduledShiftTypeSwitch")],
                },
                Severity::Medium,
                "Exempt and Non Exempt variants of a holiday should gate on scheduled shifts the same way",
            ),
            CheckDef::new(
                "contributing_shift_holiday",
                Check::HolidayEcho {
                    object_type: ContributingShiftRule,
                    field: FieldRef::new("Contributing Pay Code Rule", "@ContributingPayCodeRuleName"),
                    holidays: aliases(HOLIDAY_ALIASES),
                },
                Severity::High,
                "Point the rule at the contributing pay code rule of its own holiday",
            ),
            CheckDef::new(
                "plus_30_date_pattern",
                Check::NameEcho {
                    object_type: BalanceCascade,
                    marker: "Plus 30".to_string(),
                    field: FieldRef::new("Date Pattern", "@DatePattern"),
                },
                Severity::High,
                "Use the matching 'Plus 30' date pattern",
            ),
            CheckDef::new(
                "annual_pattern_offset",
                Check::RequiredField {
                    object_type: DatePattern,
                    name_pattern: NamePattern::Contains("Annual".to_string()),
                    field: FieldRef::new("Offset Amount", "@OffsetAmount"),
                },
                Severity::Low,
                "Verify if an offset should be specified",
            ),
            CheckDef::new(
                "part_time_credit_rule",
                Check::VariantSelection {
                    object_type: HolidayProfile,
                    label: CREDIT_RULE_LABEL.to_string(),
                    population: "PT".to_string(),
                    variant: "PT".to_string(),
                    conflicting: Vec::new(),
                },
                Severity::High,
                "Use the PT variant of the credit rule for part-time profiles",
            ),
            CheckDef::new(
                "fte_60_credit_rule",
                Check::VariantSelection {
                    object_type: HolidayProfile,
                    label: CREDIT_RULE_LABEL.to_string(),
                    population: "PT 0.6".to_string(),
                    variant: "0.6".to_string(),
                    conflicting: vec!["0.4".to_string(), "PT 40".to_string()],
                },
                Severity::High,
                "Update to the credit rule matching the profile's FTE percentage",
            ),
        ];

        let before_after = vec![
            eligibility("Before Holiday", "@BeforeHolidaySwitch"),
            eligibility("After Holiday", "@AfterHolidaySwitch"),
        ];
        checks.push(CheckDef::new(
            "exempt_before_after_holiday",
            Check::ForbiddenValue {
                object_type: HolidayCreditRule,
                name_pattern: NamePattern::Prefix("Exempt ".to_string()),
                fields: before_after.clone(),
                values: vec!["true".to_string()],
            },
            Severity::Info,
            "Verify this is intentional for exempt employees",
        ));
        checks.push(CheckDef::new(
            "non_exempt_before_after_holiday",
            Check::UniformCondition {
                object_type: HolidayCreditRule,
                name_pattern: NamePattern::Prefix("Non Exempt ".to_string()),
                fields: before_after,
                values: vec!["false".to_string()],
            },
            Severity::Medium,
            "Verify FORFEITED rules intentionally skip eligibility",
        ));

        for (label, attribute) in [
            ("Type", "@Type"),
            ("Hours Per Day", "@HoursPerDay"),
            ("Manual Edit", "@ManualEdit"),
            ("Display", "@Display"),
        ] {
            checks.push(CheckDef::new(
                &format!("hol_accrual_code_{}", attribute.trim_start_matches('@').to_lowercase()),
                Check::UniformGroup {
                    object_type: AccrualCode,
                    name_pattern: NamePattern::Prefix("HOL-".to_string()),
                    field: FieldRef::new(label, attribute),
                },
                Severity::Medium,
                "Verify all HOL accrual codes should have the same settings",
            ));
        }

        CheckBattery::from_checks(checks)
    }
}

impl Default for CheckBattery {
    fn default() -> Self {
        Self::default_battery()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::references::resolve;
    use serde_json::{json, Value};

    fn object(config_type: ConfigType, fields: Value) -> ConfigObject {
        let map = fields.as_object().cloned().unwrap();
        let name = map["@Name"].as_str().unwrap().to_string();
        ConfigObject::new(config_type, &name, map)
    }

    fn credit_rule(name: &str, before: bool, after: bool, scheduled: bool) -> ConfigObject {
        object(
            ConfigType::HolidayCreditRule,
            json!({
                "@Name": name,
                "WSAEligibilityDeterminer": {"WSAEligibilityDeterminer": {
                    "@BeforeHolidaySwitch": before,
                    "@AfterHolidaySwitch": after,
                    "@ScheduledShiftTypeSwitch": scheduled
                }}
            }),
        )
    }

    fn profile(name: &str, rules: &[&str]) -> ConfigObject {
        let entries: Vec<Value> = rules
            .iter()
            .map(|r| json!({"@HolidayName": "Veterans Day", "@CreditRuleName": r}))
            .collect();
        object(
            ConfigType::HolidayProfile,
            json!({
                "@Name": name,
                "HolidayProfileDataSet": {"APIHolidayProfileDataSet": {"DataMembers": {
                    "APIHolidayProfileData": {"Entries": {"APIHolidayProfileDataEntry": entries}}
                }}}
            }),
        )
    }

    /// The standard holidays, each with three years of dates
    fn standard_holidays() -> Vec<ConfigObject> {
        [
            "Independence Day",
            "Labor Day",
            "MLK Day",
            "Memorial Day",
            "Presidents Day",
            "Veterans Day",
        ]
        .iter()
        .map(|name| {
            object(ConfigType::Holiday, json!({
                "@Name": name,
                "WSAHolidayDates": {"WSAHolidayDate": [
                    {"@StartDate": "2024-01-01"}, {"@StartDate": "2025-01-01"}, {"@StartDate": "2026-01-01"}
                ]}
            }))
        })
        .collect()
    }

    fn run_one(check: Check, objects: Vec<ConfigObject>) -> Vec<Anomaly> {
        let (catalog, _) = Catalog::from_objects(objects);
        let (graph, _) = resolve(&catalog);
        CheckDef::new("under_test", check, Severity::Medium, "").run(&catalog, &graph)
    }

    #[test]
    fn test_has_tokens() {
        assert!(has_tokens("Non Exempt PT", "PT"));
        assert!(has_tokens("Non Exempt PT 0.6", "PT 0.6"));
        assert!(!has_tokens("Non Exempt", "PT"));
        assert!(!has_tokens("EXEMPT", "PT"));
        assert!(!has_tokens("Anything", ""));
    }

    #[test]
    fn test_name_patterns() {
        assert!(NamePattern::Prefix("zz".into()).matches("zz TEST"));
        assert!(!NamePattern::Prefix("zz".into()).matches("ZZ TEST"));
        assert!(NamePattern::Contains("credit".into()).matches("HOLIDAY CREDIT"));
        assert!(NamePattern::Token("PT".into()).matches("Non Exempt PT"));
    }

    #[test]
    fn test_min_count_flags_short_holidays() {
        let anomalies = run_one(
            Check::MinCount {
                object_type: ConfigType::Holiday,
                field: FieldRef::new("dates", "WSAHolidayDates.WSAHolidayDate"),
                min: 3,
            },
            vec![
                object(ConfigType::Holiday, json!({
                    "@Name": "Labor Day",
                    "WSAHolidayDates": {"WSAHolidayDate": [{"@StartDate": "2024-09-02"}, {"@StartDate": "2025-09-01"}]}
                })),
                object(ConfigType::Holiday, json!({
                    "@Name": "Memorial Day",
                    "WSAHolidayDates": {"WSAHolidayDate": [{"@StartDate": "2024-05-27"}, {"@StartDate": "2025-05-26"}, {"@StartDate": "2026-05-25"}]}
                })),
            ],
        );

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].category, AnomalyCategory::IncompleteData);
        assert_eq!(anomalies[0].affected, vec!["Labor Day"]);
        assert!(anomalies[0].description.contains("has 2 dates"));
    }

    #[test]
    fn test_paired_symmetry_reports_diverging_pair() {
        let anomalies = run_one(
            Check::PairedSymmetry {
                object_type: ConfigType::HolidayCreditRule,
                left: "Exempt ".into(),
                right: "Non Exempt ".into(),
                at: MarkerPosition::Prefix,
                fields: vec![eligibility("Scheduled Shift Check", "@ScheduledShiftTypeSwitch")],
            },
            vec![
                credit_rule("Exempt LABOR DAY", false, false, true),
                credit_rule("Non Exempt LABOR DAY", true, true, false),
                credit_rule("Exempt MEMORIAL DAY", false, false, true),
                credit_rule("Non Exempt MEMORIAL DAY", true, true, true),
                credit_rule("Non Exempt JULY 4", true, true, false),
            ],
        );

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].category, AnomalyCategory::InconsistentSetting);
        assert_eq!(anomalies[0].affected, vec!["Exempt LABOR DAY", "Non Exempt LABOR DAY"]);
    }

    #[test]
    fn test_paired_symmetry_suffix_markers() {
        let anomalies = run_one(
            Check::PairedSymmetry {
                object_type: ConfigType::HolidayCreditRule,
                left: " FT".into(),
                right: " PT".into(),
                at: MarkerPosition::Suffix,
                fields: vec![eligibility("Before Holiday", "@BeforeHolidaySwitch")],
            },
            vec![
                credit_rule("Non Exempt FT", true, true, true),
                credit_rule("Non Exempt PT", false, true, true),
            ],
        );
        assert_eq!(anomalies.len(), 1);
    }

    #[test]
    fn test_uniform_group_lists_all_values() {
        let anomalies = run_one(
            Check::UniformGroup {
                object_type: ConfigType::HolidayCreditRule,
                name_pattern: NamePattern::Contains("LABOR".into()),
                field: eligibility("Scheduled Shift Check", "@ScheduledShiftTypeSwitch"),
            },
            vec![
                credit_rule("Exempt LABOR DAY", false, false, true),
                credit_rule("Non Exempt LABOR DAY", true, true, false),
                credit_rule("Non Exempt MEMORIAL DAY", true, true, false),
            ],
        );

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].affected.len(), 2);
        assert!(anomalies[0].description.contains("'false' (1)"));
        assert!(anomalies[0].description.contains("'true' (1)"));
    }

    #[test]
    fn test_uniform_group_silent_when_consistent() {
        let anomalies = run_one(
            Check::UniformGroup {
                object_type: ConfigType::HolidayCreditRule,
                name_pattern: NamePattern::Contains("LABOR".into()),
                field: eligibility("Scheduled Shift Check", "@ScheduledShiftTypeSwitch"),
            },
            vec![
                credit_rule("Exempt LABOR DAY", false, false, true),
                credit_rule("Non Exempt LABOR DAY", true, true, true),
            ],
        );
        assert!(anomalies.is_empty());
    }

    fn before_after() -> Vec<FieldRef> {
        vec![
            eligibility("Before Holiday", "@BeforeHolidaySwitch"),
            eligibility("After Holiday", "@AfterHolidaySwitch"),
        ]
    }

    #[test]
    fn test_forbidden_value() {
        let anomalies = run_one(
            Check::ForbiddenValue {
                object_type: ConfigType::HolidayCreditRule,
                name_pattern: NamePattern::Prefix("Exempt ".into()),
                fields: vec![eligibility("Before Holiday", "@BeforeHolidaySwitch")],
                values: vec!["true".into()],
            },
            vec![
                credit_rule("Exempt LABOR DAY", true, false, true),
                credit_rule("Exempt MEMORIAL DAY", false, false, true),
                credit_rule("Non Exempt LABOR DAY", true, true, true),
            ],
        );
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].affected, vec!["Exempt LABOR DAY"]);
    }

    #[test]
    fn test_forbidden_value_any_field_is_one_finding() {
        let anomalies = run_one(
            Check::ForbiddenValue {
                object_type: ConfigType::HolidayCreditRule,
                name_pattern: NamePattern::Prefix("Exempt ".into()),
                fields: before_after(),
                values: vec!["true".into()],
            },
            vec![
                credit_rule("Exempt LABOR DAY", true, true, true),
                credit_rule("Exempt MEMORIAL DAY", false, true, true),
                credit_rule("Exempt JULY 4", false, false, true),
            ],
        );
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].affected, vec!["Exempt LABOR DAY", "Exempt MEMORIAL DAY"]);
        assert!(anomalies[0].description.contains("Before Holiday/After Holiday"));
    }

    #[test]
    fn test_uniform_condition_ignores_single_switches() {
        let anomalies = run_one(
            Check::UniformCondition {
                object_type: ConfigType::HolidayCreditRule,
                name_pattern: NamePattern::Prefix("Non Exempt ".into()),
                fields: before_after(),
                values: vec!["false".into()],
            },
            vec![
                credit_rule("Non Exempt LABOR DAY", true, false, true),
                credit_rule("Non Exempt MEMORIAL DAY", false, true, true),
            ],
        );
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_uniform_condition_flags_partial_group() {
        let check = Check::UniformCondition {
            object_type: ConfigType::HolidayCreditRule,
            name_pattern: NamePattern::Prefix("Non Exempt ".into()),
            fields: before_after(),
            values: vec!["false".into()],
        };

        let anomalies = run_one(
            check.clone(),
            vec![
                credit_rule("Non Exempt LABOR DAY", true, true, true),
                credit_rule("Non Exempt FORFEITED", false, false, true),
            ],
        );
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].affected, vec!["Non Exempt FORFEITED"]);
        assert!(anomalies[0].description.starts_with("1 of 2"));

        // Every rule skips eligibility: consistent, nothing to report
        let anomalies = run_one(
            check,
            vec![
                credit_rule("Non Exempt LABOR DAY", false, false, true),
                credit_rule("Non Exempt FORFEITED", false, false, true),
            ],
        );
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_variant_selection_part_time_profile() {
        let anomalies = run_one(
            Check::VariantSelection {
                object_type: ConfigType::HolidayProfile,
                label: CREDIT_RULE_LABEL.into(),
                population: "PT".into(),
                variant: "PT".into(),
                conflicting: Vec::new(),
            },
            vec![
                profile("Non Exempt PT", &["Non Exempt PT", "Non Exempt", "Non Exempt"]),
                profile("Non Exempt FT", &["Non Exempt"]),
                credit_rule("Non Exempt", true, true, true),
                credit_rule("Non Exempt PT", true, true, true),
            ],
        );

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].category, AnomalyCategory::InconsistentSetting);
        assert_eq!(anomalies[0].affected, vec!["Non Exempt PT", "Non Exempt"]);
    }

    #[test]
    fn test_variant_selection_without_variant_is_silent() {
        let anomalies = run_one(
            Check::VariantSelection {
                object_type: ConfigType::HolidayProfile,
                label: CREDIT_RULE_LABEL.into(),
                population: "PT".into(),
                variant: "PT".into(),
                conflicting: Vec::new(),
            },
            vec![
                profile("Exempt PT", &["Exempt"]),
                credit_rule("Exempt", false, false, true),
            ],
        );
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_variant_selection_conflicting_fte() {
        let anomalies = run_one(
            Check::VariantSelection {
                object_type: ConfigType::HolidayProfile,
                label: CREDIT_RULE_LABEL.into(),
                population: "PT 0.6".into(),
                variant: "0.6".into(),
                conflicting: vec!["0.4".into()],
            },
            vec![
                profile("Non Exempt PT 0.6", &["Non Exempt PT 0.4", "Non Exempt PT 0.6"]),
                credit_rule("Non Exempt PT 0.4", true, true, true),
                credit_rule("Non Exempt PT 0.6", true, true, true),
            ],
        );
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].affected[1], "Non Exempt PT 0.4");
    }

    #[test]
    fn test_reserved_scope_referenced_placeholder() {
        let anomalies = run_one(
            Check::ReservedScope {
                object_types: Vec::new(),
                prefixes: vec!["zz".into()],
                contains: vec!["TEST".into()],
                flag_unreferenced: false,
            },
            vec![
                object(ConfigType::HolidayCreditRule, json!({
                    "@Name": "Non Exempt FORFEITED",
                    "WSACreditCalculator": {"WSACreditCalculator": {"@ContributingShiftName": "zz TEST HOL FORFEIT PENDING"}}
                })),
                object(ConfigType::HolidayCreditRule, json!({
                    "@Name": "zz old rule",
                    "WSACreditCalculator": {"WSACreditCalculator": {"@ContributingShiftName": "zz TEST HOL FORFEIT PENDING"}}
                })),
                object(ConfigType::ContributingShiftRule, json!({"@Name": "zz TEST HOL FORFEIT PENDING"})),
            ],
        );

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].category, AnomalyCategory::NamingMismatch);
        assert_eq!(
            anomalies[0].affected,
            vec!["zz TEST HOL FORFEIT PENDING", "Non Exempt FORFEITED"]
        );
    }

    #[test]
    fn test_reserved_scope_unreferenced_uses_check_severity() {
        let anomalies = run_one(
            Check::ReservedScope {
                object_types: Vec::new(),
                prefixes: vec!["zz".into()],
                contains: Vec::new(),
                flag_unreferenced: true,
            },
            vec![object(ConfigType::PayCode, json!({"@Name": "zzOLD HOL"}))],
        );
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].severity, Severity::Medium);
    }

    #[test]
    fn test_reserved_scope_contains_is_case_insensitive() {
        let anomalies = run_one(
            Check::ReservedScope {
                object_types: vec![ConfigType::HolidayCreditRule],
                prefixes: Vec::new(),
                contains: vec!["zz".into(), "TEST".into()],
                flag_unreferenced: true,
            },
            vec![
                credit_rule("HOL-Test Rule", false, false, true),
                credit_rule("Forfeit_TEST", false, false, true),
                credit_rule("Old ZZ Rule", false, false, true),
                credit_rule("Exempt LABOR DAY", false, false, true),
                // Out of scope type
                object(ConfigType::PayCode, json!({"@Name": "zz TEST CREDIT"})),
            ],
        );

        let names: Vec<&str> = anomalies.iter().map(|a| a.affected[0].as_str()).collect();
        assert_eq!(names, vec!["Forfeit_TEST", "HOL-Test Rule", "Old ZZ Rule"]);
    }

    #[test]
    fn test_name_presence() {
        let check = Check::NamePresence {
            object_type: ConfigType::Holiday,
            name_pattern: NamePattern::Prefix("ADVS".into()),
        };

        let anomalies = run_one(
            check.clone(),
            vec![
                object(ConfigType::Holiday, json!({"@Name": "ADVS Labor Day"})),
                object(ConfigType::Holiday, json!({"@Name": "ADVS Memorial Day"})),
                object(ConfigType::Holiday, json!({"@Name": "Labor Day"})),
            ],
        );
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].category, AnomalyCategory::NamingMismatch);
        assert_eq!(anomalies[0].affected, vec!["ADVS Labor Day", "ADVS Memorial Day"]);
        assert!(anomalies[0].description.starts_with("Found 2"));

        assert!(run_one(check, vec![object(ConfigType::Holiday, json!({"@Name": "Labor Day"}))]).is_empty());
    }

    #[test]
    fn test_name_echo() {
        let anomalies = run_one(
            Check::NameEcho {
                object_type: ConfigType::BalanceCascade,
                marker: "Plus 30".into(),
                field: FieldRef::new("Date Pattern", "@DatePattern"),
            },
            vec![
                object(ConfigType::BalanceCascade, json!({
                    "@Name": "HOL-Thanksgiving Plus 30 Payout",
                    "@DatePattern": "HOL-Thanksgiving Day Annual"
                })),
                object(ConfigType::BalanceCascade, json!({
                    "@Name": "HOL-Labor Plus 30 Payout",
                    "@DatePattern": "HOL-Labor Day Plus 30 Annual"
                })),
            ],
        );
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].affected, vec!["HOL-Thanksgiving Plus 30 Payout"]);
    }

    #[test]
    fn test_holiday_echo_wrong_holiday() {
        let anomalies = run_one(
            Check::HolidayEcho {
                object_type: ConfigType::ContributingShiftRule,
                field: FieldRef::new("Contributing Pay Code Rule", "@ContributingPayCodeRuleName"),
                holidays: aliases(HOLIDAY_ALIASES),
            },
            vec![
                object(ConfigType::ContributingShiftRule, json!({
                    "@Name": "FORFEIT PRESIDENTS DAY",
                    "@ContributingPayCodeRuleName": "H-FORFEIT PENDING MLK"
                })),
                object(ConfigType::ContributingShiftRule, json!({
                    "@Name": "FORFEIT MLK DAY",
                    "@ContributingPayCodeRuleName": "H-FORFEIT PENDING MARTIN LUTHER KING"
                })),
                object(ConfigType::ContributingShiftRule, json!({
                    "@Name": "FORFEIT LABOR DAY",
                    "@ContributingPayCodeRuleName": "H-FORFEIT PENDING"
                })),
            ],
        );
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].affected[0], "FORFEIT PRESIDENTS DAY");
    }

    #[test]
    fn test_required_field() {
        let anomalies = run_one(
            Check::RequiredField {
                object_type: ConfigType::DatePattern,
                name_pattern: NamePattern::Contains("Annual".into()),
                field: FieldRef::new("Offset Amount", "@OffsetAmount"),
            },
            vec![
                object(ConfigType::DatePattern, json!({"@Name": "HOL-Labor Annual"})),
                object(ConfigType::DatePattern, json!({"@Name": "HOL-MLK Annual", "@OffsetAmount": 30})),
                object(ConfigType::DatePattern, json!({"@Name": "Weekly"})),
            ],
        );
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].affected, vec!["HOL-Labor Annual"]);
    }

    #[test]
    fn test_coverage() {
        let check = Check::Coverage {
            object_type: ConfigType::Holiday,
            expected: aliases(&[&["Labor Day"], &["Martin Luther King", "MLK"]]),
            exclude_prefix: Some("ADVS".into()),
        };

        let anomalies = run_one(
            check.clone(),
            vec![
                object(ConfigType::Holiday, json!({"@Name": "MLK Day"})),
                object(ConfigType::Holiday, json!({"@Name": "ADVS Labor Day"})),
            ],
        );
        assert_eq!(anomalies.len(), 1);
        assert!(anomalies[0].description.contains("missing Labor Day"));

        // Type not exported at all: nothing to judge
        assert!(run_one(check, vec![]).is_empty());
    }

    #[test]
    fn test_battery_from_json() {
        let json = r#"[
            {"id": "min_dates", "kind": "min_count", "object_type": "WSAHoliday",
             "field": {"label": "dates", "path": "WSAHolidayDates.WSAHolidayDate"}, "min": 3,
             "severity": "Warning"},
            {"id": "scope", "kind": "reserved_scope", "prefixes": ["zz"]},
            {"id": "group", "kind": "uniform_group", "object_type": "WSAPayCode",
             "name_pattern": {"contains": "CREDIT"}, "field": {"label": "Type", "path": "@Type"}}
        ]"#;

        let checks: Vec<CheckDef> = serde_json::from_str(json).unwrap();
        let battery = CheckBattery::from_checks(checks);

        assert_eq!(battery.len(), 3);
        assert_eq!(battery.checks()[0].severity, Severity::Warning);
        assert_eq!(battery.checks()[1].severity, Severity::Medium);
        assert!(matches!(
            battery.checks()[1].check,
            Check::ReservedScope { flag_unreferenced: false, .. }
        ));
        assert!(matches!(
            &battery.checks()[2].check,
            Check::UniformGroup { name_pattern: NamePattern::Contains(s), .. } if s == "CREDIT"
        ));
    }

    #[test]
    fn test_battery_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("checks.json");
        fs::write(
            &path,
            r#"[{"id": "offset", "kind": "required_field", "object_type": "WSADatePattern",
                "name_pattern": {"token": "Annual"}, "field": {"label": "Offset", "path": "@OffsetAmount"}}]"#,
        )
        .unwrap();

        let battery = CheckBattery::from_file(&path).unwrap();
        assert_eq!(battery.len(), 1);

        fs::write(&path, "not json").unwrap();
        assert!(CheckBattery::from_file(&path).is_err());
    }

    #[test]
    fn test_default_battery_ids_are_unique() {
        let battery = CheckBattery::default_battery();
        let ids: BTreeSet<&str> = battery.checks().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), battery.len());
        assert!(!battery.is_empty());
    }

    #[test]
    fn test_default_battery_part_time_scenario() {
        let mut objects = standard_holidays();
        objects.extend([
            profile("Non Exempt PT", &["Non Exempt"]),
            credit_rule("Non Exempt", true, true, true),
            credit_rule("Non Exempt PT", true, true, true),
        ]);
        let (catalog, _) = Catalog::from_objects(objects);
        let (graph, unresolved) = resolve(&catalog);
        assert!(unresolved.is_empty());

        let anomalies = CheckBattery::default_battery().run(&catalog, &graph);

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].category, AnomalyCategory::InconsistentSetting);
        assert_eq!(anomalies[0].affected, vec!["Non Exempt PT", "Non Exempt"]);
    }

    #[test]
    fn test_default_battery_eligibility_findings() {
        let mut objects = standard_holidays();
        objects.extend([
            credit_rule("Exempt LABOR DAY", true, true, true),
            credit_rule("Non Exempt LABOR DAY", true, false, true),
            credit_rule("Non Exempt MEMORIAL DAY", false, true, true),
            credit_rule("Exempt MEMORIAL DAY", false, false, true),
        ]);
        let (catalog, _) = Catalog::from_objects(objects);
        let (graph, unresolved) = resolve(&catalog);
        assert!(unresolved.is_empty());

        let anomalies = CheckBattery::default_battery().run(&catalog, &graph);

        // Exempt with both switches on is a single finding; mixed single
        // switches among Non Exempt rules are not a finding at all
        assert_eq!(anomalies.len(), 1, "{:#?}", anomalies);
        assert_eq!(anomalies[0].severity, Severity::Info);
        assert_eq!(anomalies[0].affected, vec!["Exempt LABOR DAY"]);
    }

    #[test]
    fn test_default_battery_reports_advs_holidays() {
        let mut objects = standard_holidays();
        objects.push(object(ConfigType::Holiday, json!({
            "@Name": "ADVS Labor Day",
            "WSAHolidayDates": {"WSAHolidayDate": [
                {"@StartDate": "2024-09-02"}, {"@StartDate": "2025-09-01"}, {"@StartDate": "2026-09-07"}
            ]}
        })));
        let (catalog, _) = Catalog::from_objects(objects);
        let (graph, _) = resolve(&catalog);

        let anomalies = CheckBattery::default_battery().run(&catalog, &graph);

        assert_eq!(anomalies.len(), 1, "{:#?}", anomalies);
        assert_eq!(anomalies[0].severity, Severity::Info);
        assert_eq!(anomalies[0].affected, vec!["ADVS Labor Day"]);
    }
}
