// 🧩 ConfigObject - one exported record, fields kept as a generic map
//
// Export shapes vary per type (and a one-element list is often exported as a
// bare object), so nothing is validated upfront. Checks and sheets read fields
// through dotted paths and the accessors below, at the point they need them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::object_types::ConfigType;

// ============================================================================
// CONFIG OBJECT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigObject {
    pub config_type: ConfigType,

    /// Trimmed name, unique within `config_type` once in the catalog
    pub name: String,

    /// Raw attribute map as exported (`@Name`, nested containers, ...)
    pub fields: Map<String, Value>,
}

impl ConfigObject {
    pub fn new(config_type: ConfigType, name: &str, fields: Map<String, Value>) -> Self {
        ConfigObject {
            config_type,
            name: name.trim().to_string(),
            fields,
        }
    }

    /// Every value reachable through a dotted path
    ///
    /// Arrays are fanned out at each step and at the end, so
    /// `Entries.APIHolidayProfileDataEntry.@CreditRuleName` yields one value
    /// per entry whether the export holds a list or a single object.
    pub fn values_at(&self, path: &str) -> Vec<&Value> {
        let mut steps = path.split('.');
        let first = match steps.next() {
            Some(step) if !step.is_empty() => step,
            _ => return Vec::new(),
        };

        let mut current: Vec<&Value> = self.fields.get(first).into_iter().collect();

        for step in steps {
            current = flatten(current)
                .into_iter()
                .filter_map(|v| v.get(step))
                .collect();
        }

        flatten(current)
            .into_iter()
            .filter(|v| !v.is_null())
            .collect()
    }

    /// First non-empty rendering of the value(s) at `path`, or ""
    pub fn text(&self, path: &str) -> String {
        self.values_at(path)
            .into_iter()
            .map(render_scalar)
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    }

    /// All non-empty renderings at `path`, in export order
    pub fn texts(&self, path: &str) -> Vec<String> {
        self.values_at(path)
            .into_iter()
            .map(render_scalar)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Number of entries at `path` (a single object counts as one)
    pub fn count(&self, path: &str) -> usize {
        self.values_at(path)
            .into_iter()
            .filter(|v| !matches!(v, Value::String(s) if s.trim().is_empty()))
            .count()
    }

    /// Boolean switch; accepts JSON booleans and "true"/"false" strings
    pub fn flag(&self, path: &str) -> Option<bool> {
        match self.text(path).to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// Parsed dates at `path`, ignoring values that don't parse
    pub fn dates(&self, path: &str) -> Vec<NaiveDate> {
        self.texts(path)
            .iter()
            .filter_map(|s| parse_export_date(s))
            .collect()
    }
}

fn flatten(values: Vec<&Value>) -> Vec<&Value> {
    let mut out = Vec::with_capacity(values.len());
    for v in values {
        match v {
            Value::Array(items) => out.extend(items.iter()),
            other => out.push(other),
        }
    }
    out
}

// ============================================================================
// RENDERING
// ============================================================================

/// Render a field value as cell text
///
/// Objects render as their `@Name` or `@Value` attribute, which is how the
/// export wraps named pointers (`SimpleValue`, `AccrualPolicyName`, ...).
pub fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        Value::Object(map) => map
            .get("@Name")
            .or_else(|| map.get("@Value"))
            .map(render_scalar)
            .unwrap_or_default(),
        Value::Array(items) => items
            .iter()
            .map(render_scalar)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Dates appear as ISO dates, US dates or ISO timestamps depending on the export
pub fn parse_export_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date())
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(fields: Value) -> ConfigObject {
        let map = fields.as_object().cloned().unwrap_or_default();
        let name = map
            .get("@Name")
            .and_then(|v| v.as_str())
            .unwrap_or("unnamed")
            .to_string();
        ConfigObject::new(ConfigType::HolidayProfile, &name, map)
    }

    #[test]
    fn test_name_is_trimmed() {
        let obj = ConfigObject::new(ConfigType::PayCode, "  HOLIDAY CREDIT \t", Map::new());
        assert_eq!(obj.name, "HOLIDAY CREDIT");
    }

    #[test]
    fn test_values_at_fans_out_over_lists() {
        let obj = object(json!({
            "@Name": "Non Exempt PT",
            "Entries": {"APIHolidayProfileDataEntry": [
                {"@HolidayName": "Labor Day", "@CreditRuleName": "Non Exempt PT"},
                {"@HolidayName": "Veterans Day", "@CreditRuleName": "Non Exempt"}
            ]}
        }));

        assert_eq!(
            obj.texts("Entries.APIHolidayProfileDataEntry.@CreditRuleName"),
            vec!["Non Exempt PT", "Non Exempt"]
        );
        assert_eq!(obj.count("Entries.APIHolidayProfileDataEntry"), 2);
    }

    #[test]
    fn test_single_object_counts_as_one_entry() {
        let obj = object(json!({
            "@Name": "Solo",
            "Entries": {"APIHolidayProfileDataEntry": {"@HolidayName": "Labor Day"}}
        }));

        assert_eq!(obj.count("Entries.APIHolidayProfileDataEntry"), 1);
        assert_eq!(obj.text("Entries.APIHolidayProfileDataEntry.@HolidayName"), "Labor Day");
    }

    #[test]
    fn test_missing_path_is_empty() {
        let obj = object(json!({"@Name": "x", "Entries": ""}));
        assert_eq!(obj.text("Entries.APIHolidayProfileDataEntry"), "");
        assert_eq!(obj.count("Entries.APIHolidayProfileDataEntry"), 0);
        assert_eq!(obj.count("Nope"), 0);
        assert!(obj.values_at("").is_empty());
    }

    #[test]
    fn test_render_scalar_shapes() {
        assert_eq!(render_scalar(&json!(true)), "true");
        assert_eq!(render_scalar(&json!(8.5)), "8.5");
        assert_eq!(render_scalar(&json!(" HOL-FLOAT ")), "HOL-FLOAT");
        assert_eq!(render_scalar(&json!({"@Value": "HOLIDAY CREDIT"})), "HOLIDAY CREDIT");
        assert_eq!(render_scalar(&json!({"@Name": "Policy A"})), "Policy A");
        assert_eq!(
            render_scalar(&json!([{"@Value": "A"}, {"@Value": "B"}])),
            "A, B"
        );
        assert_eq!(render_scalar(&Value::Null), "");
    }

    #[test]
    fn test_simple_value_pointers_render_through_path() {
        let obj = object(json!({
            "@Name": "rule",
            "CreditPayCodeNames": {"SimpleValue": [{"@Value": "HOL CREDIT"}, {"@Value": "HOL OT"}]}
        }));
        assert_eq!(obj.texts("CreditPayCodeNames.SimpleValue"), vec!["HOL CREDIT", "HOL OT"]);
    }

    #[test]
    fn test_flag_accepts_strings_and_bools() {
        let obj = object(json!({"@Name": "x", "@A": true, "@B": "false", "@C": "maybe"}));
        assert_eq!(obj.flag("@A"), Some(true));
        assert_eq!(obj.flag("@B"), Some(false));
        assert_eq!(obj.flag("@C"), None);
        assert_eq!(obj.flag("@D"), None);
    }

    #[test]
    fn test_parse_export_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        assert_eq!(parse_export_date("2025-07-04"), Some(expected));
        assert_eq!(parse_export_date("07/04/2025"), Some(expected));
        assert_eq!(parse_export_date("2025-07-04T00:00:00"), Some(expected));
        assert_eq!(parse_export_date("July 4th"), None);
    }
}
