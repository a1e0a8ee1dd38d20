// 🏗️ Export Parser - discovers export folders and turns them into ConfigObjects
//
// Layout (fixed by the export tool):
//   <root>/<FolderName>/response.json
//   { "itemsRetrieveResponses": [
//       { "itemDataInfo": { "title": ".." },
//         "responseObjectNode": { "<ObjectKey>": { "@Name": "..", ... } } } ] }

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::anomalies::{Anomaly, AnomalyCategory, Severity};
use crate::error::{DocgenError, LoadError};
use crate::object::ConfigObject;
use crate::object_types::ConfigType;

pub const EXPORT_FILE_NAME: &str = "response.json";

// ============================================================================
// PARSER TRAIT
// ============================================================================

/// ExportParser - turns one export file into ConfigObjects
///
/// The built-in parser handles the `itemsRetrieveResponses` envelope shared by
/// every type; a different envelope only needs another implementation.
pub trait ExportParser {
    fn parse(&self, file_path: &Path) -> Result<ParsedExport, LoadError>;

    fn config_type(&self) -> ConfigType;
}

/// Output of one parse: objects in export order plus anything skipped
#[derive(Debug, Clone, Default)]
pub struct ParsedExport {
    pub objects: Vec<ConfigObject>,
    pub digest: String,
    pub anomalies: Vec<Anomaly>,
}

pub struct ItemsResponseParser {
    config_type: ConfigType,
}

impl ItemsResponseParser {
    pub fn new(config_type: ConfigType) -> Self {
        ItemsResponseParser { config_type }
    }

    /// Parse an already-read export document
    pub fn parse_value(&self, json: &Value) -> ParsedExport {
        let mut parsed = ParsedExport::default();
        let key = self.config_type.object_key();

        let responses = json
            .get("itemsRetrieveResponses")
            .map(as_list)
            .unwrap_or_default();

        for (idx, response) in responses.into_iter().enumerate() {
            let node = match response
                .get("responseObjectNode")
                .and_then(|n| n.get(key))
                .and_then(|n| n.as_object())
            {
                Some(node) if !node.is_empty() => node,
                _ => continue,
            };

            let title = response
                .get("itemDataInfo")
                .and_then(|i| i.get("title"))
                .and_then(|t| t.as_str())
                .unwrap_or("");

            // @Name first, export title as fallback
            let name = node
                .get("@Name")
                .and_then(|n| n.as_str())
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| title.trim());

            if name.is_empty() {
                parsed.anomalies.push(
                    Anomaly::new(
                        AnomalyCategory::IncompleteData,
                        Severity::Medium,
                        Some(self.config_type),
                        vec![format!("{} item #{}", self.config_type, idx + 1)],
                        format!(
                            "{} item #{} has neither @Name nor a title and was skipped",
                            self.config_type,
                            idx + 1
                        ),
                    )
                    .with_recommendation("Re-export the object with its name populated"),
                );
                continue;
            }

            parsed
                .objects
                .push(ConfigObject::new(self.config_type, name, node.clone()));
        }

        parsed
    }
}

impl ExportParser for ItemsResponseParser {
    fn parse(&self, file_path: &Path) -> Result<ParsedExport, LoadError> {
        let bytes = fs::read(file_path).map_err(|source| LoadError::Io {
            path: file_path.to_path_buf(),
            source,
        })?;

        let json: Value =
            serde_json::from_slice(&bytes).map_err(|source| LoadError::InvalidExport {
                path: file_path.to_path_buf(),
                source,
            })?;

        let mut parsed = self.parse_value(&json);
        parsed.digest = format!("{:x}", Sha256::digest(&bytes));
        Ok(parsed)
    }

    fn config_type(&self) -> ConfigType {
        self.config_type
    }
}

/// The export writes a one-element list as a bare object
fn as_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// Get the parser for a config type
pub fn get_parser(config_type: ConfigType) -> Box<dyn ExportParser> {
    Box::new(ItemsResponseParser::new(config_type))
}

/// Detect the config type of an export folder by its name
pub fn detect_type(folder: &Path) -> Option<ConfigType> {
    folder
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(ConfigType::from_folder)
}

// ============================================================================
// LOADER
// ============================================================================

/// Everything read from the input root, before the catalog is built
#[derive(Debug, Clone, Default)]
pub struct LoadedExports {
    /// Objects per loaded type, in export order (duplicates still present)
    pub objects: BTreeMap<ConfigType, Vec<ConfigObject>>,

    /// SHA-256 of each loaded export file
    pub digests: BTreeMap<ConfigType, String>,

    /// Recorded load problems
    pub anomalies: Vec<Anomaly>,
}

impl LoadedExports {
    pub fn object_count(&self) -> usize {
        self.objects.values().map(Vec::len).sum()
    }
}

/// Load every recognized export folder under `root`
///
/// Unrecognized folders are ignored. A recognized folder without its export
/// file is recorded as an anomaly; an unreadable root or a malformed export
/// aborts the run.
pub fn load_exports(root: &Path) -> Result<LoadedExports, DocgenError> {
    let entries = fs::read_dir(root).map_err(|e| DocgenError::InputRoot {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut folders: BTreeMap<ConfigType, PathBuf> = BTreeMap::new();
    for entry in entries {
        let entry = entry.map_err(|e| DocgenError::InputRoot {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        match detect_type(&path) {
            Some(config_type) => {
                folders.insert(config_type, path);
            }
            None => tracing::trace!(folder = %path.display(), "ignoring unrecognized folder"),
        }
    }

    let mut loaded = LoadedExports::default();

    for config_type in ConfigType::ALL {
        let Some(folder) = folders.get(&config_type) else {
            tracing::debug!(%config_type, "no export folder");
            continue;
        };

        let export_path = folder.join(EXPORT_FILE_NAME);
        match load_one(config_type, &export_path) {
            Ok(parsed) => {
                tracing::debug!(%config_type, objects = parsed.objects.len(), "parsed export");
                loaded.digests.insert(config_type, parsed.digest);
                loaded.anomalies.extend(parsed.anomalies);
                loaded.objects.insert(config_type, parsed.objects);
            }
            Err(err) if err.is_recordable() => {
                tracing::warn!(%config_type, "{}", err);
                loaded.anomalies.push(
                    Anomaly::new(
                        AnomalyCategory::IncompleteData,
                        Severity::High,
                        Some(config_type),
                        vec![config_type.folder_name().to_string()],
                        err.to_string(),
                    )
                    .with_recommendation(format!(
                        "Re-export {} so the folder contains {}",
                        config_type, EXPORT_FILE_NAME
                    )),
                );
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(loaded)
}

fn load_one(config_type: ConfigType, export_path: &Path) -> Result<ParsedExport, LoadError> {
    if !export_path.is_file() {
        return Err(LoadError::MissingExport {
            config_type,
            path: export_path.to_path_buf(),
        });
    }
    get_parser(config_type).parse(export_path)
}

// ============================================================================
// TESTS
// ============================================================================
