// 📚 Catalog - type -> name -> ConfigObject
//
// Built once from the loaded exports, read-only afterwards. Duplicate names
// are reported and the later occurrence wins, so every name maps to exactly
// one object.

use std::collections::BTreeMap;

use crate::anomalies::{Anomaly, AnomalyCategory, Severity};
use crate::object::ConfigObject;
use crate::object_types::ConfigType;
use crate::parser::LoadedExports;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    objects: BTreeMap<ConfigType, BTreeMap<String, ConfigObject>>,
    digests: BTreeMap<ConfigType, String>,
}

impl Catalog {
    /// Build the catalog and report duplicate names
    pub fn build(loaded: LoadedExports) -> (Catalog, Vec<Anomaly>) {
        let mut catalog = Catalog {
            objects: BTreeMap::new(),
            digests: loaded.digests,
        };
        let mut anomalies = Vec::new();

        for (config_type, objects) in loaded.objects {
            let by_name = catalog.objects.entry(config_type).or_default();
            let mut seen: BTreeMap<String, usize> = BTreeMap::new();

            for object in objects {
                let occurrence = seen.entry(object.name.clone()).or_insert(0);
                *occurrence += 1;

                if *occurrence > 1 {
                    anomalies.push(
                        Anomaly::new(
                            AnomalyCategory::NamingMismatch,
                            Severity::Medium,
                            Some(config_type),
                            vec![object.name.clone()],
                            format!(
                                "Duplicate {} name '{}' (occurrence {}); the later definition is documented",
                                config_type, object.name, occurrence
                            ),
                        )
                        .with_recommendation("Remove or rename the duplicate before re-importing"),
                    );
                }

                by_name.insert(object.name.clone(), object);
            }
        }

        tracing::info!(
            types = catalog.objects.len(),
            objects = catalog.len(),
            duplicates = anomalies.len(),
            "catalog built"
        );

        (catalog, anomalies)
    }

    /// Build directly from objects (no digests); handy for tests and tools
    pub fn from_objects(objects: Vec<ConfigObject>) -> (Catalog, Vec<Anomaly>) {
        let mut loaded = LoadedExports::default();
        for object in objects {
            loaded
                .objects
                .entry(object.config_type)
                .or_default()
                .push(object);
        }
        Catalog::build(loaded)
    }

    pub fn get(&self, config_type: ConfigType, name: &str) -> Option<&ConfigObject> {
        self.objects.get(&config_type)?.get(name.trim())
    }

    pub fn contains(&self, config_type: ConfigType, name: &str) -> bool {
        self.get(config_type, name).is_some()
    }

    /// Whether the export for this type was loaded (it may still be empty)
    pub fn has_type(&self, config_type: ConfigType) -> bool {
        self.objects.contains_key(&config_type)
    }

    /// Objects of one type in name order
    pub fn objects_of(&self, config_type: ConfigType) -> impl Iterator<Item = &ConfigObject> {
        self.objects
            .get(&config_type)
            .into_iter()
            .flat_map(|m| m.values())
    }

    /// Every object, by type then name
    pub fn iter(&self) -> impl Iterator<Item = &ConfigObject> {
        self.objects.values().flat_map(|m| m.values())
    }

    pub fn loaded_types(&self) -> impl Iterator<Item = ConfigType> + '_ {
        self.objects.keys().copied()
    }

    pub fn count(&self, config_type: ConfigType) -> usize {
        self.objects.get(&config_type).map(BTreeMap::len).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.objects.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn digest(&self, config_type: ConfigType) -> Option<&str> {
        self.digests.get(&config_type).map(String::as_str)
    }
}
