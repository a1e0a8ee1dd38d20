// ⚙️ Generator - Load → Catalog → Resolve → Check → Report → Write
//
// One synchronous pass. Each stage consumes the previous stage's output and
// nothing is mutated after the catalog is built.

use std::path::{Path, PathBuf};

use crate::anomalies::{sort_anomalies, Anomaly};
use crate::catalog::Catalog;
use crate::checks::CheckBattery;
use crate::error::{DocgenError, Result};
use crate::parser::load_exports;
use crate::references::resolve;
use crate::report::{build_report, Report};
use crate::workbook::{sink_for, DEFAULT_OUTPUT};

pub const DEFAULT_INPUT_ROOT: &str = "fullHOLSolution";

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub input_root: PathBuf,
    pub output: PathBuf,
    pub battery: CheckBattery,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig::new(DEFAULT_INPUT_ROOT, DEFAULT_OUTPUT)
    }
}

impl GeneratorConfig {
    pub fn new(input_root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        GeneratorConfig {
            input_root: input_root.into(),
            output: output.into(),
            battery: CheckBattery::default_battery(),
        }
    }

    /// Builder pattern: replace the default battery with one read from JSON
    pub fn with_checks_file(mut self, path: &Path) -> Result<Self> {
        self.battery = CheckBattery::from_file(path).map_err(|e| DocgenError::Checks {
            path: path.to_path_buf(),
            reason: format!("{:#}", e),
        })?;
        Ok(self)
    }

    pub fn with_battery(mut self, battery: CheckBattery) -> Self {
        self.battery = battery;
        self
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Everything computed for one input root
#[derive(Debug, Clone)]
pub struct Analysis {
    pub catalog: Catalog,
    /// Sorted by category, then first affected name
    pub anomalies: Vec<Anomaly>,
    pub report: Report,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub analysis: Analysis,
    pub output: PathBuf,
    pub format: &'static str,
}

/// Run every stage except writing
pub fn analyze(config: &GeneratorConfig) -> Result<Analysis> {
    tracing::info!(input = %config.input_root.display(), "loading exports");
    let loaded = load_exports(&config.input_root)?;
    tracing::info!(
        types = loaded.objects.len(),
        objects = loaded.object_count(),
        recorded = loaded.anomalies.len(),
        "exports loaded"
    );

    let mut anomalies = loaded.anomalies.clone();
    let (catalog, duplicates) = Catalog::build(loaded);
    anomalies.extend(duplicates);

    let (graph, unresolved) = resolve(&catalog);
    anomalies.extend(unresolved);

    anomalies.extend(config.battery.run(&catalog, &graph));
    sort_anomalies(&mut anomalies);

    let source = config.input_root.display().to_string();
    let report = build_report(&catalog, &graph, &anomalies, &source);

    Ok(Analysis {
        catalog,
        anomalies,
        report,
    })
}

/// Analyze and write the workbook
pub fn generate(config: &GeneratorConfig) -> Result<RunOutcome> {
    let analysis = analyze(config)?;

    let sink = sink_for(&config.output);
    sink.write(&analysis.report)
        .map_err(|source| DocgenError::Output {
            path: config.output.clone(),
            source,
        })?;

    tracing::info!(
        output = %sink.path().display(),
        format = sink.format_name(),
        sheets = analysis.report.len(),
        anomalies = analysis.anomalies.len(),
        "workbook written"
    );

    Ok(RunOutcome {
        analysis,
        output: config.output.clone(),
        format: sink.format_name(),
    })
}
