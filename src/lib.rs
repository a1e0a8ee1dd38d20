// Holiday Credit Documentation Generator - Core Library
// Load → Catalog → Resolve → Check → Report → Write, plus the workbook viewer

pub mod error;
pub mod object_types;
pub mod object;
pub mod anomalies;
pub mod parser;        // Export discovery + envelope parsing
pub mod catalog;
pub mod references;    // Cross-references, cycles, dependency tree
pub mod checks;        // Declarative consistency checks
pub mod sheets;
pub mod report;
pub mod workbook;      // SQLite / CSV sinks
pub mod generator;
pub mod logging;

#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use error::{
    DocgenError, LoadError, Result,
    EXIT_SUCCESS, EXIT_INPUT_FAILURE, EXIT_OUTPUT_FAILURE,
};
pub use object_types::ConfigType;
pub use object::ConfigObject;
pub use anomalies::{Anomaly, AnomalyCategory, Severity};
pub use parser::{
    ExportParser, ItemsResponseParser, LoadedExports,
    detect_type, get_parser, load_exports,
};
pub use catalog::Catalog;
pub use references::{
    Edge, NodeId, ReferenceGraph, ReferenceSpec, TreeRow,
    resolve, REFERENCE_SPECS,
};
pub use checks::{Check, CheckBattery, CheckDef, NamePattern};
pub use report::{Report, Sheet};
pub use workbook::{
    CsvWorkbook, SqliteWorkbook, WorkbookSink,
    read_sqlite, sink_for,
};
pub use generator::{analyze, generate, Analysis, GeneratorConfig, RunOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
