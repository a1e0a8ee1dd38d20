// ❗ Error types - two tiers
// Fatal problems abort the run with an exit code; everything else becomes an Anomaly.

use std::path::PathBuf;
use thiserror::Error;

use crate::object_types::ConfigType;

// ============================================================================
// EXIT CODES
// ============================================================================

/// Generation finished (anomalies may still have been found)
pub const EXIT_SUCCESS: i32 = 0;

/// Input root, an export file or the checks file could not be read
pub const EXIT_INPUT_FAILURE: i32 = 1;

/// The workbook could not be written
pub const EXIT_OUTPUT_FAILURE: i32 = 2;

// ============================================================================
// LOAD ERROR (per export)
// ============================================================================

#[derive(Error, Debug)]
pub enum LoadError {
    /// Folder exists but has no export file. Recorded, not fatal.
    #[error("{config_type} folder has no export file at {}", path.display())]
    MissingExport { config_type: ConfigType, path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", path.display())]
    InvalidExport {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Only a missing export file is survivable
    pub fn is_recordable(&self) -> bool {
        matches!(self, LoadError::MissingExport { .. })
    }
}

// ============================================================================
// RUN ERROR
// ============================================================================

#[derive(Error, Debug)]
pub enum DocgenError {
    #[error("input root {} is not readable: {reason}", path.display())]
    InputRoot { path: PathBuf, reason: String },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("checks file {} could not be loaded: {reason}", path.display())]
    Checks { path: PathBuf, reason: String },

    #[error("failed to write workbook {}: {source:#}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl DocgenError {
    pub fn exit_code(&self) -> i32 {
        match self {
            DocgenError::InputRoot { .. } => EXIT_INPUT_FAILURE,
            DocgenError::Load(_) => EXIT_INPUT_FAILURE,
            DocgenError::Checks { .. } => EXIT_INPUT_FAILURE,
            DocgenError::Output { .. } => EXIT_OUTPUT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocgenError>;
