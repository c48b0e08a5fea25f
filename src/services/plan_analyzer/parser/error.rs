//! Error types for showplan loading

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that stop an analysis before any report is produced.
///
/// Absent attributes and absent nested elements are not errors; the
/// accessor substitutes typed defaults for those.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("File '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing XML file '{}': {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
}

impl PlanError {
    /// Short tag for the failure kind, used in log events
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::NotFound(_) => "input-not-found",
            PlanError::Io { .. } => "io",
            PlanError::Malformed { .. } => "malformed-document",
        }
    }
}

/// Result type alias for plan loading operations
pub type PlanResult<T> = Result<T, PlanError>;
