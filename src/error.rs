//! Error types for the address change pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Every way a run can end without a confirmed address change.
#[derive(Debug, Error)]
pub enum MacError {
    /// Process is not running with root privileges
    #[error("Root permission is required")]
    Privilege,

    /// Invalid invocation or unusable candidate source
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid file: {}", .0.display())]
    InvalidFile(PathBuf),

    #[error("No candidate addresses in {}", .0.display())]
    EmptyCandidates(PathBuf),

    /// Resolved address failed the syntax check
    #[error("Invalid MAC address: {0}")]
    Validation(String),

    /// A state-changing command exited unsuccessfully
    #[error("Error changing MAC address: {0}")]
    CommandFailure(String),

    #[error("MAC change failed. Current MAC: {}", .observed.as_deref().unwrap_or("None"))]
    VerificationMismatch {
        expected: String,
        observed: Option<String>,
    },
}

pub type MacResult<T> = Result<T, MacError>;

impl MacError {
    pub fn exit_code(&self) -> u8 {
        match self {
            MacError::Privilege => 1,
            MacError::Configuration(_)
            | MacError::FileNotFound(_)
            | MacError::InvalidFile(_)
            | MacError::EmptyCandidates(_) => 2,
            MacError::Validation(_) => 3,
            MacError::CommandFailure(_) => 4,
            MacError::VerificationMismatch { .. } => 5,
        }
    }
}
