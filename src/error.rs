// Error handling module
// Defines the failure taxonomy shared by the backend client, storage and controller

use thiserror::Error;

/// Errors that can occur while talking to the backend or the local store
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Network or transport failure (connect, timeout, broken body)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend answered with a status the operation does not accept
    #[error("Backend error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Local hidden-id store could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DashboardError {
    /// Short machine-friendly label used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::Transport(_) => "transport",
            DashboardError::Status { .. } => "status",
            DashboardError::Decode(_) => "decode",
            DashboardError::Storage(_) => "storage",
            DashboardError::Internal(_) => "internal",
        }
    }
}

impl From<rusqlite::Error> for DashboardError {
    fn from(err: rusqlite::Error) -> Self {
        DashboardError::Storage(err.to_string())
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
