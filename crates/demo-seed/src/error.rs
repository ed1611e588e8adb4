//! Errors surfaced by a seeding run.
//!
//! Every error is terminal: the run stops, the operator fixes the cause and
//! runs the seeder again.

use costing::ValidationError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum SeedError {
    /// Missing credential file, unset or placeholder endpoint. Raised before any
    /// network activity.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The store could not be reached.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The store answered but refused the write.
    #[error("Commit rejected{}: {body}", status_suffix(.status))]
    Commit { status: Option<u16>, body: String },

    #[error("Dataset validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid seed tree: {0}")]
    InvalidTree(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

impl SeedError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Operator-facing hints printed after the error.
    pub fn remediation(&self) -> &'static [&'static str] {
        match self {
            SeedError::Configuration(_) => &[
                "Set DEMO_FIREBASE_DATABASE_URL / FIREBASE_DATABASE_SECRET for the tree seeder",
                "Set GOOGLE_APPLICATION_CREDENTIALS to a service account key for the document seeder",
                "Service account keys: Firebase Console > Project Settings > Service Accounts > Generate New Private Key",
            ],
            SeedError::Transport(_) => &["Check your internet connection and the store URL"],
            SeedError::Commit { .. } => &[
                "Verify the credentials have write permission on the store",
                "Check the database rules allow writes",
                "Check that the store is enabled for the project",
            ],
            SeedError::Validation(_) | SeedError::InvalidTree(_) => {
                &["Fix the dataset and run the seeder again"]
            }
            SeedError::Io(_) | SeedError::Json(_) => &[],
        }
    }
}

impl From<StoreError> for SeedError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Transport(msg) => SeedError::Transport(msg),
            StoreError::Rejected { status, body } => SeedError::Commit {
                status: Some(status),
                body,
            },
            StoreError::Unavailable(msg) | StoreError::Encoding(msg) => SeedError::Commit {
                status: None,
                body: msg,
            },
            StoreError::Auth(msg) => SeedError::Configuration(msg),
        }
    }
}
