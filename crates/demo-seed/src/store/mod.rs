//! Document store abstraction.
//!
//! A store holds documents addressed by `(collection, key)`. Writes are queued
//! into a [`WriteBatch`] and applied through a single [`DocumentStore::commit`],
//! which either applies every write or none of them.

mod batch;
pub mod firestore;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use batch::{Write, WriteBatch};
pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

/// Document body: a JSON object without its id (the id is the document key).
pub type Document = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Store returned status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Cannot encode document: {0}")]
    Encoding(String),

    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}

/// Outcome of a successful commit.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitReceipt {
    /// Number of writes applied.
    pub writes: usize,
    /// Server-side commit timestamp, when the store reports one.
    pub commit_time: Option<String>,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Applies every write in `batch` atomically, overwriting existing documents.
    async fn commit(&self, batch: WriteBatch) -> Result<CommitReceipt, StoreError>;

    /// Reads one document back.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError>;
}
