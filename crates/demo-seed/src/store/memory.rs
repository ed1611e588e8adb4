use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use super::{CommitReceipt, Document, DocumentStore, StoreError, WriteBatch};

type Documents = BTreeMap<(String, String), Document>;

/// In-process document store.
///
/// Used for dry runs and tests. A commit is applied to a copy of the current
/// documents and swapped in only when every write succeeded.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<Documents>,
    fail_next_commit: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next commit fail without applying anything.
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }

    /// Copy of every stored document keyed by `(collection, key)`.
    pub fn snapshot(&self) -> Documents {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Keys stored in `collection`, in key order.
    pub fn keys(&self, collection: &str) -> Vec<String> {
        self.lock()
            .keys()
            .filter(|(c, _)| c == collection)
            .map(|(_, k)| k.clone())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Documents> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn commit(&self, batch: WriteBatch) -> Result<CommitReceipt, StoreError> {
        if self.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Unavailable("commit failure injected".to_string()));
        }

        let mut documents = self.lock();
        let mut staged = documents.clone();
        let writes = batch.len();
        for write in batch.into_writes() {
            debug!("memory store: set {}/{}", write.collection, write.key);
            staged.insert((write.collection, write.key), write.payload);
        }
        *documents = staged;

        Ok(CommitReceipt {
            writes,
            commit_time: None,
        })
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError> {
        Ok(self
            .lock()
            .get(&(collection.to_string(), key.to_string()))
            .cloned())
    }
}
