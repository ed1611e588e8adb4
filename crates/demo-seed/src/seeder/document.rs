use tracing::info;

use costing::Dataset;

use crate::documents::{self, INGREDIENTS, RECIPES, SALES, SETTINGS, SUPPLIERS};
use crate::error::SeedError;
use crate::report::SeedReport;
use crate::store::DocumentStore;

/// Seeds a document store from the dataset in one atomic commit.
pub struct DocumentSeeder<S> {
    store: S,
}

impl<S: DocumentStore> DocumentSeeder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Queues every record and commits once.
    ///
    /// On error nothing from this run is visible in the store.
    pub async fn seed(&self, dataset: &Dataset) -> Result<SeedReport, SeedError> {
        let batch = documents::write_batch(dataset)?;

        info!("Queued {} ingredients", batch.count(INGREDIENTS));
        info!("Queued {} recipes", batch.count(RECIPES));
        info!("Queued {} days of sales", batch.count(SALES));
        info!("Queued {} suppliers", batch.count(SUPPLIERS));
        info!("Queued {} settings document", batch.count(SETTINGS));

        let report = SeedReport::from_batch(&batch, dataset);

        info!("Committing {} operations...", batch.len());
        let receipt = self.store.commit(batch).await?;
        match &receipt.commit_time {
            Some(at) => info!("Committed {} writes at {at}", receipt.writes),
            None => info!("Committed {} writes", receipt.writes),
        }

        Ok(report)
    }
}
