use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::TreeStoreConfig;
use crate::error::SeedError;
use crate::report::SeedReport;
use crate::store::StoreError;

/// Status and body of the store's answer, kept verbatim for diagnosis.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one whole-tree overwrite.
#[async_trait]
pub trait TreeWriter: Send + Sync {
    async fn put(&self, url: Url, body: String) -> Result<TreeResponse, StoreError>;
}

/// [`TreeWriter`] over HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpTreeWriter {
    client: Client,
}

#[async_trait]
impl TreeWriter for HttpTreeWriter {
    async fn put(&self, url: Url, body: String) -> Result<TreeResponse, StoreError> {
        let resp = self
            .client
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Ok(TreeResponse { status, body })
    }
}

/// Replaces the hierarchical store's whole tree with the dataset.
pub struct TreeSeeder<W> {
    config: TreeStoreConfig,
    writer: W,
}

impl<W: TreeWriter> TreeSeeder<W> {
    pub fn new(config: TreeStoreConfig, writer: W) -> Self {
        Self { config, writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Uploads `tree` with one PUT, replacing (not merging) what is there.
    ///
    /// Configuration is checked first; a placeholder endpoint fails here
    /// without any request being sent. Any status other than 200 is a rejection.
    pub async fn seed(&self, tree: &Value) -> Result<SeedReport, SeedError> {
        self.config.validate()?;
        let url = self.config.endpoint()?;
        let report = SeedReport::from_tree(tree, &self.config.root_key)?;
        let body = serde_json::to_string(tree)?;

        info!("Target database: {}", self.config.database_url);
        info!("Uploading {} bytes...", body.len());
        debug!("Tree root key: {}", self.config.root_key);

        let resp = self.writer.put(url, body).await?;
        if resp.status != 200 {
            return Err(SeedError::Commit {
                status: Some(resp.status),
                body: resp.body,
            });
        }

        info!("Upload accepted with status {}", resp.status);
        Ok(report)
    }
}
