//! Seeder configuration.
//!
//! Both seeders take an explicit config value at construction. The `from_env`
//! constructors read the documented environment variables; `from_lookup`
//! takes any key lookup so tests never touch the process environment.

use std::path::PathBuf;

use reqwest::Url;

use crate::error::SeedError;
use crate::fixture::DEFAULT_ROOT_KEY;

/// Endpoint shipped in the docs; must be replaced before use.
pub const PLACEHOLDER_DATABASE_URL: &str = "https://YOUR-PROJECT-ID.firebaseio.com";
const PLACEHOLDER_MARKER: &str = "YOUR-PROJECT-ID";

pub const DEFAULT_CREDENTIALS_PATH: &str = "demo-data/serviceAccountKey.json";
pub const DEFAULT_DATABASE: &str = "(default)";

/// Where the document store's credentials come from.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialSource {
    /// Service account key file.
    File(PathBuf),
    /// Ready-to-use bearer token.
    Inline(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStoreConfig {
    /// Overrides the project id from the credential file.
    pub project_id: Option<String>,
    pub database: String,
    pub credentials: CredentialSource,
    /// `host:port` of a local Firestore emulator; no credentials needed.
    pub emulator_host: Option<String>,
}

impl DocumentStoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let credentials = match non_empty("FIRESTORE_ACCESS_TOKEN") {
            Some(token) => CredentialSource::Inline(token),
            None => CredentialSource::File(
                non_empty("GOOGLE_APPLICATION_CREDENTIALS")
                    .unwrap_or_else(|| DEFAULT_CREDENTIALS_PATH.to_string())
                    .into(),
            ),
        };

        Self {
            project_id: non_empty("FIRESTORE_PROJECT_ID"),
            database: non_empty("FIRESTORE_DATABASE")
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            credentials,
            emulator_host: non_empty("FIRESTORE_EMULATOR_HOST"),
        }
    }
}

/// Whether the documented placeholder endpoint may be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaceholderPolicy {
    /// Refuse to run while the endpoint still contains the placeholder.
    #[default]
    Refuse,
    Allow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeStoreConfig {
    pub database_url: String,
    /// Database secret sent as the `auth` query parameter.
    pub secret: Option<String>,
    /// Key the whole dataset is nested under.
    pub root_key: String,
    pub placeholder: PlaceholderPolicy,
}

impl TreeStoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            secret: None,
            root_key: DEFAULT_ROOT_KEY.to_string(),
            placeholder: PlaceholderPolicy::default(),
        }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn with_root_key(mut self, root_key: impl Into<String>) -> Self {
        self.root_key = root_key.into();
        self
    }

    pub fn with_placeholder_policy(mut self, policy: PlaceholderPolicy) -> Self {
        self.placeholder = policy;
        self
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            database_url: non_empty("DEMO_FIREBASE_DATABASE_URL")
                .unwrap_or_else(|| PLACEHOLDER_DATABASE_URL.to_string()),
            secret: non_empty("FIREBASE_DATABASE_SECRET"),
            root_key: non_empty("DEMO_ROOT_KEY").unwrap_or_else(|| DEFAULT_ROOT_KEY.to_string()),
            placeholder: PlaceholderPolicy::default(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.database_url.contains(PLACEHOLDER_MARKER)
    }

    /// Checks the endpoint can be used. Runs before any request is built.
    pub fn validate(&self) -> Result<(), SeedError> {
        if self.database_url.trim().is_empty() {
            return Err(SeedError::Configuration(
                "DEMO_FIREBASE_DATABASE_URL is empty".to_string(),
            ));
        }
        if self.placeholder == PlaceholderPolicy::Refuse && self.is_placeholder() {
            return Err(SeedError::Configuration(format!(
                "database URL is still the placeholder {}; set DEMO_FIREBASE_DATABASE_URL=https://<your-project>.firebaseio.com",
                self.database_url
            )));
        }
        if self.root_key.is_empty() {
            return Err(SeedError::Configuration("root key is empty".to_string()));
        }
        Ok(())
    }

    /// `<database_url>/.json`, with `?auth=<secret>` when a secret is set.
    pub fn endpoint(&self) -> Result<Url, SeedError> {
        let base = Url::parse(&self.database_url).map_err(|e| {
            SeedError::Configuration(format!("invalid database URL {}: {e}", self.database_url))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SeedError::Configuration(format!(
                "database URL must be http(s): {}",
                self.database_url
            )));
        }

        let mut url = base
            .join("/.json")
            .map_err(|e| SeedError::Configuration(e.to_string()))?;
        if let Some(secret) = &self.secret {
            url.query_pairs_mut().append_pair("auth", secret);
        }
        Ok(url)
    }
}
