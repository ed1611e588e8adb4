//! Cloud Firestore over its REST API.
//!
//! A [`WriteBatch`] becomes one `documents:commit` call: every write is an
//! `update` without a field mask, so each document is replaced whole and the
//! commit applies all writes or none.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info};

use super::{CommitReceipt, Document, DocumentStore, StoreError, WriteBatch};
use crate::config::{CredentialSource, DocumentStoreConfig};
use crate::credentials::{ServiceAccount, TokenProvider};
use crate::error::SeedError;

const FIRESTORE_HOST: &str = "https://firestore.googleapis.com";
const EMULATOR_PROJECT: &str = "demo-venueiq";
/// Any bearer token is accepted by the emulator; `owner` bypasses security rules.
const EMULATOR_TOKEN: &str = "owner";

enum Auth {
    Emulator,
    Token(String),
    ServiceAccount(TokenProvider),
}

pub struct FirestoreStore {
    client: Client,
    base_url: String,
    /// `projects/<id>/databases/<db>/documents`
    documents_path: String,
    auth: Auth,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitResponse {
    #[serde(default)]
    commit_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    #[serde(default)]
    fields: Map<String, Value>,
}

impl FirestoreStore {
    /// Builds a store from config, loading credentials before any request.
    pub fn connect(config: &DocumentStoreConfig) -> Result<Self, SeedError> {
        let client = Client::new();

        if let Some(host) = &config.emulator_host {
            let project = config.project_id.as_deref().unwrap_or(EMULATOR_PROJECT);
            info!("Using Firestore emulator at {host} (project {project})");
            return Ok(Self::with_parts(
                client,
                format!("http://{host}"),
                project,
                &config.database,
                Auth::Emulator,
            ));
        }

        let (project, auth) = match &config.credentials {
            CredentialSource::File(path) => {
                let account = ServiceAccount::from_file(path)?;
                info!("Loaded service account {}", account.client_email);
                let project = config
                    .project_id
                    .clone()
                    .unwrap_or_else(|| account.project_id.clone());
                (project, Auth::ServiceAccount(TokenProvider::new(client.clone(), account)))
            }
            CredentialSource::Inline(token) => {
                let project = config.project_id.clone().ok_or_else(|| {
                    SeedError::Configuration(
                        "FIRESTORE_PROJECT_ID is required with an inline access token".to_string(),
                    )
                })?;
                (project, Auth::Token(token.clone()))
            }
        };

        Ok(Self::with_parts(
            client,
            FIRESTORE_HOST.to_string(),
            &project,
            &config.database,
            auth,
        ))
    }

    fn with_parts(
        client: Client,
        base_url: String,
        project: &str,
        database: &str,
        auth: Auth,
    ) -> Self {
        Self {
            client,
            base_url,
            documents_path: format!("projects/{project}/databases/{database}/documents"),
            auth,
        }
    }

    async fn bearer(&self) -> Result<&str, StoreError> {
        match &self.auth {
            Auth::Emulator => Ok(EMULATOR_TOKEN),
            Auth::Token(token) => Ok(token.as_str()),
            Auth::ServiceAccount(provider) => provider.access_token().await,
        }
    }

    fn document_name(&self, collection: &str, key: &str) -> String {
        format!("{}/{collection}/{key}", self.documents_path)
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn commit(&self, batch: WriteBatch) -> Result<CommitReceipt, StoreError> {
        let writes: Vec<Value> = batch
            .writes()
            .iter()
            .map(|w| {
                json!({
                    "update": {
                        "name": self.document_name(&w.collection, &w.key),
                        "fields": encode_fields(&w.payload),
                    }
                })
            })
            .collect();
        let count = writes.len();

        let url = format!("{}/v1/{}:commit", self.base_url, self.documents_path);
        debug!("POST {url} with {count} writes");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(self.bearer().await?)
            .json(&json!({ "writes": writes }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Rejected { status, body });
        }

        let committed: CommitResponse = resp.json().await?;
        Ok(CommitReceipt {
            writes: count,
            commit_time: committed.commit_time,
        })
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError> {
        let url = format!("{}/v1/{}", self.base_url, self.document_name(collection, key));

        let resp = self
            .client
            .get(&url)
            .bearer_auth(self.bearer().await?)
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Rejected { status, body });
        }

        let doc: FirestoreDocument = resp.json().await?;
        decode_fields(&doc.fields).map(Some)
    }
}

/// Encodes a JSON object as a Firestore `fields` map.
pub fn encode_fields(doc: &Document) -> Map<String, Value> {
    doc.iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect()
}

/// Encodes one JSON value as a Firestore typed value.
///
/// Integers become `integerValue` (sent as a string), other numbers `doubleValue`.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) if n.is_i64() || n.is_u64() => json!({ "integerValue": n.to_string() }),
        Value::Number(n) => json!({ "doubleValue": n }),
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

pub fn decode_fields(fields: &Map<String, Value>) -> Result<Document, StoreError> {
    fields
        .iter()
        .map(|(k, v)| decode_value(v).map(|v| (k.clone(), v)))
        .collect()
}

/// Decodes a Firestore typed value back to plain JSON.
pub fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let (kind, inner) = value
        .as_object()
        .and_then(|m| m.iter().next())
        .ok_or_else(|| StoreError::Encoding(format!("not a typed value: {value}")))?;

    match (kind.as_str(), inner) {
        ("nullValue", _) => Ok(Value::Null),
        ("booleanValue", b) => Ok(b.clone()),
        ("stringValue", s) => Ok(s.clone()),
        ("doubleValue", n) => Ok(n.clone()),
        ("integerValue", Value::String(s)) => s
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| StoreError::Encoding(format!("bad integerValue {s}: {e}"))),
        ("integerValue", n) if n.is_number() => Ok(n.clone()),
        ("arrayValue", inner) => inner
            .get("values")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(decode_value).collect::<Result<Vec<_>, _>>())
            .unwrap_or_else(|| Ok(Vec::new()))
            .map(Value::Array),
        ("mapValue", inner) => match inner.get("fields").and_then(Value::as_object) {
            Some(fields) => decode_fields(fields).map(Value::Object),
            None => Ok(Value::Object(Map::new())),
        },
        (other, _) => Err(StoreError::Encoding(format!("unsupported value type {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{request_body, serve_once};

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode_value(&json!(45)), json!({"integerValue": "45"}));
        assert_eq!(encode_value(&json!(-837.0)), json!({"doubleValue": -837.0}));
        assert_eq!(encode_value(&json!("outdated")), json!({"stringValue": "outdated"}));
        assert_eq!(encode_value(&json!(true)), json!({"booleanValue": true}));
        assert_eq!(encode_value(&Value::Null), json!({"nullValue": null}));
    }

    #[test]
    fn test_encode_nested() {
        let day = json!({"rec_001": {"quantity": 32, "revenue": 479.68}});
        let encoded = encode_fields(day.as_object().unwrap());

        assert_eq!(
            encoded["rec_001"],
            json!({"mapValue": {"fields": {
                "quantity": {"integerValue": "32"},
                "revenue": {"doubleValue": 479.68}
            }}})
        );

        let history = encode_value(&json!([{"date": "2025-09-01", "price": 11.8}]));
        assert_eq!(
            history["arrayValue"]["values"][0]["mapValue"]["fields"]["date"],
            json!({"stringValue": "2025-09-01"})
        );
    }

    #[test]
    fn test_decode_reverses_encode() {
        let doc = json!({
            "name": "Pepperoni Pizza",
            "servings": 1,
            "monthlyImpact": -837.0,
            "ingredients": {"ing_004": {"quantity": 0.13, "unit": "kg"}},
            "tags": [],
            "recommendedPrice": null
        });
        let doc = doc.as_object().unwrap();

        let decoded = decode_fields(&encode_fields(doc)).unwrap();
        assert_eq!(&decoded, doc);
    }

    #[test]
    fn test_decode_rejects_unknown_types() {
        let err = decode_value(&json!({"geoPointValue": {"latitude": 1.0}})).unwrap_err();
        assert!(matches!(err, StoreError::Encoding(_)));
        assert!(decode_value(&json!("bare")).is_err());
    }

    #[test]
    fn test_emulator_connect_needs_no_credentials() {
        let config = DocumentStoreConfig {
            project_id: None,
            database: "(default)".to_string(),
            credentials: CredentialSource::File("missing.json".into()),
            emulator_host: Some("localhost:8080".to_string()),
        };
        let store = FirestoreStore::connect(&config).unwrap();

        assert_eq!(
            store.document_name("recipes", "rec_002"),
            "projects/demo-venueiq/databases/(default)/documents/recipes/rec_002"
        );
        assert_eq!(store.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_missing_credentials_file_fails_before_network() {
        let config = DocumentStoreConfig {
            project_id: None,
            database: "(default)".to_string(),
            credentials: CredentialSource::File("missing.json".into()),
            emulator_host: None,
        };
        assert!(matches!(
            FirestoreStore::connect(&config),
            Err(SeedError::Configuration(_))
        ));
    }

    #[test]
    fn test_inline_token_requires_project() {
        let config = DocumentStoreConfig {
            project_id: None,
            database: "(default)".to_string(),
            credentials: CredentialSource::Inline("ya29.token".to_string()),
            emulator_host: None,
        };
        assert!(FirestoreStore::connect(&config).is_err());
    }

    fn emulator_store(base_url: &str) -> FirestoreStore {
        let config = DocumentStoreConfig {
            project_id: None,
            database: "(default)".to_string(),
            credentials: CredentialSource::File("missing.json".into()),
            emulator_host: Some(base_url.trim_start_matches("http://").to_string()),
        };
        FirestoreStore::connect(&config).unwrap()
    }

    fn pepperoni_batch() -> WriteBatch {
        let body = json!({"name": "Pepperoni Pizza", "servings": 1, "monthlyImpact": -837.0});
        let mut batch = WriteBatch::new();
        batch.set("recipes", "rec_002", body.as_object().cloned().unwrap());
        batch
    }

    #[tokio::test]
    async fn test_commit_sends_full_document_updates() {
        let (base, server) =
            serve_once("200 OK", r#"{"writeResults":[{}],"commitTime":"2025-11-14T09:00:00Z"}"#)
                .await;
        let store = emulator_store(&base);

        let receipt = store.commit(pepperoni_batch()).await.unwrap();
        assert_eq!(receipt.writes, 1);
        assert_eq!(receipt.commit_time.as_deref(), Some("2025-11-14T09:00:00Z"));

        let request = server.await.unwrap();
        assert!(request.starts_with(
            "POST /v1/projects/demo-venueiq/databases/(default)/documents:commit HTTP/1.1"
        ));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer owner"));

        let body: Value = serde_json::from_str(request_body(&request)).unwrap();
        let write = &body["writes"][0];
        assert!(write.get("updateMask").is_none());
        assert_eq!(
            write["update"]["name"],
            "projects/demo-venueiq/databases/(default)/documents/recipes/rec_002"
        );
        assert_eq!(write["update"]["fields"]["servings"], json!({"integerValue": "1"}));
        assert_eq!(
            write["update"]["fields"]["monthlyImpact"],
            json!({"doubleValue": -837.0})
        );
    }

    #[tokio::test]
    async fn test_commit_rejection_keeps_status_and_body() {
        let (base, server) = serve_once(
            "403 Forbidden",
            r#"{"error":{"code":403,"status":"PERMISSION_DENIED"}}"#,
        )
        .await;
        let store = emulator_store(&base);

        let err = store.commit(pepperoni_batch()).await.unwrap_err();
        server.await.unwrap();

        match err {
            StoreError::Rejected { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("PERMISSION_DENIED"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_get_missing_document_is_none() {
        let (base, server) = serve_once("404 Not Found", r#"{"error":{"code":404}}"#).await;
        let store = emulator_store(&base);

        assert!(store.get("recipes", "rec_404").await.unwrap().is_none());

        let request = server.await.unwrap();
        assert!(request.starts_with(
            "GET /v1/projects/demo-venueiq/databases/(default)/documents/recipes/rec_404 HTTP/1.1"
        ));
    }

    #[tokio::test]
    async fn test_get_decodes_fields() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"name":"projects/demo-venueiq/databases/(default)/documents/recipes/rec_002",
                "fields":{"costingStatus":{"stringValue":"outdated"},
                          "monthlyImpact":{"doubleValue":-837.0}}}"#,
        )
        .await;
        let store = emulator_store(&base);

        let doc = store.get("recipes", "rec_002").await.unwrap().unwrap();
        server.await.unwrap();

        assert_eq!(doc["costingStatus"], "outdated");
        assert_eq!(doc["monthlyImpact"], json!(-837.0));
        assert!(!doc.contains_key("id"));
    }
}
