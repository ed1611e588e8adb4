//! Dataset to keyed documents.
//!
//! Records with an `id` are stored under that id, and the id is removed from the
//! body: a document never repeats its own key. Sales are keyed by ISO date and
//! settings live under a fixed key. Both seeders build on this mapping.

use serde::Serialize;
use serde_json::Value;

use costing::Dataset;

use crate::error::SeedError;
use crate::fixture::SETTINGS_KEY;
use crate::store::{Document, WriteBatch};

pub const INGREDIENTS: &str = "ingredients";
pub const RECIPES: &str = "recipes";
pub const SALES: &str = "sales";
pub const SUPPLIERS: &str = "suppliers";
pub const SETTINGS: &str = "settings";

/// One collection's documents, in key order.
pub type Collection = (&'static str, Vec<(String, Document)>);

/// Serializes `value` into a JSON object.
fn to_document<T: Serialize>(value: &T) -> Result<Document, SeedError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(SeedError::InvalidTree(format!(
            "expected an object, got {other}"
        ))),
    }
}

/// Splits a record into `(id, body without id)`.
pub fn keyed_body<T: Serialize>(record: &T) -> Result<(String, Document), SeedError> {
    let mut body = to_document(record)?;
    match body.remove("id") {
        Some(Value::String(id)) => Ok((id, body)),
        Some(other) => Err(SeedError::InvalidTree(format!(
            "record id must be a string, got {other}"
        ))),
        None => Err(SeedError::InvalidTree("record has no id".to_string())),
    }
}

/// Every document the dataset produces, grouped by collection.
pub fn collections(dataset: &Dataset) -> Result<Vec<Collection>, SeedError> {
    let ingredients = dataset
        .ingredients()
        .map(keyed_body)
        .collect::<Result<Vec<_>, _>>()?;
    let recipes = dataset
        .recipes()
        .map(keyed_body)
        .collect::<Result<Vec<_>, _>>()?;
    let sales = dataset
        .sales()
        .iter()
        .map(|(date, day)| Ok((date.to_string(), to_document(day)?)))
        .collect::<Result<Vec<_>, SeedError>>()?;
    let suppliers = dataset
        .suppliers()
        .map(keyed_body)
        .collect::<Result<Vec<_>, _>>()?;
    let settings = vec![(SETTINGS_KEY.to_string(), to_document(dataset.settings())?)];

    Ok(vec![
        (INGREDIENTS, ingredients),
        (RECIPES, recipes),
        (SALES, sales),
        (SUPPLIERS, suppliers),
        (SETTINGS, settings),
    ])
}

/// Queues every document of the dataset into one batch.
pub fn write_batch(dataset: &Dataset) -> Result<WriteBatch, SeedError> {
    let mut batch = WriteBatch::new();
    for (collection, docs) in collections(dataset)? {
        for (key, body) in docs {
            batch.set(collection, key, body);
        }
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::demo_dataset;
    use serde_json::json;

    #[test]
    fn test_keyed_body_strips_id() {
        let (key, body) = keyed_body(&json!({"id": "sup_001", "name": "Fresh Farms"})).unwrap();
        assert_eq!(key, "sup_001");
        assert_eq!(Value::Object(body), json!({"name": "Fresh Farms"}));

        assert!(keyed_body(&json!({"name": "no id"})).is_err());
        assert!(keyed_body(&json!({"id": 7})).is_err());
    }

    #[test]
    fn test_write_batch_covers_dataset() {
        let dataset = demo_dataset().unwrap();
        let batch = write_batch(&dataset).unwrap();

        assert_eq!(batch.count(INGREDIENTS), 10);
        assert_eq!(batch.count(RECIPES), 6);
        assert_eq!(batch.count(SALES), 14);
        assert_eq!(batch.count(SUPPLIERS), 5);
        assert_eq!(batch.count(SETTINGS), 1);
        assert_eq!(batch.len(), 36);

        assert!(batch.writes().iter().all(|w| !w.payload.contains_key("id")));
    }

    #[test]
    fn test_sales_documents_keyed_by_date() {
        let dataset = demo_dataset().unwrap();
        let batch = write_batch(&dataset).unwrap();

        let first_day = batch
            .writes()
            .iter()
            .find(|w| w.collection == SALES)
            .unwrap();
        assert_eq!(first_day.key, "2025-11-01");
        assert_eq!(
            Value::Object(first_day.payload.clone())["rec_001"],
            json!({"quantity": 32, "revenue": 479.68})
        );
    }
}
