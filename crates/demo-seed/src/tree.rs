//! The dataset as a single JSON tree for the hierarchical store.
//!
//! ```text
//! { "<root>": { "ingredients": { "ing_001": {..}, .. },
//!               "recipes":     { "rec_001": {..}, .. },
//!               "sales":       { "2025-11-01": { "rec_001": {..} }, .. },
//!               "suppliers":   { "sup_001": {..}, .. },
//!               "settings":    { "restaurant": {..} } } }
//! ```
//!
//! Bodies are the same id-less documents the document seeder writes.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use costing::Dataset;

use crate::documents::{self, INGREDIENTS, RECIPES, SALES, SUPPLIERS};
use crate::error::SeedError;

pub fn to_tree(dataset: &Dataset, root_key: &str) -> Result<Value, SeedError> {
    let root: Map<String, Value> = documents::collections(dataset)?
        .into_iter()
        .map(|(collection, docs)| {
            let docs: Map<String, Value> = docs
                .into_iter()
                .map(|(key, body)| (key, Value::Object(body)))
                .collect();
            (collection.to_string(), Value::Object(docs))
        })
        .collect();

    let mut tree = Map::new();
    tree.insert(root_key.to_string(), Value::Object(root));
    Ok(Value::Object(tree))
}

/// Loads a pre-serialized tree and checks it has the expected shape.
pub fn load_tree(path: &Path, root_key: &str) -> Result<Value, SeedError> {
    let contents = std::fs::read_to_string(path)?;
    let tree: Value = serde_json::from_str(&contents)?;
    info!("Loaded seed data from {}", path.display());

    check_shape(&tree, root_key)?;
    Ok(tree)
}

pub fn write_tree(path: &Path, tree: &Value) -> Result<(), SeedError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(tree)?)?;
    Ok(())
}

/// The object nested under `root_key`.
pub fn root<'a>(tree: &'a Value, root_key: &str) -> Result<&'a Map<String, Value>, SeedError> {
    tree.get(root_key)
        .and_then(Value::as_object)
        .ok_or_else(|| SeedError::InvalidTree(format!("missing root object {root_key:?}")))
}

fn check_shape(tree: &Value, root_key: &str) -> Result<(), SeedError> {
    let root = root(tree, root_key)?;
    for collection in [INGREDIENTS, RECIPES, SALES, SUPPLIERS] {
        if !root.get(collection).is_some_and(Value::is_object) {
            return Err(SeedError::InvalidTree(format!(
                "{root_key}.{collection} must be an object"
            )));
        }
    }
    Ok(())
}
