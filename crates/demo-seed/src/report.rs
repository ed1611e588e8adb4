//! Operator-facing summary of a seeding run.

use serde_json::Value;
use tracing::info;

use costing::Dataset;
use costing::costing::round2;

use crate::documents::{INGREDIENTS, RECIPES, SALES, SETTINGS, SUPPLIERS};
use crate::error::SeedError;
use crate::store::WriteBatch;
use crate::tree;

/// Counts and loss figures printed after a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedReport {
    pub ingredients: usize,
    pub recipes: usize,
    pub sales_days: usize,
    pub suppliers: usize,
    pub settings: usize,
    /// Writes sent to the store.
    pub operations: usize,
    pub outdated_recipes: usize,
    /// Σ |monthlyImpact| over outdated recipes.
    pub monthly_loss: f64,
}

impl SeedReport {
    pub fn from_batch(batch: &WriteBatch, dataset: &Dataset) -> Self {
        Self {
            ingredients: batch.count(INGREDIENTS),
            recipes: batch.count(RECIPES),
            sales_days: batch.count(SALES),
            suppliers: batch.count(SUPPLIERS),
            settings: batch.count(SETTINGS),
            operations: batch.len(),
            outdated_recipes: dataset.outdated_recipes().count(),
            monthly_loss: dataset.monthly_loss(),
        }
    }

    /// Counts keys under each collection of an uploaded tree.
    pub fn from_tree(tree: &Value, root_key: &str) -> Result<Self, SeedError> {
        let root = tree::root(tree, root_key)?;
        let count = |collection: &str| {
            root.get(collection)
                .and_then(Value::as_object)
                .map_or(0, |m| m.len())
        };

        let outdated: Vec<&Value> = root
            .get(RECIPES)
            .and_then(Value::as_object)
            .map(|recipes| {
                recipes
                    .values()
                    .filter(|r| r.get("costingStatus").and_then(Value::as_str) == Some("outdated"))
                    .collect()
            })
            .unwrap_or_default();
        let monthly_loss = outdated
            .iter()
            .filter_map(|r| r.get("monthlyImpact").and_then(Value::as_f64))
            .map(f64::abs)
            .sum();

        Ok(Self {
            ingredients: count(INGREDIENTS),
            recipes: count(RECIPES),
            sales_days: count(SALES),
            suppliers: count(SUPPLIERS),
            settings: count(SETTINGS),
            // The whole tree goes out in one request.
            operations: 1,
            outdated_recipes: outdated.len(),
            monthly_loss: round2(monthly_loss),
        })
    }

    pub fn loss_line(&self) -> String {
        format!(
            "Demo shows ${:.0}/month in losses across {} items",
            self.monthly_loss, self.outdated_recipes
        )
    }

    pub fn log_summary(&self) {
        info!("Summary:");
        info!("  Ingredients: {}", self.ingredients);
        info!("  Recipes: {}", self.recipes);
        info!("  Sales days: {}", self.sales_days);
        info!("  Suppliers: {}", self.suppliers);
        info!("  Settings: {}", self.settings);
        info!("  Operations: {}", self.operations);
        info!("{}", self.loss_line());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::write_batch;
    use crate::fixture::{DEFAULT_ROOT_KEY, demo_dataset};
    use crate::tree::to_tree;

    #[test]
    fn test_report_from_batch() {
        let dataset = demo_dataset().unwrap();
        let batch = write_batch(&dataset).unwrap();
        let report = SeedReport::from_batch(&batch, &dataset);

        assert_eq!(report.ingredients, 10);
        assert_eq!(report.sales_days, 14);
        assert_eq!(report.operations, 36);
        assert_eq!(report.outdated_recipes, 4);
        assert_eq!(report.monthly_loss, 2800.0);
        assert_eq!(report.loss_line(), "Demo shows $2800/month in losses across 4 items");
    }

    #[test]
    fn test_tree_report_matches_batch_report() {
        let dataset = demo_dataset().unwrap();
        let from_batch = SeedReport::from_batch(&write_batch(&dataset).unwrap(), &dataset);
        let tree = to_tree(&dataset, DEFAULT_ROOT_KEY).unwrap();
        let from_tree = SeedReport::from_tree(&tree, DEFAULT_ROOT_KEY).unwrap();

        assert_eq!(
            SeedReport {
                operations: from_batch.operations,
                ..from_tree
            },
            from_batch
        );
    }
}
