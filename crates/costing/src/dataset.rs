//! Validated, read-only collection of every demo record.

use std::collections::BTreeMap;

use crate::costing;
use crate::models::{DailySales, Ingredient, IsoDate, Recipe, RestaurantSettings, Supplier};
use crate::validation::{self, ValidationError};

/// The full demo dataset.
///
/// Built once through [`Dataset::new`], which checks every consistency rule and
/// fails on the first violation. After that the records are only readable.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    ingredients: BTreeMap<String, Ingredient>,
    recipes: BTreeMap<String, Recipe>,
    sales: BTreeMap<IsoDate, DailySales>,
    suppliers: BTreeMap<String, Supplier>,
    settings: RestaurantSettings,
}

impl Dataset {
    pub fn new(
        ingredients: Vec<Ingredient>,
        recipes: Vec<Recipe>,
        sales: BTreeMap<IsoDate, DailySales>,
        suppliers: Vec<Supplier>,
        settings: RestaurantSettings,
    ) -> Result<Self, ValidationError> {
        validation::validate_ingredients(&ingredients)?;
        let ingredients: BTreeMap<_, _> = ingredients
            .into_iter()
            .map(|i| (i.id.clone(), i))
            .collect();

        let mut by_id = BTreeMap::new();
        for recipe in recipes {
            if recipe.id.is_empty() {
                return Err(ValidationError::EmptyId {
                    collection: "recipe",
                });
            }
            validation::validate_recipe(&recipe, &ingredients)?;
            if let Some(dup) = by_id.insert(recipe.id.clone(), recipe) {
                return Err(ValidationError::DuplicateId {
                    collection: "recipe",
                    id: dup.id,
                });
            }
        }
        let recipes = by_id;

        validation::validate_sales(&sales, &recipes)?;
        validation::validate_suppliers(&suppliers)?;
        validation::validate_settings(&settings)?;

        Ok(Self {
            ingredients,
            recipes,
            sales,
            suppliers: suppliers
                .into_iter()
                .map(|s| (s.id.clone(), s))
                .collect(),
            settings,
        })
    }

    pub fn ingredients(&self) -> impl ExactSizeIterator<Item = &Ingredient> {
        self.ingredients.values()
    }

    pub fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.get(id)
    }

    pub fn recipes(&self) -> impl ExactSizeIterator<Item = &Recipe> {
        self.recipes.values()
    }

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    /// Sales keyed by day, in date order.
    pub fn sales(&self) -> &BTreeMap<IsoDate, DailySales> {
        &self.sales
    }

    pub fn suppliers(&self) -> impl ExactSizeIterator<Item = &Supplier> {
        self.suppliers.values()
    }

    pub fn settings(&self) -> &RestaurantSettings {
        &self.settings
    }

    pub fn outdated_recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes().filter(|r| r.costing.is_outdated())
    }

    /// Monthly margin lost across all outdated recipes, as a positive amount.
    pub fn monthly_loss(&self) -> f64 {
        costing::monthly_loss(self.outdated_recipes())
    }
}
