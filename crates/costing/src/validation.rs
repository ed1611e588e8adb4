//! Consistency checks for the demo dataset.
//!
//! A [`Dataset`](crate::Dataset) is only constructed after every check here passes.
//! Checks stop at the first violation.

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::costing::{food_cost_percentage, gross_profit, round2, weekly_from_monthly};
use crate::models::{DailySales, Ingredient, IsoDate, Recipe, RestaurantSettings, Supplier};

/// Allowed gap between a stored food-cost percentage and its recomputation.
pub const FOOD_COST_TOLERANCE: f64 = 0.1;
/// Allowed gap between a stored weekly impact and the monthly impact spread over weeks.
pub const WEEKLY_IMPACT_TOLERANCE: f64 = 1.0;
/// Allowed gap between recorded revenue and quantity times selling price.
pub const REVENUE_TOLERANCE: f64 = 0.5;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{collection} record has an empty id")]
    EmptyId { collection: &'static str },

    #[error("Duplicate {collection} id: {id}")]
    DuplicateId { collection: &'static str, id: String },

    #[error("Ingredient {id} has invalid price {price}")]
    InvalidPrice { id: String, price: f64 },

    #[error("Ingredient {id} price history is not chronological")]
    UnorderedPriceHistory { id: String },

    #[error("Recipe {recipe} references unknown ingredient {ingredient}")]
    UnknownIngredient { recipe: String, ingredient: String },

    #[error("Recipe {id} has non-positive selling price {price}")]
    InvalidSellingPrice { id: String, price: f64 },

    #[error("Recipe {id}: {field} is {stored}, expected {expected:.2}")]
    DerivedFieldMismatch {
        id: String,
        field: &'static str,
        stored: f64,
        expected: f64,
    },

    #[error("Recipe {id}: {field} must not be positive, got {value}")]
    PositiveImpact {
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("Sales on {date} reference unknown recipe {recipe}")]
    UnknownRecipe { date: IsoDate, recipe: String },

    #[error("Sales on {date} for {recipe}: revenue {revenue} does not match {quantity} x {price}")]
    RevenueMismatch {
        date: IsoDate,
        recipe: String,
        quantity: u32,
        price: f64,
        revenue: f64,
    },

    #[error("Supplier {id} rating {rating} outside 0..=5")]
    InvalidRating { id: String, rating: f64 },

    #[error("Target food-cost percentage {0} outside 0..=100")]
    InvalidTarget(f64),
}

/// Rejects empty and duplicate ids within one collection.
fn check_ids<'a>(
    collection: &'static str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(ValidationError::EmptyId { collection });
        }
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_ingredients(ingredients: &[Ingredient]) -> Result<(), ValidationError> {
    check_ids("ingredient", ingredients.iter().map(|i| i.id.as_str()))?;

    for ingredient in ingredients {
        let price_ok = |p: f64| p.is_finite() && p >= 0.0;
        if !price_ok(ingredient.current_price) {
            return Err(ValidationError::InvalidPrice {
                id: ingredient.id.clone(),
                price: ingredient.current_price,
            });
        }

        if let Some(history) = &ingredient.price_history {
            if let Some(bad) = history.iter().find(|p| !price_ok(p.price)) {
                return Err(ValidationError::InvalidPrice {
                    id: ingredient.id.clone(),
                    price: bad.price,
                });
            }
            if history.windows(2).any(|w| w[0].date > w[1].date) {
                return Err(ValidationError::UnorderedPriceHistory {
                    id: ingredient.id.clone(),
                });
            }
        }
    }

    Ok(())
}

fn mismatch(id: &str, field: &'static str, stored: f64, expected: f64) -> ValidationError {
    ValidationError::DerivedFieldMismatch {
        id: id.to_string(),
        field,
        stored,
        expected,
    }
}

/// Stored figure must be strictly within `tolerance` of its recomputation.
fn check_derived(
    id: &str,
    field: &'static str,
    stored: f64,
    expected: f64,
    tolerance: f64,
) -> Result<(), ValidationError> {
    if (stored - expected).abs() < tolerance {
        Ok(())
    } else {
        Err(mismatch(id, field, stored, expected))
    }
}

/// Stored profit must equal price minus cost to the cent.
fn check_profit(
    id: &str,
    field: &'static str,
    stored: f64,
    cost: f64,
    price: f64,
) -> Result<(), ValidationError> {
    let expected = gross_profit(cost, price);
    if round2(stored) == expected {
        Ok(())
    } else {
        Err(mismatch(id, field, stored, expected))
    }
}

pub fn validate_recipe(
    recipe: &Recipe,
    ingredients: &BTreeMap<String, Ingredient>,
) -> Result<(), ValidationError> {
    if let Some(unknown) = recipe.ingredients.keys().find(|id| !ingredients.contains_key(*id)) {
        return Err(ValidationError::UnknownIngredient {
            recipe: recipe.id.clone(),
            ingredient: unknown.clone(),
        });
    }

    let price = recipe.selling_price;
    if !(price.is_finite() && price > 0.0) {
        return Err(ValidationError::InvalidSellingPrice {
            id: recipe.id.clone(),
            price,
        });
    }

    check_derived(
        &recipe.id,
        "foodCostPercentage",
        recipe.food_cost_percentage,
        food_cost_percentage(recipe.actual_cost, price),
        FOOD_COST_TOLERANCE,
    )?;
    check_profit(
        &recipe.id,
        "grossProfit",
        recipe.gross_profit,
        recipe.actual_cost,
        price,
    )?;

    if let Some(outdated) = recipe.costing.outdated() {
        if let Some(pct) = outdated.outdated_food_cost_percentage {
            check_derived(
                &recipe.id,
                "outdatedFoodCostPercentage",
                pct,
                food_cost_percentage(recipe.outdated_cost, price),
                FOOD_COST_TOLERANCE,
            )?;
        }
        if let Some(profit) = outdated.outdated_gross_profit {
            check_profit(
                &recipe.id,
                "outdatedGrossProfit",
                profit,
                recipe.outdated_cost,
                price,
            )?;
        }
        for (field, value) in [
            ("monthlyImpact", outdated.monthly_impact),
            ("weeklyImpact", outdated.weekly_impact),
        ] {
            if value > 0.0 {
                return Err(ValidationError::PositiveImpact {
                    id: recipe.id.clone(),
                    field,
                    value,
                });
            }
        }
        check_derived(
            &recipe.id,
            "weeklyImpact",
            outdated.weekly_impact,
            weekly_from_monthly(outdated.monthly_impact),
            WEEKLY_IMPACT_TOLERANCE,
        )?;
    }

    Ok(())
}

pub fn validate_sales(
    sales: &BTreeMap<IsoDate, DailySales>,
    recipes: &BTreeMap<String, Recipe>,
) -> Result<(), ValidationError> {
    for (date, day) in sales {
        for (recipe_id, line) in day {
            let recipe = recipes
                .get(recipe_id)
                .ok_or_else(|| ValidationError::UnknownRecipe {
                    date: *date,
                    recipe: recipe_id.clone(),
                })?;

            let expected = f64::from(line.quantity) * recipe.selling_price;
            if (line.revenue - expected).abs() >= REVENUE_TOLERANCE {
                return Err(ValidationError::RevenueMismatch {
                    date: *date,
                    recipe: recipe_id.clone(),
                    quantity: line.quantity,
                    price: recipe.selling_price,
                    revenue: line.revenue,
                });
            }
        }
    }
    Ok(())
}

pub fn validate_suppliers(suppliers: &[Supplier]) -> Result<(), ValidationError> {
    check_ids("supplier", suppliers.iter().map(|s| s.id.as_str()))?;

    match suppliers
        .iter()
        .find(|s| !(0.0..=5.0).contains(&s.rating))
    {
        Some(s) => Err(ValidationError::InvalidRating {
            id: s.id.clone(),
            rating: s.rating,
        }),
        None => Ok(()),
    }
}

pub fn validate_settings(settings: &RestaurantSettings) -> Result<(), ValidationError> {
    let target = settings.target_food_cost_percentage;
    if (0.0..=100.0).contains(&target) {
        Ok(())
    } else {
        Err(ValidationError::InvalidTarget(target))
    }
}
