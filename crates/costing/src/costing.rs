//! Cost and profitability arithmetic.
//!
//! All monetary inputs are in the restaurant's currency with two-decimal precision.

use crate::models::Recipe;

/// Weeks per month used when spreading a monthly impact over weeks.
const WEEKS_PER_MONTH: f64 = 52.0 / 12.0;

/// Rounds to two decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Ingredient cost as a percentage of the selling price.
pub fn food_cost_percentage(cost: f64, selling_price: f64) -> f64 {
    cost / selling_price * 100.0
}

pub fn gross_profit(cost: f64, selling_price: f64) -> f64 {
    round2(selling_price - cost)
}

/// Spreads a monthly figure over weeks (52 weeks in 12 months).
pub fn weekly_from_monthly(monthly: f64) -> f64 {
    monthly / WEEKS_PER_MONTH
}

/// Total monthly margin lost across outdated recipes, as a positive amount.
pub fn monthly_loss<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> f64 {
    let total: f64 = recipes
        .into_iter()
        .filter_map(Recipe::monthly_impact)
        .map(f64::abs)
        .sum();
    round2(total)
}
