//! Record types for the demo dataset.
//!
//! Field names on the wire are camelCase to match the documents the demo page
//! reads. Optional fields are omitted entirely when absent.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date rendered as `YYYY-MM-DD`.
///
/// Used both as a field value and as a map key (sales are keyed by day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate(pub Date);

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.format(ISO_DATE).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl FromStr for IsoDate {
    type Err = time::error::Parse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s, ISO_DATE).map(IsoDate)
    }
}

impl From<Date> for IsoDate {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl Serialize for IsoDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IsoDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A single observed purchase price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: IsoDate,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub current_price: f64,
    /// Supplier *name*, not a supplier id.
    pub supplier: String,
    pub last_updated: IsoDate,
    pub stock_level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_history: Option<Vec<PricePoint>>,
    /// Free-text anomaly flag shown next to the ingredient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Quantity of one ingredient used per serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Popularity {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// Figures attached to a recipe whose recorded cost no longer matches current prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutdatedCosting {
    pub costing_issue: String,
    /// Food-cost percentage the stale costing still shows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdated_food_cost_percentage: Option<f64>,
    /// Gross profit the stale costing still shows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdated_gross_profit: Option<f64>,
    /// Estimated margin lost per month. Negative means lost margin.
    pub monthly_impact: f64,
    pub weekly_impact: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_price: Option<f64>,
}

/// Whether a recipe's recorded cost reflects current ingredient prices.
///
/// Serialized flat into the recipe: a `costingStatus` string plus, when
/// outdated, the [`OutdatedCosting`] fields as siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "costingStatus", rename_all = "lowercase")]
pub enum CostingStatus {
    Accurate,
    Outdated(OutdatedCosting),
}

impl CostingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostingStatus::Accurate => "accurate",
            CostingStatus::Outdated(_) => "outdated",
        }
    }

    pub fn outdated(&self) -> Option<&OutdatedCosting> {
        match self {
            CostingStatus::Accurate => None,
            CostingStatus::Outdated(o) => Some(o),
        }
    }

    pub fn is_outdated(&self) -> bool {
        matches!(self, CostingStatus::Outdated(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: String,
    pub servings: u32,
    pub selling_price: f64,
    /// Ingredient id to per-serving quantity.
    pub ingredients: BTreeMap<String, RecipeIngredient>,
    pub actual_cost: f64,
    pub outdated_cost: f64,
    pub food_cost_percentage: f64,
    pub gross_profit: f64,
    pub popularity: Popularity,
    pub last_updated: IsoDate,
    pub last_cost_update: IsoDate,
    #[serde(flatten)]
    pub costing: CostingStatus,
}

impl Recipe {
    /// Monthly impact, or `None` for accurately costed recipes.
    pub fn monthly_impact(&self) -> Option<f64> {
        self.costing.outdated().map(|o| o.monthly_impact)
    }
}

/// Units sold of one recipe on one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub quantity: u32,
    pub revenue: f64,
}

/// Recipe id to the day's sales for that recipe.
pub type DailySales = BTreeMap<String, SaleLine>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub category: String,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSettings {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub currency: String,
    pub timezone: String,
    pub target_food_cost_percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::Month;

    fn recipe(costing: CostingStatus) -> Recipe {
        Recipe {
            id: "rec_x".to_string(),
            name: "Test Pizza".to_string(),
            category: "Pizza".to_string(),
            servings: 1,
            selling_price: 10.0,
            ingredients: BTreeMap::new(),
            actual_cost: 3.0,
            outdated_cost: 2.5,
            food_cost_percentage: 30.0,
            gross_profit: 7.0,
            popularity: Popularity::VeryHigh,
            last_updated: Date::from_calendar_date(2025, Month::September, 15)
                .unwrap()
                .into(),
            last_cost_update: Date::from_calendar_date(2025, Month::September, 15)
                .unwrap()
                .into(),
            costing,
        }
    }

    #[test]
    fn test_iso_date_format() {
        let date: IsoDate = "2025-11-01".parse().unwrap();
        assert_eq!(date.to_string(), "2025-11-01");
        assert!("2025-13-01".parse::<IsoDate>().is_err());
    }

    #[test]
    fn test_accurate_recipe_wire_form() {
        let value = serde_json::to_value(recipe(CostingStatus::Accurate)).unwrap();

        assert_eq!(value["costingStatus"], "accurate");
        assert_eq!(value["popularity"], "very-high");
        assert_eq!(value["lastCostUpdate"], "2025-09-15");
        assert!(value.get("monthlyImpact").is_none());
        assert!(value.get("costingIssue").is_none());
    }

    #[test]
    fn test_outdated_recipe_wire_form() {
        let r = recipe(CostingStatus::Outdated(OutdatedCosting {
            costing_issue: "Cheese went up".to_string(),
            outdated_food_cost_percentage: Some(25.0),
            outdated_gross_profit: Some(7.5),
            monthly_impact: -120.0,
            weekly_impact: -27.69,
            recommended_price: None,
        }));
        let value = serde_json::to_value(&r).unwrap();

        assert_eq!(value["costingStatus"], "outdated");
        assert_eq!(value["monthlyImpact"], json!(-120.0));
        assert!(value.get("recommendedPrice").is_none());

        let back: Recipe = serde_json::from_value(value).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_ingredient_optional_fields_omitted() {
        let value = json!({
            "id": "ing_x",
            "name": "Basil",
            "category": "Herbs",
            "unit": "bunch",
            "currentPrice": 2.5,
            "supplier": "Fresh Herbs Direct",
            "lastUpdated": "2025-11-10",
            "stockLevel": 8
        });
        let ingredient: Ingredient = serde_json::from_value(value.clone()).unwrap();
        assert!(ingredient.price_history.is_none());
        assert_eq!(serde_json::to_value(&ingredient).unwrap(), value);
    }
}
