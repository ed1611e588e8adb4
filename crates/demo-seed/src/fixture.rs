//! The canonical demo dataset: a small pizzeria two weeks into November 2025.
//!
//! Four recipes are deliberately costed on stale prices (pepperoni, chicken and
//! parmesan all went up) so the demo has something to find.

use std::collections::BTreeMap;

use costing::{
    CostingStatus, DailySales, Dataset, Ingredient, IsoDate, OutdatedCosting, Popularity,
    PricePoint, Recipe, RecipeIngredient, RestaurantSettings, SaleLine, Supplier,
    ValidationError,
};
use time::Date;
use time::macros::date;

/// Root key the hierarchical store nests the dataset under.
pub const DEFAULT_ROOT_KEY: &str = "restaurant-demo-v1";

/// Key of the settings singleton inside the `settings` collection.
pub const SETTINGS_KEY: &str = "restaurant";

const PRICES_UPDATED: Date = date!(2025 - 11 - 10);

const RECIPE_ORDER: [&str; 6] = ["rec_001", "rec_002", "rec_003", "rec_004", "rec_005", "rec_006"];

/// Daily sales, one `(quantity, revenue)` pair per recipe in `RECIPE_ORDER`.
#[rustfmt::skip]
const DAILY_SALES: [(Date, [(u32, f64); 6]); 14] = [
    (date!(2025 - 11 - 01), [(32, 479.68), (45, 764.55), (40, 519.60), (30, 569.70), (18, 161.82), (47, 845.53)]),
    (date!(2025 - 11 - 02), [(35, 524.65), (48, 815.52), (38, 493.62), (28, 531.72), (20, 179.80), (45, 809.55)]),
    (date!(2025 - 11 - 03), [(38, 569.62), (52, 883.48), (42, 545.58), (32, 607.68), (22, 197.78), (50, 899.50)]),
    (date!(2025 - 11 - 04), [(30, 449.70), (42, 713.58), (35, 454.65), (26, 493.74), (16, 143.84), (40, 719.60)]),
    (date!(2025 - 11 - 05), [(40, 599.60), (55, 934.45), (45, 584.55), (35, 664.65), (24, 215.76), (52, 935.48)]),
    (date!(2025 - 11 - 06), [(42, 629.58), (58, 985.42), (48, 623.52), (38, 721.62), (26, 233.74), (55, 989.45)]),
    (date!(2025 - 11 - 07), [(36, 539.64), (50, 849.50), (42, 545.58), (32, 607.68), (22, 197.78), (48, 863.52)]),
    (date!(2025 - 11 - 08), [(34, 509.66), (46, 781.54), (40, 519.60), (30, 569.70), (20, 179.80), (44, 791.56)]),
    (date!(2025 - 11 - 09), [(32, 479.68), (44, 747.56), (38, 493.62), (28, 531.72), (18, 161.82), (42, 755.58)]),
    (date!(2025 - 11 - 10), [(38, 569.62), (52, 883.48), (44, 571.56), (34, 645.66), (24, 215.76), (50, 899.50)]),
    (date!(2025 - 11 - 11), [(36, 539.64), (48, 815.52), (42, 545.58), (32, 607.68), (22, 197.78), (46, 827.54)]),
    (date!(2025 - 11 - 12), [(40, 599.60), (54, 917.46), (46, 597.54), (36, 683.64), (26, 233.74), (52, 935.48)]),
    (date!(2025 - 11 - 13), [(42, 629.58), (56, 951.44), (48, 623.52), (38, 721.62), (28, 251.72), (54, 971.46)]),
    (date!(2025 - 11 - 14), [(34, 509.66), (46, 781.54), (40, 519.60), (30, 569.70), (20, 179.80), (44, 791.56)]),
];

/// Builds and validates the demo dataset.
pub fn demo_dataset() -> Result<Dataset, ValidationError> {
    Dataset::new(
        ingredients(),
        recipes(),
        sales(),
        suppliers(),
        restaurant_settings(),
    )
}

fn ingredient(
    id: &str,
    name: &str,
    category: &str,
    unit: &str,
    current_price: f64,
    supplier: &str,
    stock_level: u32,
) -> Ingredient {
    Ingredient {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        unit: unit.to_string(),
        current_price,
        supplier: supplier.to_string(),
        last_updated: PRICES_UPDATED.into(),
        stock_level,
        price_history: None,
        note: None,
    }
}

fn history(points: &[(Date, f64)]) -> Option<Vec<PricePoint>> {
    Some(
        points
            .iter()
            .map(|&(date, price)| PricePoint {
                date: date.into(),
                price,
            })
            .collect(),
    )
}

#[rustfmt::skip]
pub fn ingredients() -> Vec<Ingredient> {
    vec![
        Ingredient {
            price_history: history(&[
                (date!(2025 - 09 - 01), 11.80),
                (date!(2025 - 10 - 15), 12.20),
                (PRICES_UPDATED, 12.50),
            ]),
            ..ingredient("ing_001", "Mozzarella Cheese", "Dairy", "kg", 12.50, "Dairy Delights Co.", 25)
        },
        ingredient("ing_002", "Tomato Sauce", "Sauces", "L", 4.80, "Italian Imports", 15),
        ingredient("ing_003", "Pizza Dough", "Bakery", "kg", 3.20, "Fresh Bakers Inc.", 40),
        Ingredient {
            price_history: history(&[
                (date!(2025 - 09 - 01), 18.50),
                (date!(2025 - 10 - 01), 20.00),
                (PRICES_UPDATED, 22.50),
            ]),
            note: Some("Price increased 21% - recipe costs not updated!".to_string()),
            ..ingredient("ing_004", "Pepperoni", "Meat", "kg", 22.50, "Premium Meats Ltd.", 12)
        },
        ingredient("ing_005", "Basil", "Herbs", "bunch", 2.50, "Fresh Herbs Direct", 8),
        ingredient("ing_006", "Olive Oil", "Oils", "L", 15.00, "Mediterranean Oils", 10),
        Ingredient {
            price_history: history(&[(date!(2025 - 09 - 01), 14.00), (PRICES_UPDATED, 17.50)]),
            note: Some("Price jumped 25% - salad costs outdated!".to_string()),
            ..ingredient("ing_007", "Chicken Breast", "Meat", "kg", 17.50, "Fresh Poultry Co.", 18)
        },
        Ingredient {
            price_history: history(&[(date!(2025 - 09 - 01), 22.00), (PRICES_UPDATED, 28.00)]),
            note: Some("Price up 27% - quattro formaggi needs repricing!".to_string()),
            ..ingredient("ing_008", "Parmesan Cheese", "Dairy", "kg", 28.00, "Dairy Delights Co.", 8)
        },
        ingredient("ing_009", "Lettuce", "Vegetables", "head", 1.80, "Fresh Farms", 30),
        ingredient("ing_010", "Caesar Dressing", "Sauces", "L", 8.50, "Gourmet Sauces Inc.", 6),
    ]
}

fn uses(lines: &[(&str, f64, &str)]) -> BTreeMap<String, RecipeIngredient> {
    lines
        .iter()
        .map(|&(id, quantity, unit)| {
            (
                id.to_string(),
                RecipeIngredient {
                    quantity,
                    unit: unit.to_string(),
                },
            )
        })
        .collect()
}

/// Stored figures for one recipe: `(selling price, actual cost, recorded cost,
/// food-cost %, gross profit)`.
struct Figures(f64, f64, f64, f64, f64);

#[allow(clippy::too_many_arguments)]
fn recipe(
    id: &str,
    name: &str,
    category: &str,
    popularity: Popularity,
    costed_on: Date,
    ingredients: BTreeMap<String, RecipeIngredient>,
    Figures(selling_price, actual_cost, outdated_cost, food_cost_percentage, gross_profit): Figures,
    costing: CostingStatus,
) -> Recipe {
    let costed_on = IsoDate::from(costed_on);
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        servings: 1,
        selling_price,
        ingredients,
        actual_cost,
        outdated_cost,
        food_cost_percentage,
        gross_profit,
        popularity,
        last_updated: costed_on,
        last_cost_update: costed_on,
        costing,
    }
}

fn outdated(
    issue: &str,
    outdated_food_cost_percentage: f64,
    outdated_gross_profit: f64,
    monthly_impact: f64,
    weekly_impact: f64,
) -> OutdatedCosting {
    OutdatedCosting {
        costing_issue: issue.to_string(),
        outdated_food_cost_percentage: Some(outdated_food_cost_percentage),
        outdated_gross_profit: Some(outdated_gross_profit),
        monthly_impact,
        weekly_impact,
        recommended_price: None,
    }
}

pub fn recipes() -> Vec<Recipe> {
    vec![
        recipe(
            "rec_001",
            "Margherita Pizza",
            "Pizza",
            Popularity::High,
            PRICES_UPDATED,
            uses(&[
                ("ing_001", 0.15, "kg"),
                ("ing_002", 0.12, "L"),
                ("ing_003", 0.25, "kg"),
                ("ing_005", 0.1, "bunch"),
                ("ing_006", 0.02, "L"),
            ]),
            Figures(14.99, 4.27, 4.27, 28.5, 10.72),
            CostingStatus::Accurate,
        ),
        recipe(
            "rec_002",
            "Pepperoni Pizza",
            "Pizza",
            Popularity::VeryHigh,
            date!(2025 - 09 - 15),
            uses(&[
                ("ing_001", 0.15, "kg"),
                ("ing_002", 0.12, "L"),
                ("ing_003", 0.25, "kg"),
                ("ing_004", 0.13, "kg"),
            ]),
            Figures(16.99, 7.43, 5.57, 43.7, 9.56),
            CostingStatus::Outdated(outdated(
                "Pepperoni price increased 21% but recipe cost not updated - losing $1.86 profit per pizza!",
                32.8,
                11.42,
                -837.00,
                -193.00,
            )),
        ),
        recipe(
            "rec_003",
            "Chicken Caesar Salad",
            "Salads",
            Popularity::Medium,
            date!(2025 - 09 - 01),
            uses(&[
                ("ing_007", 0.18, "kg"),
                ("ing_008", 0.04, "kg"),
                ("ing_009", 1.0, "head"),
                ("ing_010", 0.05, "L"),
            ]),
            Figures(12.99, 5.47, 3.82, 42.1, 7.52),
            CostingStatus::Outdated(outdated(
                "Chicken price up 25%, Parmesan up 27% - recipe showing 29% cost but actually 42%!",
                29.4,
                9.17,
                -660.00,
                -152.00,
            )),
        ),
        recipe(
            "rec_004",
            "Quattro Formaggi Pizza",
            "Pizza",
            Popularity::Medium,
            date!(2025 - 09 - 01),
            uses(&[
                ("ing_001", 0.12, "kg"),
                ("ing_002", 0.10, "L"),
                ("ing_003", 0.25, "kg"),
                ("ing_008", 0.11, "kg"),
            ]),
            Figures(18.99, 8.59, 6.37, 45.2, 10.40),
            CostingStatus::Outdated(OutdatedCosting {
                recommended_price: Some(21.99),
                ..outdated(
                    "Parmesan up 27% - this premium pizza now costs 45% to make, needs immediate repricing to $21.99",
                    33.5,
                    12.62,
                    -666.00,
                    -154.00,
                )
            }),
        ),
        recipe(
            "rec_005",
            "Garden Salad",
            "Salads",
            Popularity::Medium,
            PRICES_UPDATED,
            uses(&[
                ("ing_009", 1.0, "head"),
                ("ing_005", 0.05, "bunch"),
                ("ing_006", 0.02, "L"),
            ]),
            Figures(8.99, 2.32, 2.32, 25.8, 6.67),
            CostingStatus::Accurate,
        ),
        recipe(
            "rec_006",
            "BBQ Chicken Pizza",
            "Pizza",
            Popularity::High,
            date!(2025 - 09 - 01),
            uses(&[
                ("ing_001", 0.15, "kg"),
                ("ing_007", 0.14, "kg"),
                ("ing_003", 0.25, "kg"),
            ]),
            Figures(17.99, 5.53, 4.18, 30.7, 12.46),
            CostingStatus::Outdated(outdated(
                "Chicken price increased 25% - losing $1.35 per pizza on bestseller!",
                23.2,
                13.81,
                -637.00,
                -147.00,
            )),
        ),
    ]
}

pub fn sales() -> BTreeMap<IsoDate, DailySales> {
    DAILY_SALES
        .iter()
        .map(|(date, lines)| {
            let day: DailySales = RECIPE_ORDER
                .iter()
                .zip(lines)
                .map(|(&recipe, &(quantity, revenue))| {
                    (recipe.to_string(), SaleLine { quantity, revenue })
                })
                .collect();
            (IsoDate::from(*date), day)
        })
        .collect()
}

fn supplier(
    id: &str,
    name: &str,
    contact: &str,
    email: &str,
    phone: &str,
    category: &str,
    rating: f64,
) -> Supplier {
    Supplier {
        id: id.to_string(),
        name: name.to_string(),
        contact: contact.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        category: category.to_string(),
        rating,
    }
}

#[rustfmt::skip]
pub fn suppliers() -> Vec<Supplier> {
    vec![
        supplier("sup_001", "Dairy Delights Co.", "John Smith", "orders@dairydelights.com", "+1-555-0101", "Dairy Products", 4.5),
        supplier("sup_002", "Italian Imports", "Maria Romano", "sales@italianimpports.com", "+1-555-0102", "Sauces & Condiments", 4.8),
        supplier("sup_003", "Fresh Bakers Inc.", "David Chen", "orders@freshbakers.com", "+1-555-0103", "Bakery", 4.6),
        supplier("sup_004", "Premium Meats Ltd.", "Robert Johnson", "info@premiummeats.com", "+1-555-0104", "Meat & Poultry", 4.7),
        supplier("sup_005", "Fresh Farms", "Sarah Green", "contact@freshfarms.com", "+1-555-0105", "Produce", 4.4),
    ]
}

pub fn restaurant_settings() -> RestaurantSettings {
    RestaurantSettings {
        name: "Demo Pizzeria".to_string(),
        address: "123 Main Street, Demo City".to_string(),
        phone: "+1-555-DEMO".to_string(),
        email: "info@demopizzeria.com".to_string(),
        currency: "USD".to_string(),
        timezone: "America/New_York".to_string(),
        target_food_cost_percentage: 30.0,
    }
}
