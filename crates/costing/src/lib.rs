//! Menu costing model for the VenueIQ demo.
//!
//! Pure types and arithmetic, no I/O: ingredients with their price history,
//! recipes with actual vs. recorded cost, daily sales, suppliers and the
//! restaurant settings singleton. [`Dataset`] ties them together and refuses
//! to exist unless the derived figures agree with each other.
//!
//! ```rust,ignore
//! let dataset = Dataset::new(ingredients, recipes, sales, suppliers, settings)?;
//! println!("losing ${:.0}/month", dataset.monthly_loss());
//! ```

pub mod costing;
pub mod dataset;
pub mod models;
pub mod validation;

pub use dataset::Dataset;
pub use models::{
    CostingStatus, DailySales, Ingredient, IsoDate, OutdatedCosting, Popularity, PricePoint,
    Recipe, RecipeIngredient, RestaurantSettings, SaleLine, Supplier,
};
pub use validation::ValidationError;
