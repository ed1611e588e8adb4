//! Demo data seeding for VenueIQ.
//!
//! Loads the fixed demo restaurant (ingredients, recipes with stale costings,
//! two weeks of sales, suppliers and settings) into one of two backends:
//!
//! - a document store, one keyed document per record, committed as a single
//!   atomic batch ([`seeder::DocumentSeeder`])
//! - a hierarchical JSON store, the whole dataset nested under one root key and
//!   written with a single overwrite ([`seeder::TreeSeeder`])
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use demo_seed::prelude::*;
//!
//! let dataset = demo_dataset()?;
//! let seeder = DocumentSeeder::new(MemoryStore::new());
//! let report = seeder.seed(&dataset).await?;
//! report.log_summary();
//! ```

pub mod config;
pub mod credentials;
pub mod documents;
pub mod error;
pub mod fixture;
pub mod report;
pub mod seeder;
pub mod store;
pub mod tree;

#[cfg(test)]
mod test_support;

pub use costing::Dataset;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{DocumentStoreConfig, PlaceholderPolicy, TreeStoreConfig};
    pub use crate::error::SeedError;
    pub use crate::fixture::{DEFAULT_ROOT_KEY, demo_dataset};
    pub use crate::report::SeedReport;
    pub use crate::seeder::{DocumentSeeder, HttpTreeWriter, TreeSeeder};
    pub use crate::store::{DocumentStore, FirestoreStore, MemoryStore, WriteBatch};
    pub use crate::tree::{load_tree, to_tree, write_tree};
    pub use crate::Dataset;
}

/// Logs a failed run with its remediation hints and returns the exit status.
pub fn report_failure(err: &anyhow::Error) -> std::process::ExitCode {
    tracing::error!("Seeding failed: {err:#}");
    match err.downcast_ref::<error::SeedError>() {
        Some(seed_err) => {
            for hint in seed_err.remediation() {
                tracing::error!("  - {hint}");
            }
            std::process::ExitCode::from(seed_err.exit_code())
        }
        None => std::process::ExitCode::FAILURE,
    }
}

/// Installs the `RUST_LOG`-driven subscriber used by the binaries.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
