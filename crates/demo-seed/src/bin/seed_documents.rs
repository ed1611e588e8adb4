//! Seeds the demo dataset into the document store.
//!
//! Run with:
//! ```
//! cargo run -p demo-seed --bin seed-documents
//! cargo run -p demo-seed --bin seed-documents -- --dry-run
//! ```
//!
//! `--dry-run` commits into an in-memory store instead of Firestore.

use std::process::ExitCode;

use demo_seed::prelude::*;

#[tokio::main]
async fn main() -> ExitCode {
    demo_seed::init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => demo_seed::report_failure(&err),
    }
}

async fn run() -> anyhow::Result<()> {
    let dry_run = std::env::args().skip(1).any(|arg| arg == "--dry-run");

    tracing::info!("Seeding demo data into the document store...");
    let dataset = demo_dataset().map_err(SeedError::from)?;

    let report = if dry_run {
        tracing::info!("Dry run: committing to an in-memory store");
        DocumentSeeder::new(MemoryStore::new()).seed(&dataset).await?
    } else {
        let store = FirestoreStore::connect(&DocumentStoreConfig::from_env())?;
        DocumentSeeder::new(store).seed(&dataset).await?
    };

    tracing::info!("Demo data seeded successfully!");
    report.log_summary();
    Ok(())
}
