//! Uploads the demo dataset to the hierarchical store as one JSON tree.
//!
//! Run with:
//! ```
//! DEMO_FIREBASE_DATABASE_URL=https://<project>.firebaseio.com \
//!     cargo run -p demo-seed --bin seed-tree [tree.json]
//! ```
//!
//! Without a path the tree is built from the built-in dataset.

use std::path::PathBuf;
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
    let config = TreeStoreConfig::from_env();
    // Fail on a placeholder endpoint before reading or building anything.
    config.validate()?;

    let tree = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => load_tree(&path, &config.root_key)?,
        None => to_tree(&demo_dataset().map_err(SeedError::from)?, &config.root_key)?,
    };

    tracing::info!("Uploading demo data to the hierarchical store...");
    let report = TreeSeeder::new(config, HttpTreeWriter::default())
        .seed(&tree)
        .await?;

    tracing::info!("Demo data uploaded successfully!");
    report.log_summary();
    Ok(())
}
