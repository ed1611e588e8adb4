//! Writes the demo dataset as a JSON tree for `seed-tree` or manual import.
//!
//! Run with:
//! ```
//! cargo run -p demo-seed --bin export-tree -- demo-data/seed-data.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use demo_seed::prelude::*;

fn main() -> ExitCode {
    demo_seed::init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => demo_seed::report_failure(&err),
    }
}

fn run() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: export-tree <output.json>")?;
    let root_key = TreeStoreConfig::from_env().root_key;

    let tree = to_tree(&demo_dataset().map_err(SeedError::from)?, &root_key)?;
    write_tree(&path, &tree)?;

    let report = SeedReport::from_tree(&tree, &root_key)?;
    tracing::info!("Wrote {}", path.display());
    report.log_summary();
    Ok(())
}
