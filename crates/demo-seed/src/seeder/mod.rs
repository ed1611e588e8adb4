//! The two seeders.
//!
//! - [`DocumentSeeder`]: one keyed document per record, committed as one atomic batch.
//! - [`TreeSeeder`]: the whole dataset as one JSON tree, written with a single PUT.
//!
//! Both are one-shot: one network operation, no retries, and re-running them
//! overwrites the same keys.

mod document;
mod tree;

pub use document::DocumentSeeder;
pub use tree::{HttpTreeWriter, TreeResponse, TreeSeeder, TreeWriter};
