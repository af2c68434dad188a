//! Persistence for the catalog and the per-table record collections
//!
//! - `engine`: the `Engine` trait, byte-level reads and writes plus the typed
//!   load/save operations built on top of them
//! - `memory`: in-memory engine used by tests
//! - `file`: one file per table plus a catalog file in a data directory

use serde::{Deserialize, Serialize};

pub mod engine;
pub mod file;
pub mod memory;

/// Storage unit identifiers
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    /// The schema catalog
    Catalog,
    /// Record collection of the named table
    Table(String),
}
