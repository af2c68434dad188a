//! # Configuration
//!
//! Command-line options of the `primdb` binary. Every option can also be set
//! through an environment variable:
//!
//! | Option          | Variable           | Default                   |
//! |-----------------|--------------------|---------------------------|
//! | `--data-dir`    | `PRIMDB_DATA_DIR`  | `data`                    |
//! | `--catalog`     | `PRIMDB_CATALOG`   | `db_meta.bin`             |
//! | `--history`     | `PRIMDB_HISTORY`   | `$HOME/.primdb_history`   |
//!
//! An empty history path disables history persistence.

use std::{env, path::PathBuf};

use clap::Parser;

use crate::storage::file::FileEngine;

const DEFAULT_HISTORY_FILE: &str = ".primdb_history";

#[derive(Debug, Clone, Parser)]
#[command(name = "primdb", version, about = "A minimal single-user record store")]
pub struct Config {
    /// Directory holding the catalog and one file per table
    #[arg(long, env = "PRIMDB_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Catalog file name inside the data directory
    #[arg(long = "catalog", env = "PRIMDB_CATALOG", default_value = "db_meta.bin")]
    pub catalog_file: String,

    /// Line editor history file, empty to disable
    #[arg(long, env = "PRIMDB_HISTORY")]
    pub history: Option<String>,
}

impl Config {
    pub fn storage(&self) -> FileEngine {
        FileEngine::new(&self.data_dir, &self.catalog_file)
    }

    pub fn history_path(&self) -> Option<PathBuf> {
        match self.history.as_deref() {
            Some("") => None,
            Some(path) => Some(PathBuf::from(path)),
            None => home_dir().map(|home| home.join(DEFAULT_HISTORY_FILE)),
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    env::var("HOME").ok().map(PathBuf::from)
}
