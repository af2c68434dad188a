//! Command processing module
//!
//! This module provides:
//! - `parser`: shell-style lexer, clause parsing and command statements
//! - `types`: column types, values and literal coercion
//! - `schema`: table, column and catalog definitions
//! - `executor`: the record engine and one executor per command
//! - `engine`: the session that dispatches command lines

pub mod parser;
pub mod types;
pub mod schema;
pub mod executor;
pub mod engine;
