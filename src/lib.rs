//! primdb - a minimal single-user record store
//!
//! This crate provides:
//! - A line-oriented command language (create_table, insert, select, ...)
//! - Typed tables with int, str and bool columns
//! - Per-table file persistence plus a schema catalog
//! - An interactive shell

pub mod cli;
pub mod config;
pub mod error;
pub mod sql;
pub mod storage;
