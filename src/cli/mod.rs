//! # primdb CLI Module
//!
//! Interactive shell for primdb:
//!
//! - `repl`: read loop over rustyline, one command per line
//! - `output`: turns a `ResultSet` into the text shown to the user
//! - `table`: ASCII table formatter for selected records
//!
//! Errors are printed and the loop continues. `exit`, Ctrl+C, Ctrl+D or
//! end of input leave the shell.

pub mod output;
pub mod repl;
pub mod table;

pub use repl::Repl;
