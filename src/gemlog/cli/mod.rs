//! # CLI Layer
//!
//! One client of the gemlog library, and the only code that touches the
//! terminal: it parses arguments, sets up logging, launches the editor, prints
//! results and turns errors into exit codes.
//!
//! - `setup.rs`: clap definitions
//! - `commands.rs`: context wiring and per-command handlers
//! - `print.rs`: colored output

mod commands;
mod print;
mod setup;

pub use commands::run;
pub(crate) use print::print_error;
