//! Command-line interface for the `wpos-expenses` binary.
//!
//! Parses arguments into [`ExpenseCommands`] and runs them against an
//! [`ExpenseItemRepository`](crate::repository::ExpenseItemRepository).

mod commands;
mod errors;
mod help;


pub use commands::ExpenseCommands;
pub use errors::CommandParseError;
pub use help::help_text;
