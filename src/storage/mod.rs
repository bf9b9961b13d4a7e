//! Storage backend.
//!
//! This module provides:
//! - `SQLite` pool management and migrations
//! - The [`DbAccess`](crate::traits::DbAccess) implementation repositories run on
//! - Parent expense operations
//!
//! # Architecture
//!
//! The storage layer uses `SQLite` with the `sqlx` crate for async operations.
//! The pool runs in WAL mode so readers do not block the writer.
//!
//! - `core`: Pool management, migrations, and error classification
//! - `access`: Parameterized statement execution and row decoding
//! - `expense`: Expense CRUD operations
//!
//! # Example
//!
//! ```ignore
//! use wpos_expenses::storage::SqliteStorage;
//!
//! let storage = SqliteStorage::new("./data/expenses.db").await?;
//! let rent = storage.create_expense("Rent").await?;
//! ```

mod access;
mod core;
mod expense;
mod types;

pub use self::core::SqliteStorage;
pub use types::Expense;
