//! WPOS Expenses
//!
//! Data access for point-of-sale expense items: the line entries
//! (amount, reference code, location, user, timestamp) recorded against
//! named expense categories.
//!
//! # Features
//!
//! - Typed CRUD over `expenses_items` via [`repository::ExpenseItemRepository`]
//! - Joined reads that carry the parent expense name
//! - Reference lookups by single code or set, with numeric validation
//! - Fully parameterized SQL, including IN-lists
//! - `SQLite` persistence with WAL and embedded migrations
//!
//! # Quick Start
//!
//! ```bash
//! DATABASE_PATH=./data/expenses.db ./wpos-expenses list --location 1
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   Statement   ┌──────────┐   sqlx    ┌────────┐
//! │  Repository  │──────────────▶│ DbAccess │──────────▶│ SQLite │
//! │ (SQL + args) │◀──────────────│  (trait) │◀──────────│        │
//! └──────────────┘     Rows      └──────────┘           └────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod repository;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod test_utils;
