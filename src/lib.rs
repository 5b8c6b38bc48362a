//! fintrack - personal finance tracking from the terminal
//!
//! This library provides the core functionality for fintrack: recording
//! income and expense transactions, setting monthly per-category budgets,
//! and deriving reports such as monthly totals, category breakdowns,
//! budget-vs-actual comparisons and spending insights.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, categories, months)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `reports`: Aggregations over transactions and budgets
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers
//! - `tui`: Interactive dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::{FintrackPaths, Settings};
//! use fintrack::storage::Storage;
//! use fintrack::reports::Overview;
//!
//! let paths = FintrackPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! println!("{}", Overview::generate(&storage)?.format_terminal(&settings.currency_symbol));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{FintrackError, FintrackResult};
