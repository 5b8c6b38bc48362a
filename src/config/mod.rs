//! Configuration module for fintrack
//!
//! This module provides configuration management including:
//! - Per-user path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FintrackPaths;
pub use settings::Settings;
