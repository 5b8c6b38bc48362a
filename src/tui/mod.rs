//! Terminal User Interface module
//!
//! An interactive dashboard built on ratatui: overview totals and charts,
//! a transaction list and a per-month budget view, with confirm and help
//! dialogs.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
