//! Dashboard module
//!
//! Provides an overview page summarising a month's income and expenses by
//! category, with links to the months either side of it.

mod cards;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
