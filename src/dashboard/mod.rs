//! Dashboard module
//!
//! Provides the monthly overview page showing the expense table, summary
//! cards, and charts for a selected month.

mod cards;
mod charts;
mod handlers;
mod report;
mod tables;

pub use handlers::{DashboardState, get_dashboard_page};
