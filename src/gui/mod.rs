//! GUI module - user interface components

mod app;
mod dashboard;
mod filter_panel;

pub use app::StressboardApp;
pub use dashboard::{Dashboard, DashboardAction, FilteredViews};
pub use filter_panel::FilterPanel;
