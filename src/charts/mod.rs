//! Charts module - chart rendering

mod plotter;

pub use plotter::{level_color, ChartPlotter};
