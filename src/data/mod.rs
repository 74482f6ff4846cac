//! Data module - dataset loading, typed records, and filtering

mod filter;
mod loader;
mod model;

pub use filter::FilterSelection;
pub use loader::{Dataset, LoaderError, REQUIRED_COLUMNS};
pub use model::{StressLevel, StressRecord, UNSPECIFIED};
