//! Stats module - filtered-view aggregation

mod summary;

pub use summary::{
    DatasetSummary, LatestDistribution, LevelCount, SummaryCalculator, TrendPoint,
    PROMPT_SAMPLE_ROWS, TOP_TABLE_ROWS,
};
