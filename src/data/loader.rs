//! Dataset Loader Module
//! Reads the stress-indicator CSV once per process and materializes typed
//! records using Polars.

use crate::data::model::{StressLevel, StressRecord};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns that must be present for the dashboard to render at all.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "region",
    "sub_region",
    "time_period",
    "stress_index",
    "stress_level",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read dataset: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// The process-lifetime dataset. Loaded exactly once at startup and
/// immutable afterwards; filter changes never trigger a reload and nothing
/// is ever written back to the source file.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<StressRecord>,
    pub source: PathBuf,
    /// Whether the optional presentation columns came from the file
    /// rather than the static mappings.
    pub action_from_file: bool,
    pub priority_from_file: bool,
}

impl Dataset {
    /// Load and validate the CSV at `path`.
    ///
    /// Fails fast: an unreadable file or a missing required column aborts
    /// before any records are produced.
    pub fn load(path: &Path) -> Result<Dataset, LoaderError> {
        let path_str = path.to_string_lossy().to_string();

        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(&path_str)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        validate_required_columns(&df)?;

        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let action_from_file = present.iter().any(|c| c == "recommended_action");
        let priority_from_file = present.iter().any(|c| c == "priority_level");

        let records = materialize_records(&df)?;

        Ok(Dataset {
            records,
            source: path.to_path_buf(),
            action_from_file,
            priority_from_file,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct region values, sorted, for the filter selector.
    pub fn regions(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|r| r.region.as_str()))
    }

    /// Distinct time-period values, sorted, for the filter selector.
    pub fn periods(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|r| r.time_period.as_str()))
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values.map(|v| v.to_string()).collect();
    out.sort();
    out.dedup();
    out
}

/// Compute required − present; a non-empty difference halts everything
/// downstream (no partial dashboard).
fn validate_required_columns(df: &DataFrame) -> Result<(), LoaderError> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !present.iter().any(|p| p == *required))
        .map(|required| required.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(LoaderError::MissingColumns(missing));
    }
    Ok(())
}

/// Convert the DataFrame into typed records, merging the optional
/// presentation columns where the file provides them. Rows with null
/// required fields or a non-numeric stress index are skipped.
fn materialize_records(df: &DataFrame) -> Result<Vec<StressRecord>, LoaderError> {
    let region_col = df.column("region")?;
    let sub_region_col = df.column("sub_region")?;
    let period_col = df.column("time_period")?;
    let level_col = df.column("stress_level")?;
    let index_f64 = df.column("stress_index")?.cast(&DataType::Float64)?;
    let index_ca = index_f64.f64()?;

    let action_col = df.column("recommended_action").ok();
    let priority_col = df.column("priority_level").ok();

    let mut records = Vec::with_capacity(df.height());

    for i in 0..df.height() {
        if let (Ok(region), Ok(sub_region), Ok(period), Ok(level), Some(dsi)) = (
            region_col.get(i),
            sub_region_col.get(i),
            period_col.get(i),
            level_col.get(i),
            index_ca.get(i),
        ) {
            if region.is_null()
                || sub_region.is_null()
                || period.is_null()
                || level.is_null()
                || dsi.is_nan()
            {
                continue;
            }

            records.push(StressRecord::new(
                clean_value(&region),
                clean_value(&sub_region),
                clean_value(&period),
                dsi,
                StressLevel::from_label(&clean_value(&level)),
                optional_value(action_col, i),
                optional_value(priority_col, i),
            ));
        }
    }

    Ok(records)
}

fn clean_value(value: &AnyValue) -> String {
    value.to_string().trim_matches('"').to_string()
}

fn optional_value(column: Option<&Column>, i: usize) -> Option<String> {
    let value = column?.get(i).ok()?;
    if value.is_null() {
        None
    } else {
        Some(clean_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn frame(columns: Vec<Column>) -> DataFrame {
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn missing_columns_are_reported_exactly() {
        let df = frame(vec![
            Column::new("region".into(), vec!["StateA"]),
            Column::new("sub_region".into(), vec!["D1"]),
            Column::new("time_period".into(), vec!["2024-01"]),
            Column::new("stress_index".into(), vec![90.0]),
        ]);

        let err = validate_required_columns(&df).unwrap_err();
        match err {
            LoaderError::MissingColumns(missing) => {
                assert_eq!(missing, vec!["stress_level".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn all_required_columns_pass_validation() {
        let df = frame(vec![
            Column::new("region".into(), vec!["StateA"]),
            Column::new("sub_region".into(), vec!["D1"]),
            Column::new("time_period".into(), vec!["2024-01"]),
            Column::new("stress_index".into(), vec![90.0]),
            Column::new("stress_level".into(), vec!["Extreme"]),
        ]);

        assert!(validate_required_columns(&df).is_ok());
    }

    #[test]
    fn materialize_enriches_without_dropping_rows() {
        let df = frame(vec![
            Column::new("region".into(), vec!["StateA", "StateA", "StateB"]),
            Column::new("sub_region".into(), vec!["D1", "D2", "D3"]),
            Column::new("time_period".into(), vec!["2024-01", "2024-01", "2024-02"]),
            Column::new("stress_index".into(), vec![90.0, 40.0, 70.0]),
            Column::new("stress_level".into(), vec!["Extreme", "Low", "High"]),
        ]);

        let records = materialize_records(&df).unwrap();
        assert_eq!(records.len(), df.height());
        assert_eq!(
            records[0].recommended_action,
            "Immediate audit and targeted intervention drive"
        );
        assert_eq!(records[1].priority_level, "Low Priority");
        assert_eq!(records[2].priority_level, "High Priority");
    }

    #[test]
    fn file_provided_action_column_is_not_overwritten() {
        let df = frame(vec![
            Column::new("region".into(), vec!["StateA"]),
            Column::new("sub_region".into(), vec!["D1"]),
            Column::new("time_period".into(), vec!["2024-01"]),
            Column::new("stress_index".into(), vec![90.0]),
            Column::new("stress_level".into(), vec!["Extreme"]),
            Column::new("recommended_action".into(), vec!["Escalate to task force"]),
        ]);

        let records = materialize_records(&df).unwrap();
        assert_eq!(records[0].recommended_action, "Escalate to task force");
    }
}
