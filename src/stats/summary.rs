//! Summary Calculator Module
//! Read-only aggregation over the filtered record set. Everything here is
//! recomputed from scratch on every render cycle.

use crate::data::StressRecord;
use std::collections::BTreeMap;

/// Rows shown in the top-stressed table.
pub const TOP_TABLE_ROWS: usize = 10;
/// Rows sampled into the copilot prompt.
pub const PROMPT_SAMPLE_ROWS: usize = 5;

/// Mean stress index for one time period.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub period: String,
    pub mean_index: f64,
}

/// Count of records at one stress level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCount {
    pub level: String,
    pub count: usize,
}

/// Stress-level distribution restricted to the latest period present in
/// the filtered set.
#[derive(Debug, Clone)]
pub struct LatestDistribution {
    pub period: String,
    pub counts: Vec<LevelCount>,
}

/// Summary statistics of the filtered set, fed to the copilot prompt.
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub record_count: usize,
    pub mean_index: Option<f64>,
    pub max_index: Option<f64>,
    pub level_counts: BTreeMap<String, usize>,
}

/// Computes the three dashboard views and the prompt summary.
pub struct SummaryCalculator;

impl SummaryCalculator {
    /// Records ranked by stress index descending, truncated to `n`.
    ///
    /// The sort is stable, so equal indices keep their input order and the
    /// output is deterministic for a fixed file.
    pub fn top_ranked(records: &[StressRecord], n: usize) -> Vec<StressRecord> {
        let mut ranked = records.to_vec();
        ranked.sort_by(|a, b| {
            b.stress_index
                .partial_cmp(&a.stress_index)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(n);
        ranked
    }

    /// Mean stress index per time period, ordered by period label.
    ///
    /// Ordering is lexical over the raw labels; ISO-style labels such as
    /// "2024-02" sort chronologically, month names would not.
    pub fn trend_series(records: &[StressRecord]) -> Vec<TrendPoint> {
        let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        for record in records {
            let entry = groups.entry(record.time_period.as_str()).or_insert((0.0, 0));
            entry.0 += record.stress_index;
            entry.1 += 1;
        }

        groups
            .into_iter()
            .map(|(period, (sum, count))| TrendPoint {
                period: period.to_string(),
                mean_index: sum / count as f64,
            })
            .collect()
    }

    /// Stress-level counts for the latest (lexically greatest) period in
    /// the filtered set, sorted by level label. `None` when the set is
    /// empty.
    pub fn latest_distribution(records: &[StressRecord]) -> Option<LatestDistribution> {
        let latest = records
            .iter()
            .map(|r| r.time_period.as_str())
            .max()?
            .to_string();

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in records.iter().filter(|r| r.time_period == latest) {
            *counts.entry(record.stress_level.label()).or_insert(0) += 1;
        }

        Some(LatestDistribution {
            period: latest,
            counts: counts
                .into_iter()
                .map(|(level, count)| LevelCount {
                    level: level.to_string(),
                    count,
                })
                .collect(),
        })
    }

    /// Count, mean, maximum, and per-level breakdown of the filtered set.
    pub fn summarize(records: &[StressRecord]) -> DatasetSummary {
        let record_count = records.len();

        let (mean_index, max_index) = if record_count == 0 {
            (None, None)
        } else {
            let sum: f64 = records.iter().map(|r| r.stress_index).sum();
            let max = records
                .iter()
                .map(|r| r.stress_index)
                .fold(f64::NEG_INFINITY, f64::max);
            (Some(sum / record_count as f64), Some(max))
        };

        let mut level_counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in records {
            *level_counts
                .entry(record.stress_level.label().to_string())
                .or_insert(0) += 1;
        }

        DatasetSummary {
            record_count,
            mean_index,
            max_index,
            level_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StressLevel;

    fn record(region: &str, sub_region: &str, period: &str, dsi: f64, level: &str) -> StressRecord {
        StressRecord::new(
            region.to_string(),
            sub_region.to_string(),
            period.to_string(),
            dsi,
            StressLevel::from_label(level),
            None,
            None,
        )
    }

    fn fixture() -> Vec<StressRecord> {
        vec![
            record("StateA", "D1", "2024-01", 90.0, "Extreme"),
            record("StateA", "D2", "2024-01", 40.0, "Low"),
            record("StateB", "D3", "2024-02", 70.0, "High"),
        ]
    }

    #[test]
    fn top_ranking_sorts_descending_and_truncates() {
        let records = fixture();
        let top = SummaryCalculator::top_ranked(&records, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].sub_region, "D1");
        assert_eq!(top[1].sub_region, "D3");

        let all = SummaryCalculator::top_ranked(&records, 10);
        assert_eq!(all.len(), records.len());
    }

    #[test]
    fn top_ranking_breaks_ties_by_input_order() {
        let records = vec![
            record("StateA", "D1", "2024-01", 70.0, "High"),
            record("StateA", "D2", "2024-01", 70.0, "High"),
            record("StateA", "D3", "2024-01", 70.0, "High"),
        ];
        let top = SummaryCalculator::top_ranked(&records, 3);
        let order: Vec<&str> = top.iter().map(|r| r.sub_region.as_str()).collect();
        assert_eq!(order, vec!["D1", "D2", "D3"]);
    }

    #[test]
    fn trend_means_per_period() {
        let records = fixture();
        let series = SummaryCalculator::trend_series(&records);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].period, "2024-01");
        assert!((series[0].mean_index - 65.0).abs() < 1e-9);
        assert_eq!(series[1].period, "2024-02");
        assert!((series[1].mean_index - 70.0).abs() < 1e-9);
    }

    #[test]
    fn single_record_period_mean_is_exact() {
        let records = vec![record("StateB", "D3", "2024-02", 70.0, "High")];
        let series = SummaryCalculator::trend_series(&records);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].mean_index, 70.0);
    }

    #[test]
    fn latest_distribution_uses_greatest_period() {
        let records = fixture();
        let dist = SummaryCalculator::latest_distribution(&records).unwrap();
        assert_eq!(dist.period, "2024-02");
        assert_eq!(
            dist.counts,
            vec![LevelCount {
                level: "High".to_string(),
                count: 1
            }]
        );
    }

    #[test]
    fn empty_set_yields_empty_views_without_error() {
        let records: Vec<StressRecord> = Vec::new();
        assert!(SummaryCalculator::top_ranked(&records, 10).is_empty());
        assert!(SummaryCalculator::trend_series(&records).is_empty());
        assert!(SummaryCalculator::latest_distribution(&records).is_none());

        let summary = SummaryCalculator::summarize(&records);
        assert_eq!(summary.record_count, 0);
        assert!(summary.mean_index.is_none());
        assert!(summary.max_index.is_none());
        assert!(summary.level_counts.is_empty());
    }

    #[test]
    fn summary_counts_every_level() {
        let records = fixture();
        let summary = SummaryCalculator::summarize(&records);
        assert_eq!(summary.record_count, 3);
        assert!((summary.mean_index.unwrap() - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.max_index.unwrap(), 90.0);
        assert_eq!(summary.level_counts.get("Extreme"), Some(&1));
        assert_eq!(summary.level_counts.get("Low"), Some(&1));
        assert_eq!(summary.level_counts.get("High"), Some(&1));
    }
}
