//! Typed Record Model
//! Stress records and the fixed policy mappings derived from stress level.

use std::fmt;

/// Categorical stress bucket, computed upstream of this dashboard.
///
/// Labels outside the four known buckets are carried verbatim in `Other`
/// so the original value still shows in tables; policy lookups for them
/// resolve to [`UNSPECIFIED`] instead of an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StressLevel {
    Extreme,
    High,
    Moderate,
    Low,
    Other(String),
}

/// Sentinel for policy lookups on unmapped stress levels.
pub const UNSPECIFIED: &str = "Unspecified";

impl StressLevel {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Extreme" => StressLevel::Extreme,
            "High" => StressLevel::High,
            "Moderate" => StressLevel::Moderate,
            "Low" => StressLevel::Low,
            other => StressLevel::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StressLevel::Extreme => "Extreme",
            StressLevel::High => "High",
            StressLevel::Moderate => "Moderate",
            StressLevel::Low => "Low",
            StressLevel::Other(label) => label,
        }
    }

    /// Fixed policy interpretation. Presentation only, never recomputed
    /// from the stress index.
    pub fn recommended_action(&self) -> &str {
        match self {
            StressLevel::Extreme => "Immediate audit and targeted intervention drive",
            StressLevel::High => "Closer monitoring and operational review",
            StressLevel::Moderate => "Routine monitoring",
            StressLevel::Low => "No action required",
            StressLevel::Other(_) => UNSPECIFIED,
        }
    }

    /// Collapses the four stress levels into three priority tiers.
    pub fn priority_level(&self) -> &str {
        match self {
            StressLevel::Extreme | StressLevel::High => "High Priority",
            StressLevel::Moderate => "Medium Priority",
            StressLevel::Low => "Low Priority",
            StressLevel::Other(_) => UNSPECIFIED,
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row per (region, sub-region, time period).
#[derive(Debug, Clone)]
pub struct StressRecord {
    pub region: String,
    pub sub_region: String,
    pub time_period: String,
    pub stress_index: f64,
    pub stress_level: StressLevel,
    pub recommended_action: String,
    pub priority_level: String,
}

impl StressRecord {
    /// Build a record, merging the two optional presentation columns:
    /// a value read from the source file wins, the static mapping fills
    /// the gap. Enrichment never changes the row count.
    pub fn new(
        region: String,
        sub_region: String,
        time_period: String,
        stress_index: f64,
        stress_level: StressLevel,
        recommended_action: Option<String>,
        priority_level: Option<String>,
    ) -> Self {
        let recommended_action = recommended_action
            .unwrap_or_else(|| stress_level.recommended_action().to_string());
        let priority_level =
            priority_level.unwrap_or_else(|| stress_level.priority_level().to_string());

        Self {
            region,
            sub_region,
            time_period,
            stress_index,
            stress_level,
            recommended_action,
            priority_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_parse_to_variants() {
        assert_eq!(StressLevel::from_label("Extreme"), StressLevel::Extreme);
        assert_eq!(StressLevel::from_label("High"), StressLevel::High);
        assert_eq!(StressLevel::from_label("Moderate"), StressLevel::Moderate);
        assert_eq!(StressLevel::from_label("Low"), StressLevel::Low);
    }

    #[test]
    fn unknown_label_is_carried_verbatim() {
        let level = StressLevel::from_label("Severe");
        assert_eq!(level, StressLevel::Other("Severe".to_string()));
        assert_eq!(level.label(), "Severe");
    }

    #[test]
    fn priority_collapses_four_levels_into_three_tiers() {
        assert_eq!(StressLevel::Extreme.priority_level(), "High Priority");
        assert_eq!(StressLevel::High.priority_level(), "High Priority");
        assert_eq!(StressLevel::Moderate.priority_level(), "Medium Priority");
        assert_eq!(StressLevel::Low.priority_level(), "Low Priority");
    }

    #[test]
    fn unmapped_level_resolves_to_unspecified_not_empty() {
        let level = StressLevel::from_label("Critical");
        assert_eq!(level.recommended_action(), UNSPECIFIED);
        assert_eq!(level.priority_level(), UNSPECIFIED);
    }

    #[test]
    fn file_values_win_over_mapping() {
        let record = StressRecord::new(
            "StateA".into(),
            "D1".into(),
            "2024-01".into(),
            82.0,
            StressLevel::Extreme,
            Some("Custom action from file".into()),
            None,
        );
        assert_eq!(record.recommended_action, "Custom action from file");
        assert_eq!(record.priority_level, "High Priority");
    }

    #[test]
    fn missing_columns_fill_from_mapping() {
        let record = StressRecord::new(
            "StateA".into(),
            "D2".into(),
            "2024-01".into(),
            12.5,
            StressLevel::Low,
            None,
            None,
        );
        assert_eq!(record.recommended_action, "No action required");
        assert_eq!(record.priority_level, "Low Priority");
    }
}
