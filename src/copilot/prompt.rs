//! Prompt Builder Module
//! Renders the filtered record set into a self-contained natural-language
//! context. The model only ever sees the summary built here, never the
//! source file.

use crate::data::StressRecord;
use crate::stats::{SummaryCalculator, PROMPT_SAMPLE_ROWS};
use std::fmt::Write;

/// Build the one-shot prompt for the explanation layer: summary numbers,
/// a top-ranked sample table, the grounding rules, and the user's verbatim
/// question.
pub fn build_prompt(records: &[StressRecord], question: &str) -> String {
    let summary = SummaryCalculator::summarize(records);
    let sample = SummaryCalculator::top_ranked(records, PROMPT_SAMPLE_ROWS);

    let mut prompt = String::new();
    prompt.push_str("You are a regional stress analytics assistant.\n\n");
    prompt.push_str("IMPORTANT RULES:\n");
    prompt.push_str("- All numbers are pre-computed and loaded from the source file\n");
    prompt.push_str("- Do NOT invent data\n");
    prompt.push_str("- Do NOT speculate beyond the data\n\n");

    prompt.push_str("Dataset summary:\n");
    let _ = writeln!(prompt, "- Records: {}", summary.record_count);
    if let Some(mean) = summary.mean_index {
        let _ = writeln!(prompt, "- Average stress index: {:.3}", mean);
    }
    if let Some(max) = summary.max_index {
        let _ = writeln!(prompt, "- Maximum stress index: {:.3}", max);
    }
    if summary.level_counts.is_empty() {
        prompt.push_str("- Stress distribution: none (no records match the current filters)\n");
    } else {
        let breakdown: Vec<String> = summary
            .level_counts
            .iter()
            .map(|(level, count)| format!("{}: {}", level, count))
            .collect();
        let _ = writeln!(prompt, "- Stress distribution: {}", breakdown.join(", "));
    }

    prompt.push_str("\nTop stressed sub-regions:\n");
    if sample.is_empty() {
        prompt.push_str("(none)\n");
    } else {
        prompt.push_str(&sample_table(&sample));
    }

    let _ = write!(prompt, "\nUser question:\n{}\n", question);
    prompt.push_str("\nExplain clearly for government decision-makers.\n");
    prompt
}

/// Fixed-width plain-text rendering of the sample rows.
fn sample_table(rows: &[StressRecord]) -> String {
    let headers = ["region", "sub_region", "stress_index", "stress_level"];

    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            [
                r.region.clone(),
                r.sub_region.clone(),
                format!("{:.2}", r.stress_index),
                r.stress_level.label().to_string(),
            ]
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|row| row[i].len())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect();

    let mut out = String::new();
    for (i, header) in headers.iter().enumerate() {
        let _ = write!(out, "{:<width$}  ", header, width = widths[i]);
    }
    out.push('\n');
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            let _ = write!(out, "{:<width$}  ", cell, width = widths[i]);
        }
        out.push('\n');
    }
    out
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
    fn prompt_carries_summary_numbers_and_question() {
        let prompt = build_prompt(&fixture(), "Why is D1 extremely stressed?");

        assert!(prompt.contains("- Records: 3"));
        assert!(prompt.contains("- Average stress index: 66.667"));
        assert!(prompt.contains("- Maximum stress index: 90.000"));
        assert!(prompt.contains("Extreme: 1"));
        assert!(prompt.contains("High: 1"));
        assert!(prompt.contains("Low: 1"));
        assert!(prompt.contains("Why is D1 extremely stressed?"));
        assert!(prompt.contains("Do NOT invent data"));
    }

    #[test]
    fn prompt_sample_is_bounded_to_five_rows() {
        let records: Vec<StressRecord> = (0..20)
            .map(|i| record("StateA", &format!("D{}", i), "2024-01", i as f64, "Moderate"))
            .collect();

        let prompt = build_prompt(&records, "What stands out?");
        // The highest-ranked rows appear, the rest do not.
        assert!(prompt.contains("D19"));
        assert!(prompt.contains("D15"));
        assert!(!prompt.contains("D14 "));
        assert!(!prompt.contains("D0 "));
    }

    #[test]
    fn empty_filtered_set_builds_a_prompt_without_numbers() {
        let prompt = build_prompt(&[], "Anything to report?");
        assert!(prompt.contains("- Records: 0"));
        assert!(!prompt.contains("Average stress index"));
        assert!(!prompt.contains("Maximum stress index"));
        assert!(prompt.contains("(none)"));
        assert!(prompt.contains("Anything to report?"));
    }

    #[test]
    fn sample_table_aligns_header_and_rows() {
        let table = sample_table(&fixture()[..1]);
        let mut lines = table.lines();
        let header = lines.next().unwrap();
        let row = lines.next().unwrap();
        assert!(header.starts_with("region"));
        assert!(row.starts_with("StateA"));
        assert!(header.contains("stress_index"));
        assert!(row.contains("90.00"));
    }
}
