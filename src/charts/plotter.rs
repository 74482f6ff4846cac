//! Chart Plotter Module
//! Creates the trend and distribution visualizations using egui_plot.

use crate::stats::{LatestDistribution, TrendPoint};
use egui::Color32;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

pub const TREND_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

/// Bar color per stress level.
pub fn level_color(level: &str) -> Color32 {
    match level {
        "Extreme" => Color32::from_rgb(231, 76, 60),  // Red
        "High" => Color32::from_rgb(243, 156, 18),    // Orange
        "Moderate" => Color32::from_rgb(241, 196, 15), // Yellow
        "Low" => Color32::from_rgb(46, 204, 113),     // Green
        _ => Color32::from_rgb(96, 125, 139),         // Blue Grey
    }
}

/// Draws the dashboard charts. Periods and levels are plotted at integer
/// x positions with a formatter mapping positions back to labels.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Line chart of mean stress index per time period, with point
    /// markers on each period.
    pub fn draw_trend_chart(ui: &mut egui::Ui, series: &[TrendPoint]) {
        let x_labels: Vec<String> = series.iter().map(|p| p.period.clone()).collect();
        let points: Vec<[f64; 2]> = series
            .iter()
            .enumerate()
            .map(|(i, p)| [i as f64, p.mean_index])
            .collect();

        Plot::new("stress_trend")
            .height(280.0)
            .allow_scroll(false)
            .x_axis_label("Period")
            .y_axis_label("Average stress index")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(TREND_COLOR)
                        .width(2.0)
                        .name("Mean stress index"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(3.5)
                        .color(TREND_COLOR),
                );
            });
    }

    /// Bar chart of stress-level counts for the latest period.
    pub fn draw_distribution_chart(ui: &mut egui::Ui, distribution: &LatestDistribution) {
        let x_labels: Vec<String> = distribution
            .counts
            .iter()
            .map(|c| c.level.clone())
            .collect();

        let bars: Vec<Bar> = distribution
            .counts
            .iter()
            .enumerate()
            .map(|(i, level_count)| {
                Bar::new(i as f64, level_count.count as f64)
                    .width(0.6)
                    .fill(level_color(&level_count.level))
                    .name(&level_count.level)
            })
            .collect();

        Plot::new("level_distribution")
            .height(280.0)
            .allow_scroll(false)
            .x_axis_label("Stress level")
            .y_axis_label("Number of sub-regions")
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if idx < x_labels.len() && (mark.value - idx as f64).abs() < 1e-6 {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }
}
