//! Dashboard Widget
//! Central scrollable panel with the ranked table, the two charts, and
//! the copilot query section.

use crate::charts::{level_color, ChartPlotter};
use crate::data::StressRecord;
use crate::stats::{LatestDistribution, SummaryCalculator, TrendPoint, TOP_TABLE_ROWS};
use egui::{Color32, RichText, ScrollArea};

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// The three dashboard views, rebuilt from the filtered set every frame.
pub struct FilteredViews {
    pub filtered_count: usize,
    pub top: Vec<StressRecord>,
    pub trend: Vec<TrendPoint>,
    pub distribution: Option<LatestDistribution>,
}

impl FilteredViews {
    pub fn build(filtered: &[StressRecord]) -> Self {
        Self {
            filtered_count: filtered.len(),
            top: SummaryCalculator::top_ranked(filtered, TOP_TABLE_ROWS),
            trend: SummaryCalculator::trend_series(filtered),
            distribution: SummaryCalculator::latest_distribution(filtered),
        }
    }
}

/// Actions triggered by the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    None,
    Ask(String),
}

/// Copilot interaction state lives here: the query text and the last
/// answer or error. The in-flight flag is owned by the app.
pub struct Dashboard {
    pub query: String,
    pub answer: Option<String>,
    pub error: Option<String>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            query: String::new(),
            answer: None,
            error: None,
        }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        views: &FilteredViews,
        copilot_ready: bool,
        is_asking: bool,
    ) -> DashboardAction {
        let mut action = DashboardAction::None;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::draw_top_table(ui, views);

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);

                Self::draw_trend_section(ui, views);

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);

                Self::draw_distribution_section(ui, views);

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);

                action = self.draw_copilot_section(ui, copilot_ready, is_asking);
            });

        action
    }

    fn draw_top_table(ui: &mut egui::Ui, views: &FilteredViews) {
        ui.label(
            RichText::new("🔴 Top Stressed Sub-Regions")
                .size(16.0)
                .strong(),
        );
        ui.add_space(5.0);

        if views.top.is_empty() {
            ui.label(RichText::new("No data for the current filters").color(Color32::GRAY));
            return;
        }

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("top_stressed_table")
                    .striped(true)
                    .min_col_width(80.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Region").strong().size(12.0));
                        ui.label(RichText::new("Sub-region").strong().size(12.0));
                        ui.label(RichText::new("Stress index").strong().size(12.0));
                        ui.label(RichText::new("Level").strong().size(12.0));
                        ui.label(RichText::new("Recommended action").strong().size(12.0));
                        ui.end_row();

                        for record in &views.top {
                            ui.label(RichText::new(&record.region).size(12.0));
                            ui.label(RichText::new(&record.sub_region).size(12.0));
                            ui.label(
                                RichText::new(format!("{:.2}", record.stress_index)).size(12.0),
                            );
                            ui.label(
                                RichText::new(record.stress_level.label())
                                    .size(12.0)
                                    .color(level_color(record.stress_level.label())),
                            );
                            ui.label(RichText::new(&record.recommended_action).size(12.0));
                            ui.end_row();
                        }
                    });
            });
    }

    fn draw_trend_section(ui: &mut egui::Ui, views: &FilteredViews) {
        ui.label(
            RichText::new("📈 Average Stress Index Over Time")
                .size(16.0)
                .strong(),
        );
        ui.add_space(5.0);

        if views.trend.is_empty() {
            ui.label(RichText::new("No data for the current filters").color(Color32::GRAY));
        } else {
            ChartPlotter::draw_trend_chart(ui, &views.trend);
        }
    }

    fn draw_distribution_section(ui: &mut egui::Ui, views: &FilteredViews) {
        match &views.distribution {
            Some(distribution) => {
                ui.label(
                    RichText::new(format!(
                        "📊 Stress Level Distribution — {}",
                        distribution.period
                    ))
                    .size(16.0)
                    .strong(),
                );
                ui.add_space(5.0);
                ChartPlotter::draw_distribution_chart(ui, distribution);
            }
            None => {
                ui.label(
                    RichText::new("📊 Stress Level Distribution")
                        .size(16.0)
                        .strong(),
                );
                ui.add_space(5.0);
                ui.label(RichText::new("No data for the current filters").color(Color32::GRAY));
            }
        }
    }

    fn draw_copilot_section(
        &mut self,
        ui: &mut egui::Ui,
        copilot_ready: bool,
        is_asking: bool,
    ) -> DashboardAction {
        let mut action = DashboardAction::None;

        ui.label(RichText::new("💬 Ask the Copilot").size(16.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::TextEdit::multiline(&mut self.query)
                .desired_rows(3)
                .desired_width(f32::INFINITY)
                .hint_text("Why are some sub-regions extremely stressed this period?"),
        );
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            let can_ask = copilot_ready && !is_asking && !self.query.trim().is_empty();
            ui.add_enabled_ui(can_ask, |ui| {
                if ui.button("▶ Ask").clicked() {
                    action = DashboardAction::Ask(self.query.trim().to_string());
                }
            });

            if is_asking {
                ui.spinner();
                ui.label(RichText::new("Analysing…").color(Color32::GRAY));
            } else if !copilot_ready {
                ui.label(
                    RichText::new("Set GEMINI_API_KEY to enable explanations")
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            }
        });

        // Query failures stay scoped to this section; tables and charts
        // above keep rendering.
        if let Some(error) = &self.error {
            ui.add_space(5.0);
            ui.label(RichText::new(error).size(12.0).color(ERROR_COLOR));
        }

        if let Some(answer) = &self.answer {
            ui.add_space(8.0);
            ui.label(RichText::new("🧠 Copilot Explanation").strong());
            ui.add_space(3.0);
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.label(answer);
                });
        }

        action
    }
}
