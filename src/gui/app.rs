//! StressBoard Main Application
//! Main window with filter panel and dashboard. The dataset load and the
//! copilot calls run on background threads and report back over channels.

use crate::config::AppConfig;
use crate::copilot::{build_prompt, CopilotClient};
use crate::data::{Dataset, StressRecord};
use crate::gui::{Dashboard, DashboardAction, FilterPanel, FilteredViews};
use egui::{Color32, RichText, SidePanel};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;
use tracing::{error, info, warn};

/// Dataset loading result from the startup thread
enum LoadResult {
    Complete(Dataset),
    Error(String),
}

/// Copilot result from a query thread
enum AskResult {
    Complete(String),
    Error(String),
}

enum DatasetState {
    Loading,
    Ready(Arc<Dataset>),
    Failed(String),
}

/// Main application window.
pub struct StressboardApp {
    config: AppConfig,
    dataset: DatasetState,
    filter_panel: FilterPanel,
    dashboard: Dashboard,

    load_rx: Option<Receiver<LoadResult>>,
    ask_rx: Option<Receiver<AskResult>>,
    is_asking: bool,
}

impl StressboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        // The one and only dataset load for this process lifetime.
        let (tx, rx) = channel();
        let path = config.data_path.clone();
        thread::spawn(move || {
            let result = match Dataset::load(&path) {
                Ok(dataset) => LoadResult::Complete(dataset),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });

        Self {
            config,
            dataset: DatasetState::Loading,
            filter_panel: FilterPanel::new(),
            dashboard: Dashboard::new(),
            load_rx: Some(rx),
            ask_rx: None,
            is_asking: false,
        }
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Complete(dataset) => {
                        info!(
                            records = dataset.len(),
                            path = %dataset.source.display(),
                            "dataset loaded"
                        );
                        if dataset.is_empty() {
                            warn!("dataset contains no records");
                        }
                        self.filter_panel
                            .set_options(dataset.regions(), dataset.periods());
                        self.dataset = DatasetState::Ready(Arc::new(dataset));
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(message) => {
                        error!("dataset load failed: {}", message);
                        self.dataset = DatasetState::Failed(message);
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Check for copilot results
    fn check_ask_results(&mut self) {
        let rx = self.ask_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    AskResult::Complete(text) => {
                        info!("copilot answer received");
                        self.dashboard.answer = Some(text);
                        self.dashboard.error = None;
                        self.is_asking = false;
                        should_keep_receiver = false;
                    }
                    AskResult::Error(message) => {
                        error!("copilot request failed: {}", message);
                        self.dashboard.error = Some(message);
                        self.is_asking = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.ask_rx = Some(rx);
            }
        }
    }

    /// Build the prompt from the current filtered set and call the
    /// service from a worker thread. One request at a time, no retry.
    fn submit_question(&mut self, question: String, filtered: &[StressRecord]) {
        let Some(api_key) = self.config.api_key.clone() else {
            return;
        };

        let prompt = build_prompt(filtered, &question);
        info!(records = filtered.len(), "submitting copilot question");

        let model = self.config.model.clone();
        let timeout = self.config.request_timeout;
        let (tx, rx) = channel();
        self.ask_rx = Some(rx);
        self.is_asking = true;
        self.dashboard.answer = None;
        self.dashboard.error = None;

        thread::spawn(move || {
            let result = CopilotClient::new(api_key, model, timeout)
                .and_then(|client| client.explain(&prompt));
            let message = match result {
                Ok(text) => AskResult::Complete(text),
                Err(e) => AskResult::Error(e.to_string()),
            };
            let _ = tx.send(message);
        });
    }
}

impl eframe::App for StressboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();
        self.check_ask_results();

        // Request repaint while loading or awaiting a copilot answer
        if matches!(self.dataset, DatasetState::Loading) || self.is_asking {
            ctx.request_repaint();
        }

        let dataset = match &self.dataset {
            DatasetState::Loading => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new("Loading dataset…").size(18.0));
                    });
                });
                return;
            }
            // Fail-fast: no filters and no charts once the load or the
            // column validation has failed.
            DatasetState::Failed(message) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new(format!("⚠ {}", message))
                                .size(16.0)
                                .color(Color32::from_rgb(220, 53, 69)),
                        );
                    });
                });
                return;
            }
            DatasetState::Ready(dataset) => Arc::clone(dataset),
        };

        // Full recompute per render cycle; only the dataset load is cached.
        let filtered = self.filter_panel.selection.apply(&dataset.records);
        let views = FilteredViews::build(&filtered);

        // Left panel - status and filters
        SidePanel::left("filter_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("📊 StressBoard")
                                .size(22.0)
                                .color(Color32::from_rgb(100, 149, 237)),
                        );
                        ui.label(
                            RichText::new("Regional stress analytics")
                                .size(11.0)
                                .color(Color32::GRAY),
                        );
                    });
                    ui.add_space(10.0);
                    ui.separator();
                    ui.add_space(5.0);

                    ui.label(
                        RichText::new(format!(
                            "Loaded {} records from {}",
                            dataset.len(),
                            dataset.source.display()
                        ))
                        .size(11.0)
                        .color(Color32::from_rgb(40, 167, 69)),
                    );
                    ui.add_space(10.0);

                    self.filter_panel.show(ui);

                    ui.add_space(10.0);
                    ui.label(
                        RichText::new(format!(
                            "{} of {} records selected",
                            views.filtered_count,
                            dataset.len()
                        ))
                        .size(11.0),
                    );

                    ui.add_space(15.0);
                    ui.separator();
                    ui.label(
                        RichText::new(
                            "Read-only analytics loaded from the indicator file • \
                             LLM used strictly for explanation",
                        )
                        .size(10.0)
                        .color(Color32::GRAY),
                    );
                });
            });

        // Central panel - dashboard
        let mut pending_question = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let action =
                self.dashboard
                    .show(ui, &views, self.config.copilot_ready(), self.is_asking);
            if let DashboardAction::Ask(question) = action {
                pending_question = Some(question);
            }
        });

        if let Some(question) = pending_question {
            if !self.is_asking {
                self.submit_question(question, &filtered);
            }
        }
    }
}
