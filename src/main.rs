//! StressBoard - Regional Stress Indicator Dashboard & AI Copilot
//!
//! Loads a pre-computed regional stress dataset, renders filtered views
//! and charts, and forwards questions about the filtered data to a hosted
//! text-generation service for explanation.

mod charts;
mod config;
mod copilot;
mod data;
mod gui;
mod stats;

use config::AppConfig;
use eframe::egui;
use gui::StressboardApp;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {:#}", e);
            std::process::exit(2);
        }
    };
    info!(
        path = %config.data_path.display(),
        model = %config.model,
        "starting dashboard"
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("StressBoard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "StressBoard",
        options,
        Box::new(|cc| Ok(Box::new(StressboardApp::new(cc, config)))),
    )
}
