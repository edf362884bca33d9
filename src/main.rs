//! CORD-19 Explorer - Research Dataset Dashboard
//!
//! Loads CORD-19 paper metadata, cleans it and shows publication charts,
//! top journals, a title word cloud and summary insights for a year range.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use gui::ExplorerApp;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE));
    tracing::info!(data_path = %config.data_path.display(), "CORD-19 Explorer starting");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("CORD-19 Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "CORD-19 Explorer",
        options,
        Box::new(|cc| Ok(Box::new(ExplorerApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
