//! CarbonScope - Global Carbon Intensity Dashboard
//!
//! Interactive desktop dashboard over the OWID CO2 dataset: carbon
//! intensity trends, energy vs emissions comparison and a progress
//! ranking of the most improved countries.

mod charts;
mod data;
mod gui;
mod stats;

use anyhow::Context;
use eframe::egui;
use gui::CarbonScopeApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("CarbonScope"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "CarbonScope",
        options,
        Box::new(|cc| Ok(Box::new(CarbonScopeApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("failed to start the UI")
}
