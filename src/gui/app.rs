//! CarbonScope Main Application
//! Main window wiring the control panel, the background dataset fetch and
//! the dashboard.

use crate::data::{DatasetLoader, DatasetProcessor, OWID_CSV_URL};
use crate::gui::{ControlPanel, ControlPanelAction, Dashboard, DashboardView};
use crate::stats::{ProgressRanker, ProgressRanking, DEFAULT_START_YEAR};
use egui::SidePanel;
use log::{info, warn};
use polars::prelude::*;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;

/// Dataset fetch result from the background thread.
enum FetchResult {
    Progress(String),
    Complete(DataFrame),
    Error(String),
}

/// Main application window.
pub struct CarbonScopeApp {
    loader: Arc<Mutex<DatasetLoader>>,
    control_panel: ControlPanel,

    dataset: Option<DataFrame>,
    ranking: Option<ProgressRanking>,
    view: Option<DashboardView>,
    view_stale: bool,

    fetch_rx: Option<Receiver<FetchResult>>,
    is_loading: bool,
    fatal_error: Option<String>,
}

impl CarbonScopeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            loader: Arc::new(Mutex::new(DatasetLoader::new())),
            control_panel: ControlPanel::new(),
            dataset: None,
            ranking: None,
            view: None,
            view_stale: false,
            fetch_rx: None,
            is_loading: false,
            fatal_error: None,
        };
        app.start_fetch();
        app
    }

    /// Kick off the dataset fetch on a background thread.
    ///
    /// The loader's memo lives across reloads, so a reload within a
    /// session is served without refetching.
    fn start_fetch(&mut self) {
        if self.is_loading {
            return;
        }
        self.is_loading = true;
        self.fatal_error = None;
        self.control_panel.set_status("Fetching dataset...");

        let (tx, rx) = channel();
        self.fetch_rx = Some(rx);
        let loader = Arc::clone(&self.loader);

        thread::spawn(move || {
            let _ = tx.send(FetchResult::Progress(
                "Downloading OWID CO2 data...".to_string(),
            ));

            let result = loader
                .lock()
                .map_err(|_| "dataset cache lock poisoned".to_string())
                .and_then(|mut loader| {
                    loader.load(OWID_CSV_URL).map_err(|e| e.to_string())
                });

            match result {
                Ok(df) => {
                    let _ = tx.send(FetchResult::Complete(df));
                }
                Err(e) => {
                    let _ = tx.send(FetchResult::Error(e));
                }
            }
        });
    }

    /// Check for dataset fetch results.
    fn check_fetch_results(&mut self) {
        let rx = self.fetch_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    FetchResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    FetchResult::Complete(df) => {
                        self.install_dataset(df);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    FetchResult::Error(error) => {
                        warn!("dataset fetch failed: {error}");
                        self.control_panel
                            .set_status(&format!("Error: {error}"));
                        self.fatal_error = Some(error);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.fetch_rx = Some(rx);
            }
        }
    }

    /// Install a freshly loaded dataset: filter bounds, default selection
    /// and the once-per-load progress ranking.
    fn install_dataset(&mut self, df: DataFrame) {
        let countries = DatasetProcessor::countries(&df);
        let (year_min, year_max) = DatasetProcessor::year_bounds(&df).unwrap_or((0, 0));
        info!(
            "dataset loaded: {} rows, {} countries, {year_min}-{year_max}",
            df.height(),
            countries.len()
        );

        self.control_panel
            .set_dataset(countries, year_min, year_max);
        self.control_panel.set_status(&format!(
            "Loaded {} rows ({year_min}-{year_max})",
            df.height()
        ));

        match ProgressRanker::rank(&df, DEFAULT_START_YEAR) {
            Ok(ranking) => self.ranking = Some(ranking),
            Err(e) => {
                warn!("progress ranking failed: {e}");
                self.ranking = None;
            }
        }

        self.dataset = Some(df);
        self.view_stale = true;
    }

    /// Rebuild the dashboard view model when the filters changed.
    fn rebuild_view(&mut self) {
        if !self.view_stale {
            return;
        }
        let Some(df) = &self.dataset else {
            return;
        };

        let selection = self.control_panel.selected_countries();
        match DashboardView::build(df, &selection, self.control_panel.year) {
            Ok(view) => self.view = Some(view),
            Err(e) => {
                warn!("view rebuild failed: {e}");
                self.control_panel.set_status(&format!("Error: {e}"));
            }
        }
        self.view_stale = false;
    }
}

impl eframe::App for CarbonScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_fetch_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - filters
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::Reload => {
                            if !self.is_loading {
                                self.start_fetch();
                            }
                        }
                        ControlPanelAction::SelectionChanged
                        | ControlPanelAction::YearChanged => {
                            self.view_stale = true;
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        self.rebuild_view();

        // Central panel - dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = &self.fatal_error {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new("Dataset unavailable")
                                .size(20.0)
                                .color(egui::Color32::from_rgb(220, 53, 69)),
                        );
                        ui.add_space(8.0);
                        ui.label(egui::RichText::new(error).size(12.0));
                    });
                });
            } else if self.is_loading {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.spinner();
                        ui.add_space(8.0);
                        ui.label("Loading OWID CO2 data...");
                    });
                });
            } else if let Some(view) = &self.view {
                Dashboard::show(ui, view, self.ranking.as_ref());
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new("No Data").size(20.0));
                });
            }
        });
    }
}
