//! Control Panel Widget
//! Left side panel with country selection, year slider and reload control.

use egui::{Color32, RichText, ScrollArea};

/// Countries checked by default once the dataset arrives.
pub const DEFAULT_COUNTRIES: [&str; 4] = ["Brazil", "United States", "China", "Germany"];

/// Left side control panel with dataset status and filter controls.
pub struct ControlPanel {
    pub countries: Vec<String>,
    pub selected: Vec<bool>,
    pub year: i32,
    pub year_min: i32,
    pub year_max: i32,
    pub status: String,
    has_data: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            countries: Vec::new(),
            selected: Vec::new(),
            year: 0,
            year_min: 0,
            year_max: 0,
            status: "Ready".to_string(),
            has_data: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the loaded dataset's countries and year bounds, resetting
    /// the selection to the defaults and the slider to the latest year.
    pub fn set_dataset(&mut self, countries: Vec<String>, year_min: i32, year_max: i32) {
        self.selected = countries
            .iter()
            .map(|c| DEFAULT_COUNTRIES.contains(&c.as_str()))
            .collect();
        self.countries = countries;
        self.year_min = year_min;
        self.year_max = year_max;
        self.year = year_max;
        self.has_data = true;
    }

    /// Currently checked countries, in list order.
    pub fn selected_countries(&self) -> Vec<String> {
        self.countries
            .iter()
            .zip(self.selected.iter())
            .filter(|(_, &checked)| checked)
            .map(|(country, _)| country.clone())
            .collect()
    }

    /// Set the status line.
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌍 CarbonScope")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Carbon intensity of energy")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Dataset Section =====
        ui.label(RichText::new("📁 Dataset").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("OWID CO2 data")
                            .size(12.0)
                            .color(Color32::WHITE),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("⟳ Reload").clicked() {
                            action = ControlPanelAction::Reload;
                        }
                    });
                });
            });

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") || self.status.contains("unavailable")
        {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters Section =====
        ui.label(RichText::new("🔧 Filters").size(14.0).strong());
        ui.add_space(8.0);

        if !self.has_data {
            ui.label(
                RichText::new("Filters appear once the dataset is loaded.")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
            return action;
        }

        ui.label("Countries:");
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                    for (i, country) in self.countries.iter().enumerate() {
                        if i < self.selected.len()
                            && ui.checkbox(&mut self.selected[i], country).changed()
                        {
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Defaults").clicked() {
                for (i, country) in self.countries.iter().enumerate() {
                    self.selected[i] = DEFAULT_COUNTRIES.contains(&country.as_str());
                }
                action = ControlPanelAction::SelectionChanged;
            }
            if ui.small_button("Clear All").clicked() {
                self.selected.iter_mut().for_each(|v| *v = false);
                action = ControlPanelAction::SelectionChanged;
            }
        });

        ui.add_space(10.0);

        ui.label("Year:");
        if self.year_min < self.year_max {
            let range = self.year_min..=self.year_max;
            if ui
                .add(egui::Slider::new(&mut self.year, range))
                .changed()
            {
                action = ControlPanelAction::YearChanged;
            }
        } else {
            ui.label(RichText::new(format!("{}", self.year_max)).size(12.0));
        }

        action
    }
}

/// Actions triggered by the control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Reload,
    SelectionChanged,
    YearChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_dataset_checks_defaults_and_latest_year() {
        let mut panel = ControlPanel::new();
        panel.set_dataset(
            vec![
                "Brazil".to_string(),
                "France".to_string(),
                "Germany".to_string(),
            ],
            1990,
            2023,
        );

        assert_eq!(panel.selected_countries(), vec!["Brazil", "Germany"]);
        assert_eq!(panel.year, 2023);
        assert_eq!(panel.year_min, 1990);
    }

    #[test]
    fn defaults_missing_from_dataset_are_ignored() {
        let mut panel = ControlPanel::new();
        panel.set_dataset(vec!["France".to_string()], 2000, 2020);
        assert!(panel.selected_countries().is_empty());
    }
}
