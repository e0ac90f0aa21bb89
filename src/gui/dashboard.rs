//! Dashboard Widget
//! Central panel with the KPI card, trend chart, scatter chart and
//! progress table.

use crate::charts::{DashboardPlotter, ScatterChartData, SkipReason, TrendChartData};
use crate::data::{DatasetProcessor, ProcessorError, MIN_YEAR};
use crate::stats::{
    CorrelationKpi, ProgressRanking, StatsCalculator, STRONG_CORRELATION_THRESHOLD,
};
use egui::{Color32, RichText, ScrollArea};
use polars::prelude::*;

/// View model for one render of the dashboard.
///
/// Rebuilt whenever the country selection or the year changes; the
/// progress ranking is computed once per load and passed in separately.
pub struct DashboardView {
    pub trend: Result<TrendChartData, SkipReason>,
    pub scatter: Result<ScatterChartData, SkipReason>,
    pub kpi: Option<CorrelationKpi>,
    pub year: i32,
    pub max_year: i32,
}

impl DashboardView {
    /// Build the view model for the current selection and year.
    pub fn build(
        df: &DataFrame,
        selection: &[String],
        year: i32,
    ) -> Result<Self, ProcessorError> {
        let trend_df = DatasetProcessor::filter_countries(df, selection)?;
        let year_df = DatasetProcessor::filter_year(df, year)?;
        let max_year = DatasetProcessor::year_bounds(df)
            .map(|(_, max)| max)
            .unwrap_or(year);

        Ok(Self {
            trend: TrendChartData::build(&trend_df, selection),
            scatter: ScatterChartData::build(&year_df, year),
            kpi: StatsCalculator::correlation_kpi(&year_df, year),
            year,
            max_year,
        })
    }
}

/// Draws the central dashboard panel.
pub struct Dashboard;

impl Dashboard {
    pub fn show(ui: &mut egui::Ui, view: &DashboardView, ranking: Option<&ProgressRanking>) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::draw_kpi_card(ui, view);
                ui.add_space(15.0);

                ui.label(
                    RichText::new(format!(
                        "1. Carbon intensity over time ({} - {})",
                        MIN_YEAR, view.max_year
                    ))
                    .size(16.0)
                    .strong(),
                );
                ui.label(
                    RichText::new("CO2 per capita per unit of energy consumed")
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(5.0);
                match &view.trend {
                    Ok(data) => DashboardPlotter::draw_trend_chart(ui, data),
                    Err(reason) => DashboardPlotter::draw_notice(ui, reason.message()),
                }

                ui.add_space(15.0);
                ui.label(
                    RichText::new(format!(
                        "2. Energy use vs CO2 per capita ({})",
                        view.year
                    ))
                    .size(16.0)
                    .strong(),
                );
                ui.add_space(5.0);
                match &view.scatter {
                    Ok(data) => DashboardPlotter::draw_scatter_chart(ui, data),
                    Err(reason) => DashboardPlotter::draw_notice(ui, reason.message()),
                }

                ui.add_space(15.0);
                ui.label(
                    RichText::new("3. Progress in reducing carbon intensity")
                        .size(16.0)
                        .strong(),
                );
                if let Some(ranking) = ranking {
                    ui.label(
                        RichText::new(format!(
                            "Top 10 countries by reduction, {} to {} (negative = reduced intensity)",
                            ranking.start_year, ranking.end_year
                        ))
                        .size(11.0)
                        .color(Color32::GRAY),
                    );
                    ui.add_space(5.0);
                    DashboardPlotter::draw_progress_table(ui, ranking);
                }

                ui.add_space(10.0);
            });
    }

    /// KPI card with the Pearson coefficient and its qualitative label.
    fn draw_kpi_card(ui: &mut egui::Ui, view: &DashboardView) {
        ui.label(
            RichText::new("Key metric: energy use vs emissions")
                .size(16.0)
                .strong(),
        );
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| match &view.kpi {
                Some(kpi) => {
                    ui.label(
                        RichText::new(format!("Correlation (Pearson) in {}", kpi.year))
                            .size(12.0)
                            .color(Color32::GRAY),
                    );
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!("{:.3}", kpi.coefficient))
                                .size(28.0)
                                .strong(),
                        );
                        ui.add_space(12.0);
                        ui.vertical(|ui| {
                            let label_color =
                                if kpi.coefficient >= STRONG_CORRELATION_THRESHOLD {
                                    Color32::from_rgb(40, 167, 69)
                                } else {
                                    Color32::GRAY
                                };
                            ui.label(
                                RichText::new(kpi.label()).size(13.0).color(label_color),
                            );
                            ui.label(RichText::new(kpi.interpretation()).size(11.0));
                            let sample = match kpi.p_value {
                                Some(p) => {
                                    format!("p = {:.4}, n = {}", p, kpi.sample_size)
                                }
                                None => format!("n = {}", kpi.sample_size),
                            };
                            ui.label(
                                RichText::new(sample).size(10.0).color(Color32::GRAY),
                            );
                        });
                    });
                }
                None => {
                    DashboardPlotter::draw_notice(
                        ui,
                        SkipReason::EmptyYearSlice.message(),
                    );
                }
            });
    }
}
