//! Chart Plotter Module
//! Builds chart data from filtered frames and draws it with egui_plot.

use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use polars::prelude::*;
use std::collections::HashMap;

/// Color palette for country series
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(255, 87, 34),   // Deep Orange
    Color32::from_rgb(121, 85, 72),   // Brown
];

const IMPROVEMENT_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
const NOTICE_COLOR: Color32 = Color32::from_rgb(255, 193, 7);

/// Reasons a visualization is skipped rather than drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptySelection,
    EmptyYearSlice,
}

impl SkipReason {
    /// User-visible notice for the skipped component.
    pub fn message(self) -> &'static str {
        match self {
            SkipReason::EmptySelection => "Select at least one country to display the trend.",
            SkipReason::EmptyYearSlice => "No complete data for the selected year.",
        }
    }
}

/// Per-country intensity series for the trend chart.
#[derive(Debug, Clone)]
pub struct TrendChartData {
    /// (country, [year, intensity]) in selection order, each series sorted
    /// by year.
    pub series: Vec<(String, Vec<[f64; 2]>)>,
}

impl TrendChartData {
    /// Build the trend series from the country-filtered frame.
    ///
    /// `df` holds the rows for the selected countries across all years.
    /// An empty selection is a skip, not an error.
    pub fn build(df: &DataFrame, selection: &[String]) -> Result<Self, SkipReason> {
        if selection.is_empty() {
            return Err(SkipReason::EmptySelection);
        }

        let mut by_country: HashMap<String, Vec<[f64; 2]>> = HashMap::new();
        if let (Ok(countries), Ok(years), Ok(intensity)) = (
            df.column("country").and_then(|c| c.str()),
            df.column("year").and_then(|c| c.i32()),
            df.column("co2_intensity").and_then(|c| c.f64()),
        ) {
            for i in 0..df.height() {
                if let (Some(country), Some(year), Some(value)) =
                    (countries.get(i), years.get(i), intensity.get(i))
                {
                    by_country
                        .entry(country.to_string())
                        .or_default()
                        .push([year as f64, value]);
                }
            }
        }

        let mut series = Vec::with_capacity(selection.len());
        for country in selection {
            if let Some(mut points) = by_country.remove(country) {
                points.sort_by(|a, b| {
                    a[0].partial_cmp(&b[0]).unwrap_or(std::cmp::Ordering::Equal)
                });
                series.push((country.clone(), points));
            }
        }

        Ok(Self { series })
    }
}

/// One country point for the energy vs CO2 scatter.
#[derive(Debug, Clone)]
pub struct ScatterPoint {
    pub country: String,
    pub energy_per_capita: f64,
    pub co2_per_capita: f64,
    pub population: Option<i64>,
}

/// Energy vs CO2 per-capita points for a single year.
#[derive(Debug, Clone)]
pub struct ScatterChartData {
    pub year: i32,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChartData {
    /// Build the scatter points from the single-year frame.
    ///
    /// An empty year slice is a skip, not an error.
    pub fn build(df_year: &DataFrame, year: i32) -> Result<Self, SkipReason> {
        let mut points = Vec::with_capacity(df_year.height());
        if let (Ok(countries), Ok(energy), Ok(co2), Ok(population)) = (
            df_year.column("country").and_then(|c| c.str()),
            df_year.column("energy_per_capita").and_then(|c| c.f64()),
            df_year.column("co2_per_capita").and_then(|c| c.f64()),
            df_year.column("population").and_then(|c| c.i64()),
        ) {
            for i in 0..df_year.height() {
                if let (Some(country), Some(energy), Some(co2)) =
                    (countries.get(i), energy.get(i), co2.get(i))
                {
                    points.push(ScatterPoint {
                        country: country.to_string(),
                        energy_per_capita: energy,
                        co2_per_capita: co2,
                        population: population.get(i),
                    });
                }
            }
        }

        if points.is_empty() {
            return Err(SkipReason::EmptyYearSlice);
        }
        Ok(Self { year, points })
    }
}

/// Draws the dashboard charts using egui_plot.
pub struct DashboardPlotter;

impl DashboardPlotter {
    /// Color for a series by its position.
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Line chart of carbon intensity over time, one series per country.
    pub fn draw_trend_chart(ui: &mut egui::Ui, data: &TrendChartData) {
        Plot::new("trend_chart")
            .height(320.0)
            .x_axis_label("Year")
            .y_axis_label("Carbon intensity (proxy)")
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .show(ui, |plot_ui| {
                for (idx, (country, points)) in data.series.iter().enumerate() {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(Self::series_color(idx))
                            .width(2.0)
                            .name(country),
                    );
                }
            });
    }

    /// Scatter of energy vs CO2 per capita, point radius scaled by
    /// population. Hovering a point shows its country name.
    pub fn draw_scatter_chart(ui: &mut egui::Ui, data: &ScatterChartData) {
        let max_population = data
            .points
            .iter()
            .filter_map(|p| p.population)
            .max()
            .unwrap_or(0);

        Plot::new("scatter_chart")
            .height(320.0)
            .x_axis_label("Energy per capita (kWh)")
            .y_axis_label("CO2 per capita (tons)")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (idx, point) in data.points.iter().enumerate() {
                    plot_ui.points(
                        Points::new(vec![[point.energy_per_capita, point.co2_per_capita]])
                            .radius(Self::population_radius(point.population, max_population))
                            .color(Self::series_color(idx))
                            .name(&point.country),
                    );
                }
            });
    }

    /// Point radius in [2.5, 9] by square root of population share.
    fn population_radius(population: Option<i64>, max_population: i64) -> f32 {
        const MIN_RADIUS: f32 = 2.5;
        const MAX_RADIUS: f32 = 9.0;

        let (Some(population), true) = (population, max_population > 0) else {
            return MIN_RADIUS;
        };
        let share = (population.max(0) as f64 / max_population as f64).sqrt() as f32;
        MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * share
    }

    /// Top-10 progress table. Negative change = reduced intensity, tinted
    /// green.
    pub fn draw_progress_table(ui: &mut egui::Ui, ranking: &crate::stats::ProgressRanking) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("progress_table")
                    .striped(true)
                    .min_col_width(90.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Rank").strong().size(12.0));
                        ui.label(RichText::new("Country").strong().size(12.0));
                        ui.label(RichText::new("Change (%)").strong().size(12.0));
                        ui.end_row();

                        let default_text_color = ui.visuals().text_color();

                        for (idx, entry) in ranking.top(10).iter().enumerate() {
                            let color = if entry.is_improvement() {
                                IMPROVEMENT_COLOR
                            } else {
                                default_text_color
                            };

                            ui.label(RichText::new(format!("{}", idx + 1)).size(12.0));
                            ui.label(RichText::new(&entry.country).size(12.0).color(color));
                            ui.label(
                                RichText::new(format!("{:+.2}", entry.pct_change))
                                    .size(12.0)
                                    .color(color),
                            );
                            ui.end_row();
                        }
                    });
            });
    }

    /// User-visible notice for a skipped component.
    pub fn draw_notice(ui: &mut egui::Ui, message: &str) {
        ui.label(
            RichText::new(format!("⚠ {message}"))
                .size(13.0)
                .color(NOTICE_COLOR),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend_frame() -> DataFrame {
        df!(
            "country" => ["Brazil", "Brazil", "Germany"],
            "year" => [2010, 2000, 2005],
            "co2_intensity" => [150.0, 166.7, 225.0],
        )
        .unwrap()
    }

    #[test]
    fn empty_selection_skips_with_exact_notice() {
        let err = TrendChartData::build(&trend_frame(), &[]).unwrap_err();
        assert_eq!(err, SkipReason::EmptySelection);
        assert_eq!(
            err.message(),
            "Select at least one country to display the trend."
        );
    }

    #[test]
    fn trend_series_follow_selection_order_and_sort_by_year() {
        let selection = vec!["Germany".to_string(), "Brazil".to_string()];
        let data = TrendChartData::build(&trend_frame(), &selection).unwrap();

        assert_eq!(data.series.len(), 2);
        assert_eq!(data.series[0].0, "Germany");
        assert_eq!(data.series[1].0, "Brazil");
        // Brazil rows arrive out of order and come back year-sorted.
        assert_eq!(data.series[1].1, vec![[2000.0, 166.7], [2010.0, 150.0]]);
    }

    #[test]
    fn selected_country_without_rows_gets_no_series() {
        let selection = vec!["France".to_string(), "Brazil".to_string()];
        let data = TrendChartData::build(&trend_frame(), &selection).unwrap();
        assert_eq!(data.series.len(), 1);
        assert_eq!(data.series[0].0, "Brazil");
    }

    #[test]
    fn empty_year_slice_skips_with_exact_notice() {
        let df = df!(
            "country" => Vec::<&str>::new(),
            "energy_per_capita" => Vec::<f64>::new(),
            "co2_per_capita" => Vec::<f64>::new(),
            "population" => Vec::<i64>::new(),
        )
        .unwrap();

        let err = ScatterChartData::build(&df, 2020).unwrap_err();
        assert_eq!(err, SkipReason::EmptyYearSlice);
        assert_eq!(err.message(), "No complete data for the selected year.");
    }

    #[test]
    fn scatter_points_carry_population_for_sizing() {
        let df = df!(
            "country" => ["Brazil", "Germany"],
            "energy_per_capita" => [15000.0, 45000.0],
            "co2_per_capita" => [2.2, 8.1],
            "population" => [Some(210_000_000i64), None],
        )
        .unwrap();

        let data = ScatterChartData::build(&df, 2020).unwrap();
        assert_eq!(data.year, 2020);
        assert_eq!(data.points.len(), 2);
        assert_eq!(data.points[0].population, Some(210_000_000));
        assert_eq!(data.points[1].population, None);
    }
}
