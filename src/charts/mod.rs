//! Charts module - chart data models and egui_plot drawing

mod plotter;

pub use plotter::{
    DashboardPlotter, ScatterChartData, ScatterPoint, SkipReason, TrendChartData,
};
