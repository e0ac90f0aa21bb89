//! GUI module - user interface components

mod app;
mod control_panel;
mod dashboard;

pub use app::CarbonScopeApp;
pub use control_panel::{ControlPanel, ControlPanelAction, DEFAULT_COUNTRIES};
pub use dashboard::{Dashboard, DashboardView};
