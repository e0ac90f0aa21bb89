//! Data module - dataset loading and filtering

mod loader;
mod processor;

pub use loader::{DatasetLoader, LoaderError, FOCUS_COLUMNS, MIN_YEAR, OWID_CSV_URL};
pub use processor::{DatasetProcessor, ProcessorError};
