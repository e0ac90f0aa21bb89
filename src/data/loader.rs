//! Dataset Loader Module
//! Downloads the OWID CO2 CSV and prepares the working frame using Polars.

use log::{debug, info};
use polars::prelude::*;
use std::collections::HashMap;
use std::io::Cursor;
use thiserror::Error;

/// Fixed source for the OWID country-year CO2 panel.
pub const OWID_CSV_URL: &str =
    "https://raw.githubusercontent.com/owid/co2-data/master/owid-co2-data.csv";

/// Columns retained from the raw dataset.
pub const FOCUS_COLUMNS: [&str; 6] = [
    "country",
    "year",
    "co2_per_capita",
    "energy_per_capita",
    "gdp",
    "population",
];

/// First year of the working set.
pub const MIN_YEAR: i32 = 1990;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Dataset unavailable: {0}")]
    DataUnavailable(#[from] reqwest::Error),
    #[error("Dataset is missing expected column '{0}'")]
    MissingColumn(String),
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Fetches and prepares the dataset, memoizing prepared frames by source URL.
pub struct DatasetLoader {
    cache: HashMap<String, DataFrame>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Load the prepared dataset for a source URL.
    ///
    /// A URL already loaded in this session is served from the memo and
    /// never refetched.
    pub fn load(&mut self, url: &str) -> Result<DataFrame, LoaderError> {
        if let Some(df) = self.cache.get(url) {
            debug!("dataset cache hit for {url}");
            return Ok(df.clone());
        }

        let raw = Self::fetch_csv(url)?;
        let prepared = Self::prepare(raw)?;
        self.cache.insert(url.to_string(), prepared.clone());
        Ok(prepared)
    }

    /// Fetch the raw CSV into a DataFrame.
    fn fetch_csv(url: &str) -> Result<DataFrame, LoaderError> {
        info!("fetching dataset from {url}");
        let body = reqwest::blocking::get(url)?
            .error_for_status()?
            .bytes()?
            .to_vec();

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(body))
            .finish()?;
        Ok(df)
    }

    /// Project to the focus columns, filter and derive the intensity field.
    ///
    /// Keeps rows from 1990 on whose co2_per_capita and energy_per_capita
    /// are both present, then derives
    /// co2_intensity = co2_per_capita / energy_per_capita * 1000.
    fn prepare(df: DataFrame) -> Result<DataFrame, LoaderError> {
        for name in FOCUS_COLUMNS {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn(name.to_string()));
            }
        }

        let prepared = df
            .lazy()
            .select([
                col("country"),
                col("year").cast(DataType::Int32),
                col("co2_per_capita").cast(DataType::Float64),
                col("energy_per_capita").cast(DataType::Float64),
                col("gdp").cast(DataType::Float64),
                col("population").cast(DataType::Int64),
            ])
            .filter(col("year").gt_eq(lit(MIN_YEAR)))
            .drop_nulls(Some(vec![col("co2_per_capita"), col("energy_per_capita")]))
            .with_column(
                (col("co2_per_capita") / col("energy_per_capita") * lit(1000.0))
                    .alias("co2_intensity"),
            )
            .collect()?;

        info!(
            "prepared {} rows ({} columns) from {} onward",
            prepared.height(),
            prepared.width(),
            MIN_YEAR
        );
        Ok(prepared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_frame() -> DataFrame {
        df!(
            "country" => ["Brazil", "Brazil", "Germany", "Germany", "China"],
            "year" => [1989, 2000, 2000, 2010, 2010],
            "co2_per_capita" => [Some(2.0), Some(2.0), Some(9.0), None, Some(7.0)],
            "energy_per_capita" => [Some(10000.0), Some(12000.0), Some(40000.0), Some(41000.0), None],
            "gdp" => [Some(1.0e12), Some(1.2e12), Some(2.0e12), None, Some(5.0e12)],
            "population" => [170_000_000i64, 175_000_000, 82_000_000, 81_000_000, 1_300_000_000],
            "iso_code" => ["BRA", "BRA", "DEU", "DEU", "CHN"],
        )
        .unwrap()
    }

    #[test]
    fn prepare_derives_intensity_for_every_row() {
        let df = DatasetLoader::prepare(raw_frame()).unwrap();
        let co2 = df.column("co2_per_capita").unwrap().f64().unwrap();
        let energy = df.column("energy_per_capita").unwrap().f64().unwrap();
        let intensity = df.column("co2_intensity").unwrap().f64().unwrap();

        assert!(df.height() > 0);
        for i in 0..df.height() {
            let expected = co2.get(i).unwrap() / energy.get(i).unwrap() * 1000.0;
            assert!((intensity.get(i).unwrap() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn prepare_drops_incomplete_rows() {
        let df = DatasetLoader::prepare(raw_frame()).unwrap();
        let co2 = df.column("co2_per_capita").unwrap();
        let energy = df.column("energy_per_capita").unwrap();

        assert_eq!(co2.null_count(), 0);
        assert_eq!(energy.null_count(), 0);
        // Germany 2010 (null co2) and China 2010 (null energy) are gone.
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn prepare_excludes_years_before_1990() {
        let df = DatasetLoader::prepare(raw_frame()).unwrap();
        let years = df.column("year").unwrap().i32().unwrap();
        assert!(years.into_iter().flatten().all(|y| y >= MIN_YEAR));
    }

    #[test]
    fn prepare_projects_to_focus_columns_plus_intensity() {
        let df = DatasetLoader::prepare(raw_frame()).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(!names.contains(&"iso_code".to_string()));
        assert!(names.contains(&"co2_intensity".to_string()));
        assert_eq!(names.len(), FOCUS_COLUMNS.len() + 1);
    }

    #[test]
    fn prepare_rejects_missing_schema() {
        let df = df!(
            "country" => ["Brazil"],
            "year" => [2000],
        )
        .unwrap();

        match DatasetLoader::prepare(df) {
            Err(LoaderError::MissingColumn(name)) => assert_eq!(name, "co2_per_capita"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }
}
