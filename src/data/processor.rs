//! Dataset Processor Module
//! Country and year filtering over the prepared frame.

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Stateless filtering helpers for the prepared dataset.
pub struct DatasetProcessor;

impl DatasetProcessor {
    /// Sorted unique country names present in the frame.
    pub fn countries(df: &DataFrame) -> Vec<String> {
        df.column("country")
            .ok()
            .and_then(|col| col.unique().ok())
            .map(|unique| {
                let series = unique.as_materialized_series();
                let mut names: Vec<String> = (0..series.len())
                    .filter_map(|i| {
                        let val = series.get(i).ok()?;
                        if val.is_null() {
                            None
                        } else {
                            Some(val.to_string().trim_matches('"').to_string())
                        }
                    })
                    .collect();
                names.sort();
                names
            })
            .unwrap_or_default()
    }

    /// (min, max) year present, None for an empty frame.
    pub fn year_bounds(df: &DataFrame) -> Option<(i32, i32)> {
        let years = df.column("year").ok()?.i32().ok()?;
        Some((years.min()?, years.max()?))
    }

    /// Rows for the selected countries, all years (trend set).
    pub fn filter_countries(
        df: &DataFrame,
        selection: &[String],
    ) -> Result<DataFrame, ProcessorError> {
        let countries = df.column("country")?.str()?;
        let mask: BooleanChunked = countries
            .into_iter()
            .map(|name| name.is_some_and(|n| selection.iter().any(|s| s == n)))
            .collect();
        Ok(df.filter(&mask)?)
    }

    /// Rows for a single year (scatter/KPI set).
    pub fn filter_year(df: &DataFrame, year: i32) -> Result<DataFrame, ProcessorError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col("year").eq(lit(year)))
            .collect()?;
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df!(
            "country" => ["Germany", "Brazil", "Brazil", "China"],
            "year" => [2000, 2000, 2010, 2010],
            "co2_intensity" => [225.0, 166.7, 150.0, 250.0],
        )
        .unwrap()
    }

    #[test]
    fn countries_are_sorted_and_unique() {
        let names = DatasetProcessor::countries(&frame());
        assert_eq!(names, vec!["Brazil", "China", "Germany"]);
    }

    #[test]
    fn year_bounds_span_the_frame() {
        assert_eq!(DatasetProcessor::year_bounds(&frame()), Some((2000, 2010)));
    }

    #[test]
    fn filter_countries_keeps_selection_only() {
        let selection = vec!["Brazil".to_string()];
        let filtered = DatasetProcessor::filter_countries(&frame(), &selection).unwrap();
        assert_eq!(filtered.height(), 2);
        let names = DatasetProcessor::countries(&filtered);
        assert_eq!(names, vec!["Brazil"]);
    }

    #[test]
    fn filter_countries_with_empty_selection_is_empty() {
        let filtered = DatasetProcessor::filter_countries(&frame(), &[]).unwrap();
        assert_eq!(filtered.height(), 0);
    }

    #[test]
    fn filter_year_keeps_single_year() {
        let filtered = DatasetProcessor::filter_year(&frame(), 2010).unwrap();
        assert_eq!(filtered.height(), 2);
        assert_eq!(DatasetProcessor::year_bounds(&filtered), Some((2010, 2010)));
    }
}
