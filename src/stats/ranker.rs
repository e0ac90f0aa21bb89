//! Progress Ranker Module
//! Ranks countries by the change in carbon intensity between a baseline
//! year and the latest year present in the dataset.

use polars::prelude::*;
use std::collections::HashMap;

/// Baseline year for the progress table.
pub const DEFAULT_START_YEAR: i32 = 2000;

/// Percentage change in carbon intensity for one country.
///
/// Sign convention: negative means the intensity dropped, which is the
/// desired direction.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEntry {
    pub country: String,
    pub pct_change: f64,
}

impl ProgressEntry {
    /// True when the intensity went down between the two years.
    pub fn is_improvement(&self) -> bool {
        self.pct_change < 0.0
    }
}

/// Countries ranked by intensity change, most improved first.
#[derive(Debug, Clone)]
pub struct ProgressRanking {
    pub start_year: i32,
    pub end_year: i32,
    pub entries: Vec<ProgressEntry>,
}

impl ProgressRanking {
    /// The `n` most improved countries.
    pub fn top(&self, n: usize) -> &[ProgressEntry] {
        &self.entries[..self.entries.len().min(n)]
    }
}

/// Builds the progress ranking from the prepared frame.
pub struct ProgressRanker;

impl ProgressRanker {
    /// Rank countries by percentage change in co2_intensity between
    /// `start_year` and the latest year present.
    ///
    /// Countries missing either year are dropped. A frame whose latest
    /// year equals `start_year` yields an empty ranking, not an error.
    pub fn rank(df: &DataFrame, start_year: i32) -> Result<ProgressRanking, PolarsError> {
        let years = df.column("year")?.i32()?;
        let Some(end_year) = years.max() else {
            return Ok(ProgressRanking {
                start_year,
                end_year: start_year,
                entries: Vec::new(),
            });
        };
        if end_year == start_year {
            return Ok(ProgressRanking {
                start_year,
                end_year,
                entries: Vec::new(),
            });
        }

        let countries = df.column("country")?.str()?;
        let intensity = df.column("co2_intensity")?.f64()?;

        // country -> (intensity at start_year, intensity at end_year)
        let mut pivot: HashMap<String, (Option<f64>, Option<f64>)> = HashMap::new();
        for i in 0..df.height() {
            let (Some(country), Some(year), Some(value)) =
                (countries.get(i), years.get(i), intensity.get(i))
            else {
                continue;
            };
            if year == start_year {
                pivot.entry(country.to_string()).or_default().0 = Some(value);
            } else if year == end_year {
                pivot.entry(country.to_string()).or_default().1 = Some(value);
            }
        }

        let mut entries: Vec<ProgressEntry> = pivot
            .into_iter()
            .filter_map(|(country, cell)| match cell {
                (Some(start), Some(end)) => Some(ProgressEntry {
                    country,
                    pct_change: ((end - start) / start * 100.0 * 100.0).round() / 100.0,
                }),
                _ => None,
            })
            .collect();

        // Alphabetical pass first so equal percentages keep a stable order.
        entries.sort_by(|a, b| a.country.cmp(&b.country));
        entries.sort_by(|a, b| {
            a.pct_change
                .partial_cmp(&b.pct_change)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(ProgressRanking {
            start_year,
            end_year,
            entries,
        })
    }
}
