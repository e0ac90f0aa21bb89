//! Statistics Calculator Module
//! Pearson correlation KPI between energy use and CO2 emissions.

use polars::prelude::*;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Coefficients at or above this read as a strong positive relationship.
pub const STRONG_CORRELATION_THRESHOLD: f64 = 0.7;

/// Correlation KPI for a single-year slice.
#[derive(Debug, Clone)]
pub struct CorrelationKpi {
    pub year: i32,
    pub coefficient: f64,
    pub p_value: Option<f64>,
    pub sample_size: usize,
}

impl CorrelationKpi {
    /// Short qualitative label for the coefficient.
    pub fn label(&self) -> &'static str {
        if self.coefficient >= STRONG_CORRELATION_THRESHOLD {
            "strong positive"
        } else {
            "moderate/weak"
        }
    }

    /// One-line interpretation shown next to the metric.
    pub fn interpretation(&self) -> &'static str {
        if self.coefficient >= STRONG_CORRELATION_THRESHOLD {
            "Higher energy use is strongly tied to higher CO2 per capita."
        } else {
            "Energy use is only loosely tied to CO2 per capita."
        }
    }
}

/// Correlation computations over the year slice.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Pearson correlation coefficient over paired samples.
    ///
    /// None for fewer than two pairs or zero variance on either side.
    pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
        let n = xs.len().min(ys.len());
        if n < 2 {
            return None;
        }

        let nf = n as f64;
        let mean_x = xs[..n].iter().sum::<f64>() / nf;
        let mean_y = ys[..n].iter().sum::<f64>() / nf;

        let mut cov = 0.0;
        let mut var_x = 0.0;
        let mut var_y = 0.0;
        for i in 0..n {
            let dx = xs[i] - mean_x;
            let dy = ys[i] - mean_y;
            cov += dx * dy;
            var_x += dx * dx;
            var_y += dy * dy;
        }

        if var_x == 0.0 || var_y == 0.0 {
            return None;
        }
        Some(cov / (var_x * var_y).sqrt())
    }

    /// Two-tailed p-value for a correlation coefficient over n samples,
    /// via the t-distribution with n - 2 degrees of freedom.
    fn correlation_p_value(r: f64, n: usize) -> Option<f64> {
        if n < 3 {
            return None;
        }

        let df = (n - 2) as f64;
        let denom = 1.0 - r * r;
        if denom <= 0.0 {
            return Some(0.0);
        }

        let t = r * (df / denom).sqrt();
        let dist = StudentsT::new(0.0, 1.0, df).ok()?;
        Some(2.0 * (1.0 - dist.cdf(t.abs())))
    }

    /// Correlation KPI between energy_per_capita and co2_per_capita over a
    /// single-year slice. None when the slice has no usable pairs.
    pub fn correlation_kpi(df_year: &DataFrame, year: i32) -> Option<CorrelationKpi> {
        let energy = df_year.column("energy_per_capita").ok()?.f64().ok()?;
        let co2 = df_year.column("co2_per_capita").ok()?.f64().ok()?;

        let mut xs = Vec::with_capacity(df_year.height());
        let mut ys = Vec::with_capacity(df_year.height());
        for (e, c) in energy.into_iter().zip(co2) {
            if let (Some(e), Some(c)) = (e, c) {
                xs.push(e);
                ys.push(c);
            }
        }

        let coefficient = Self::pearson(&xs, &ys)?;
        Some(CorrelationKpi {
            year,
            coefficient,
            p_value: Self::correlation_p_value(coefficient, xs.len()),
            sample_size: xs.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kpi_with(coefficient: f64) -> CorrelationKpi {
        CorrelationKpi {
            year: 2020,
            coefficient,
            p_value: None,
            sample_size: 10,
        }
    }

    #[test]
    fn label_is_strong_positive_at_and_above_threshold() {
        assert_eq!(kpi_with(0.7).label(), "strong positive");
        assert_eq!(kpi_with(0.71).label(), "strong positive");
        assert_eq!(kpi_with(0.99).label(), "strong positive");
    }

    #[test]
    fn label_is_moderate_weak_below_threshold() {
        assert_eq!(kpi_with(0.699).label(), "moderate/weak");
        assert_eq!(kpi_with(0.0).label(), "moderate/weak");
        assert_eq!(kpi_with(-0.9).label(), "moderate/weak");
    }

    #[test]
    fn pearson_detects_perfect_correlation() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let positive = StatsCalculator::pearson(&xs, &[2.0, 4.0, 6.0, 8.0]).unwrap();
        let negative = StatsCalculator::pearson(&xs, &[8.0, 6.0, 4.0, 2.0]).unwrap();
        assert!((positive - 1.0).abs() < 1e-12);
        assert!((negative + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_rejects_degenerate_input() {
        assert!(StatsCalculator::pearson(&[1.0], &[2.0]).is_none());
        assert!(StatsCalculator::pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn kpi_is_none_for_empty_slice() {
        let df = df!(
            "energy_per_capita" => Vec::<f64>::new(),
            "co2_per_capita" => Vec::<f64>::new(),
        )
        .unwrap();
        assert!(StatsCalculator::correlation_kpi(&df, 2020).is_none());
    }

    #[test]
    fn kpi_skips_incomplete_pairs() {
        let df = df!(
            "energy_per_capita" => [Some(10.0), Some(20.0), None, Some(30.0)],
            "co2_per_capita" => [Some(1.0), Some(2.0), Some(9.0), Some(3.0)],
        )
        .unwrap();

        let kpi = StatsCalculator::correlation_kpi(&df, 2020).unwrap();
        assert_eq!(kpi.sample_size, 3);
        assert!((kpi.coefficient - 1.0).abs() < 1e-12);
        assert_eq!(kpi.year, 2020);
    }

    #[test]
    fn strong_correlation_has_small_p_value() {
        let xs: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        let df = df!(
            "energy_per_capita" => xs,
            "co2_per_capita" => ys,
        )
        .unwrap();

        let kpi = StatsCalculator::correlation_kpi(&df, 2020).unwrap();
        let p = kpi.p_value.unwrap();
        assert!(p < 0.001, "p-value was {p}");
    }
}
