//! Stats module - correlation KPI and progress ranking

mod calculator;
mod ranker;

pub use calculator::{CorrelationKpi, StatsCalculator, STRONG_CORRELATION_THRESHOLD};
pub use ranker::{ProgressEntry, ProgressRanker, ProgressRanking, DEFAULT_START_YEAR};
