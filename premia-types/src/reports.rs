//! Report envelopes handed to the presentation layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::error::PremiaError;
use crate::frame::AlignedFrame;
use crate::instrument::{DateWindow, Instrument};
use crate::outcome::StrategyOutcome;
use crate::routing::DataNeed;

/// Which connector served a data need, and what was skipped before it.
///
/// Built by the fallback resolver; the `skipped` list keeps the failures of
/// higher-priority candidates so a lower-priority answer is never presented
/// without disclosing why it was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Need that was resolved.
    pub need: DataNeed,
    /// Winning connector name.
    pub connector: String,
    /// Rows served.
    pub rows: usize,
    /// First served date.
    pub first: NaiveDate,
    /// Last served date.
    pub last: NaiveDate,
    /// Failures of the candidates tried before the winner, in order.
    pub skipped: Vec<PremiaError>,
}

/// One classified premium observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumPoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Premium in percent.
    pub value: f64,
    /// `value > thresholds.high`.
    pub is_high: bool,
    /// `value < thresholds.low`.
    pub is_low: bool,
}

/// Gap-free premium series with regime flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumSeries {
    /// Points in date order, one per aligned date.
    pub points: Vec<PremiumPoint>,
    /// Bands used for the flags.
    pub thresholds: Thresholds,
}

impl PremiumSeries {
    /// Premium values in date order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Most recent point.
    #[must_use]
    pub fn latest(&self) -> Option<&PremiumPoint> {
        self.points.last()
    }
}

/// Figures shown next to the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSummary {
    /// Date of the latest premium.
    pub latest_date: NaiveDate,
    /// Latest premium in percent.
    pub latest_value: f64,
    /// Change against the previous observation; `None` for a single point.
    pub delta: Option<f64>,
    /// Latest NAV, only for NAV-based results.
    pub latest_nav: Option<f64>,
    /// Number of points flagged high.
    pub high_days: usize,
    /// Number of points flagged low.
    pub low_days: usize,
    /// Smallest premium.
    pub min: f64,
    /// Largest premium.
    pub max: f64,
    /// Arithmetic mean premium.
    pub mean: f64,
}

/// Everything an indicator run produces.
///
/// The presentation layer must show `outcome` (authoritative vs estimated)
/// alongside the chart; `warnings` lists non-fatal conditions such as an
/// unavailable NAV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReport {
    /// Target ETF.
    pub etf: Instrument,
    /// Benchmark ETF.
    pub benchmark: Instrument,
    /// Requested window.
    pub window: DateWindow,
    /// Aligned raw inputs (ETF price, benchmark price, and NAV when used).
    pub frame: AlignedFrame,
    /// Classified premium series.
    pub premium: PremiumSeries,
    /// Strategy provenance.
    pub outcome: StrategyOutcome,
    /// Provider provenance per resolved need.
    pub resolutions: Vec<Resolution>,
    /// Headline figures.
    pub summary: IndicatorSummary,
    /// Non-fatal issues encountered during the run.
    pub warnings: Vec<PremiaError>,
}

impl IndicatorReport {
    /// Provenance for `need`, if it was resolved.
    #[must_use]
    pub fn resolution(&self, need: DataNeed) -> Option<&Resolution> {
        self.resolutions.iter().find(|r| r.need == need)
    }
}
