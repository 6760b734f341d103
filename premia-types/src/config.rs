//! Configuration types shared by the orchestrator and the premium calculators.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PremiaError;
use crate::routing::{ConnectorKey, DataNeed};

/// Allowed range for the short rolling window.
pub const SHORT_WINDOW_BOUNDS: RangeInclusive<usize> = 10..=120;

/// Window sizes (in observations) used by the rolling-ratio proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioWindows {
    /// Preferred baseline window.
    pub long: usize,
    /// Smallest acceptable long window; shorter series switch to `short`.
    pub min_long: usize,
    /// Fallback window, also used by the >500% sanity recompute.
    pub short: usize,
    /// Leading observations forming the early reference period for median fill.
    pub reference_observations: usize,
}

impl Default for RatioWindows {
    fn default() -> Self {
        Self {
            long: 250,
            min_long: 60,
            short: 30,
            reference_observations: 60,
        }
    }
}

/// Plausibility ceilings (absolute percentage points) for the proxy strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlausibilityLimits {
    /// Return-spread output above this triggers the rolling-ratio proxy.
    pub return_spread_max_abs: f64,
    /// Rolling-ratio output above this triggers a short-window recompute.
    pub rolling_ratio_max_abs: f64,
}

impl Default for PlausibilityLimits {
    fn default() -> Self {
        Self {
            return_spread_max_abs: 50.0,
            rolling_ratio_max_abs: 500.0,
        }
    }
}

/// Regime band thresholds in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Values strictly above are flagged `is_high`.
    pub high: f64,
    /// Values strictly below are flagged `is_low`.
    pub low: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high: 8.0,
            low: 1.0,
        }
    }
}

/// Global configuration for the `Premia` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiaConfig {
    /// Preferred connector order per data need. Unlisted capable connectors
    /// follow in registration order.
    #[serde(skip)]
    pub per_need_priority: HashMap<DataNeed, Vec<ConnectorKey>>,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// A NAV series starting more than this many days after the required
    /// start is rejected and the next NAV source is tried.
    pub nav_max_coverage_gap_days: i64,
    /// Rolling-ratio window sizes.
    pub windows: RatioWindows,
    /// Plausibility ceilings for the proxy strategies.
    pub limits: PlausibilityLimits,
    /// High/low regime bands.
    pub thresholds: Thresholds,
}

impl Default for PremiaConfig {
    fn default() -> Self {
        Self {
            per_need_priority: HashMap::new(),
            provider_timeout: Duration::from_secs(5),
            nav_max_coverage_gap_days: 30,
            windows: RatioWindows::default(),
            limits: PlausibilityLimits::default(),
            thresholds: Thresholds::default(),
        }
    }
}

impl PremiaConfig {
    /// Check numeric settings for consistency.
    ///
    /// # Errors
    /// Returns `InvalidArg` describing the first offending setting.
    pub fn validate(&self) -> Result<(), PremiaError> {
        let w = &self.windows;
        if !SHORT_WINDOW_BOUNDS.contains(&w.short) {
            return Err(PremiaError::InvalidArg(format!(
                "short window {} outside {}..={}",
                w.short,
                SHORT_WINDOW_BOUNDS.start(),
                SHORT_WINDOW_BOUNDS.end()
            )));
        }
        if w.min_long == 0 || w.long < w.min_long {
            return Err(PremiaError::InvalidArg(format!(
                "long window {} must be >= minimum long window {} (> 0)",
                w.long, w.min_long
            )));
        }
        if w.reference_observations == 0 {
            return Err(PremiaError::InvalidArg(
                "reference period must hold at least one observation".into(),
            ));
        }
        let t = &self.thresholds;
        if !(t.high.is_finite() && t.low.is_finite()) || t.high <= t.low {
            return Err(PremiaError::InvalidArg(format!(
                "high threshold {} must be finite and above low threshold {}",
                t.high, t.low
            )));
        }
        let l = &self.limits;
        if !(l.return_spread_max_abs > 0.0 && l.rolling_ratio_max_abs > 0.0) {
            return Err(PremiaError::InvalidArg(
                "plausibility limits must be positive".into(),
            ));
        }
        if self.nav_max_coverage_gap_days < 0 {
            return Err(PremiaError::InvalidArg(
                "NAV coverage gap must not be negative".into(),
            ));
        }
        if self.provider_timeout.is_zero() {
            return Err(PremiaError::InvalidArg(
                "provider timeout must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
