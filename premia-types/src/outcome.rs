//! Provenance of the winning premium computation.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Premium computation methods, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PremiumStrategy {
    /// `(price - nav) / nav * 100`.
    NavBased,
    /// Daily return of the ETF minus daily return of the benchmark, in percent.
    ReturnSpread,
    /// Deviation of `price / benchmark` from its rolling mean, in percent.
    RollingRatio,
}

impl PremiumStrategy {
    /// Precedence rank (1 = authoritative).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::NavBased => 1,
            Self::ReturnSpread => 2,
            Self::RollingRatio => 3,
        }
    }

    /// Stable, kebab-case identifier for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NavBased => "nav-based",
            Self::ReturnSpread => "return-spread",
            Self::RollingRatio => "rolling-ratio",
        }
    }

    /// How far the resulting series may be trusted.
    #[must_use]
    pub const fn reliability(self) -> Reliability {
        match self {
            Self::NavBased => Reliability::Authoritative,
            Self::ReturnSpread | Self::RollingRatio => Reliability::Estimated,
        }
    }
}

impl fmt::Display for PremiumStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (strategy {})", self.as_str(), self.rank())
    }
}

/// Whether a premium series derives from published NAV or from a proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reliability {
    /// Computed against the issuer's published NAV.
    Authoritative,
    /// Estimated from relative price behaviour against the benchmark.
    Estimated,
}

/// A strategy that was computed and then discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyFallback {
    /// Strategy whose output was rejected.
    pub from: PremiumStrategy,
    /// Observed maximum absolute value, when one existed.
    pub max_abs: Option<f64>,
    /// Why it was rejected.
    pub reason: String,
}

/// Which strategy produced the final premium series, and from what data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyOutcome {
    /// Winning strategy.
    pub strategy: PremiumStrategy,
    /// Trust level implied by the strategy.
    pub reliability: Reliability,
    /// Connector that served the NAV series, for NAV-based results.
    pub nav_source: Option<String>,
    /// Rolling window (observations) of the ratio baseline, for rolling-ratio results.
    pub baseline_window: Option<usize>,
    /// Strategies tried and rejected before the winner, in order.
    pub fallbacks: Vec<StrategyFallback>,
}

impl StrategyOutcome {
    /// Outcome for `strategy` with no recorded fallbacks.
    #[must_use]
    pub const fn new(strategy: PremiumStrategy) -> Self {
        Self {
            strategy,
            reliability: strategy.reliability(),
            nav_source: None,
            baseline_window: None,
            fallbacks: Vec::new(),
        }
    }

    /// True when the result is backed by published NAV.
    #[must_use]
    pub fn is_authoritative(&self) -> bool {
        self.reliability == Reliability::Authoritative
    }
}
