//! Routing primitives: what is being resolved and who may serve it.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Data needs resolved by the fallback chain, one candidate list each.
///
/// These map one-to-one with resolver calls and give consistent labels for
/// errors, logs, and provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataNeed {
    /// Daily closing prices of the China-listed ETF.
    EtfPrice,
    /// Daily closing prices of the US-listed benchmark ETF.
    BenchmarkPrice,
    /// Published net asset value per share of the China-listed ETF.
    Nav,
}

impl DataNeed {
    /// Every need in pipeline resolution order.
    pub const ALL: [Self; 3] = [Self::EtfPrice, Self::BenchmarkPrice, Self::Nav];

    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EtfPrice => "etf-price",
            Self::BenchmarkPrice => "benchmark-price",
            Self::Nav => "nav",
        }
    }

    /// Whether exhausting the candidates for this need stops the run.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Nav)
    }

    /// Whether the need is served by price history (as opposed to NAV history).
    #[must_use]
    pub const fn is_price(self) -> bool {
        matches!(self, Self::EtfPrice | Self::BenchmarkPrice)
    }
}

impl fmt::Display for DataNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed key naming a registered connector in per-need priority lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectorKey(&'static str);

impl ConnectorKey {
    /// Wrap a connector's static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the connector name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ConnectorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
