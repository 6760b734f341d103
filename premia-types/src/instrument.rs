//! Instruments and the requested date window.

use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PremiaError;

/// Listing venue of an instrument; connectors declare which ones they serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    /// Shanghai or Shenzhen listing (exchange is resolved by code spelling).
    China,
    /// US listing.
    Us,
}

impl Market {
    /// Stable lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::China => "china",
            Self::Us => "us",
        }
    }
}

/// Provider-agnostic instrument identifier.
///
/// The symbol is the bare exchange code (`159941`, `QQQ`); connectors derive
/// their own spellings (`159941.SZ`, `0.159941`, ...) from it.
/// Deserialization goes through [`Instrument::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "InstrumentRaw")]
pub struct Instrument {
    symbol: String,
    market: Market,
}

impl Instrument {
    /// Build an instrument from a bare code.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the symbol is blank or contains whitespace.
    pub fn new(symbol: &str, market: Market) -> Result<Self, PremiaError> {
        let symbol = symbol.trim();
        if symbol.is_empty() || symbol.chars().any(char::is_whitespace) {
            return Err(PremiaError::InvalidArg(format!(
                "invalid instrument symbol: {symbol:?}"
            )));
        }
        Ok(Self {
            symbol: symbol.to_ascii_uppercase(),
            market,
        })
    }

    /// China-listed instrument.
    ///
    /// # Errors
    /// See [`Instrument::new`].
    pub fn china(symbol: &str) -> Result<Self, PremiaError> {
        Self::new(symbol, Market::China)
    }

    /// US-listed instrument.
    ///
    /// # Errors
    /// See [`Instrument::new`].
    pub fn us(symbol: &str) -> Result<Self, PremiaError> {
        Self::new(symbol, Market::Us)
    }

    /// Bare code, uppercased.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Listing venue.
    #[must_use]
    pub const fn market(&self) -> Market {
        self.market
    }
}

#[derive(Deserialize)]
struct InstrumentRaw {
    symbol: String,
    market: Market,
}

impl TryFrom<InstrumentRaw> for Instrument {
    type Error = PremiaError;

    fn try_from(raw: InstrumentRaw) -> Result<Self, Self::Error> {
        Self::new(&raw.symbol, raw.market)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.symbol, self.market.as_str())
    }
}

/// Inclusive calendar date window `[start, end]`.
///
/// Deserialization goes through [`DateWindow::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateWindowRaw")]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Build a window, rejecting `start > end`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the start date is after the end date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PremiaError> {
        if start > end {
            return Err(PremiaError::InvalidArg(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// First requested date.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last requested date.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Copy of this window starting no earlier than `floor`.
    ///
    /// A floor past the end collapses the window to the end date.
    #[must_use]
    pub fn starting_no_earlier_than(self, floor: NaiveDate) -> Self {
        let start = self.start.max(floor).min(self.end);
        Self {
            start,
            end: self.end,
        }
    }

    /// Whether `date` lies inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[derive(Deserialize)]
struct DateWindowRaw {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<DateWindowRaw> for DateWindow {
    type Error = PremiaError;

    fn try_from(raw: DateWindowRaw) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
