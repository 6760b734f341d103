//! Date-aligned columns produced by the series aligner.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PremiaError;
use crate::series::TimeSeries;

/// Column holding the China-listed ETF closes.
pub const ETF_PRICE: &str = "etf_price";
/// Column holding the US benchmark closes.
pub const BENCHMARK_PRICE: &str = "benchmark_price";
/// Column holding the ETF's published NAV.
pub const NAV: &str = "nav";

/// Inner-joined columns sharing one strictly increasing date index.
///
/// Every column has exactly one finite value per date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedFrame {
    dates: Vec<NaiveDate>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl AlignedFrame {
    /// Assemble a frame from an index and equally long columns.
    ///
    /// # Errors
    /// Returns `Data` if a column length differs from the index, a value is
    /// not finite, or dates are not strictly increasing.
    pub fn from_columns(
        dates: Vec<NaiveDate>,
        columns: BTreeMap<String, Vec<f64>>,
    ) -> Result<Self, PremiaError> {
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(PremiaError::Data(
                "aligned dates must be strictly increasing".into(),
            ));
        }
        for (name, values) in &columns {
            if values.len() != dates.len() {
                return Err(PremiaError::Data(format!(
                    "column {name} has {} rows for {} dates",
                    values.len(),
                    dates.len()
                )));
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(PremiaError::Data(format!(
                    "column {name} holds a non-finite value"
                )));
            }
        }
        Ok(Self { dates, columns })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// True when no date survived the join.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Shared date index.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Values of `name`, one per date.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Whether the frame carries a column called `name`.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Column `name` re-keyed by date.
    #[must_use]
    pub fn series(&self, name: &str) -> Option<TimeSeries> {
        self.column(name)
            .map(|values| self.dates.iter().copied().zip(values.iter().copied()).collect())
    }
}
