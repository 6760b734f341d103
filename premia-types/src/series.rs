//! Daily observation series.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::instrument::DateWindow;

/// Ordered `(date, value)` observations.
///
/// Invariants, enforced by every constructor (including deserialization):
/// - dates are strictly increasing, hence unique;
/// - every value is finite; nulls, NaN and infinities are dropped, never stored.
///
/// Duplicate dates keep the first value seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(NaiveDate, f64)>", into = "Vec<(NaiveDate, f64)>")]
pub struct TimeSeries {
    points: Vec<(NaiveDate, f64)>,
}

impl TimeSeries {
    /// Build a series from unordered observations.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        Self::from_optional(points.into_iter().map(|(d, v)| (d, Some(v))))
    }

    /// Build a series from observations that may be missing.
    pub fn from_optional<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, Option<f64>)>,
    {
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for (date, value) in points {
            let Some(v) = value.filter(|v| v.is_finite()) else {
                continue;
            };
            if let Entry::Vacant(slot) = by_date.entry(date) {
                slot.insert(v);
            }
        }
        Self {
            points: by_date.into_iter().collect(),
        }
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when there is no observation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Observations in date order.
    #[must_use]
    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    /// Iterate observations in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points.iter().copied()
    }

    /// Iterate dates in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|(d, _)| *d)
    }

    /// Earliest observed date.
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|(d, _)| *d)
    }

    /// Latest observed date.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|(d, _)| *d)
    }

    /// Latest observation.
    #[must_use]
    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.points.last().copied()
    }

    /// Value observed on `date`.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |(d, _)| *d)
            .ok()
            .map(|i| self.points[i].1)
    }

    /// Observations that fall inside `window`.
    #[must_use]
    pub fn clipped(&self, window: &DateWindow) -> Self {
        Self {
            points: self
                .points
                .iter()
                .copied()
                .filter(|(d, _)| window.contains(*d))
                .collect(),
        }
    }
}

impl From<Vec<(NaiveDate, f64)>> for TimeSeries {
    fn from(points: Vec<(NaiveDate, f64)>) -> Self {
        Self::from_points(points)
    }
}

impl From<TimeSeries> for Vec<(NaiveDate, f64)> {
    fn from(series: TimeSeries) -> Self {
        series.points
    }
}

impl FromIterator<(NaiveDate, f64)> for TimeSeries {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, f64)>>(iter: T) -> Self {
        Self::from_points(iter)
    }
}
