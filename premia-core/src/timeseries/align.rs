use std::collections::BTreeMap;

use premia_types::{AlignedFrame, PremiaError, TimeSeries};

/// Inner-join every series in `series` on exact date matches.
///
/// Each name in `required` must be present with at least one row. Every other
/// entry takes part in the join as well; pass only the series that should
/// constrain the date index. No value is interpolated or carried forward.
///
/// # Errors
/// - `MissingRequired` for the first required name that is absent or empty.
/// - `AlignmentEmpty` when no date is shared by all series.
pub fn align(
    series: &BTreeMap<String, TimeSeries>,
    required: &[&str],
) -> Result<AlignedFrame, PremiaError> {
    for name in required {
        if series.get(*name).is_none_or(TimeSeries::is_empty) {
            return Err(PremiaError::MissingRequired {
                name: (*name).to_string(),
            });
        }
    }

    // Drive the join from the shortest input to keep lookups minimal.
    let Some(pivot) = series.values().min_by_key(|s| s.len()) else {
        return Err(PremiaError::AlignmentEmpty { names: vec![] });
    };
    let dates: Vec<_> = pivot
        .dates()
        .filter(|d| series.values().all(|s| s.get(*d).is_some()))
        .collect();

    if dates.is_empty() {
        return Err(PremiaError::AlignmentEmpty {
            names: series.keys().cloned().collect(),
        });
    }

    let mut columns = BTreeMap::new();
    for (name, s) in series {
        let mut values = Vec::with_capacity(dates.len());
        for d in &dates {
            let v = s.get(*d).ok_or_else(|| {
                PremiaError::Data(format!("{name} lost date {d} during alignment"))
            })?;
            values.push(v);
        }
        columns.insert(name.clone(), values);
    }
    AlignedFrame::from_columns(dates, columns)
}
