/// Trailing rolling mean requiring a full window of present values.
///
/// Slot `i` holds the mean of `values[i + 1 - window ..= i]` when all of
/// those are present, otherwise `None`. A zero window yields all `None`.
#[must_use]
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || window > values.len() {
        return out;
    }
    for (offset, chunk) in values.windows(window).enumerate() {
        let sum: Option<f64> = chunk.iter().copied().sum();
        // window is small enough for an exact conversion
        #[allow(clippy::cast_precision_loss)]
        let mean = sum.map(|s| s / window as f64);
        out[offset + window - 1] = mean;
    }
    out
}

/// Median of the finite values, `None` when there is none.
#[must_use]
pub fn median<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut v: Vec<f64> = values.into_iter().filter(|x| x.is_finite()).collect();
    if v.is_empty() {
        return None;
    }
    v.sort_by(f64::total_cmp);
    let mid = v.len() / 2;
    if v.len() % 2 == 0 {
        Some(f64::midpoint(v[mid - 1], v[mid]))
    } else {
        Some(v[mid])
    }
}

/// Largest absolute present value, `None` when nothing is present.
#[must_use]
pub fn max_abs(values: &[Option<f64>]) -> Option<f64> {
    values
        .iter()
        .flatten()
        .map(|x| x.abs())
        .max_by(f64::total_cmp)
}
