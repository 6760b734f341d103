/// Replace each gap with the closest earlier value. Leading gaps stay.
pub fn forward_fill(values: &mut [Option<f64>]) {
    let mut last = None;
    for v in values.iter_mut() {
        match v {
            Some(x) => last = Some(*x),
            None => *v = last,
        }
    }
}

/// Replace each gap with the closest later value. Trailing gaps stay.
pub fn backward_fill(values: &mut [Option<f64>]) {
    let mut next = None;
    for v in values.iter_mut().rev() {
        match v {
            Some(x) => next = Some(*x),
            None => *v = next,
        }
    }
}

/// Forward fill, then backward fill.
///
/// After this call every slot is `Some` unless the input held no value at all.
pub fn fill_both_ways(values: &mut [Option<f64>]) {
    forward_fill(values);
    backward_fill(values);
}
