//! Gap filling for regressor columns held as `Option<f64>` per grid slot.

/// Linear interpolation by position between observed values. Leading and
/// trailing gaps take the nearest observed value, so the result is fully
/// populated unless the input holds no values at all.
pub fn interpolate_linear(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let observed: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| value.map(|v| (idx, v)))
        .collect();

    let (Some(&(first_idx, first_val)), Some(&(last_idx, last_val))) =
        (observed.first(), observed.last())
    else {
        return values.to_vec();
    };

    let mut out = values.to_vec();
    for slot in out.iter_mut().take(first_idx) {
        *slot = Some(first_val);
    }
    for slot in out.iter_mut().skip(last_idx + 1) {
        *slot = Some(last_val);
    }

    for window in observed.windows(2) {
        let (left_idx, left_val) = window[0];
        let (right_idx, right_val) = window[1];
        let span = (right_idx - left_idx) as f64;
        for idx in (left_idx + 1)..right_idx {
            let weight = (idx - left_idx) as f64 / span;
            out[idx] = Some(left_val + (right_val - left_val) * weight);
        }
    }

    out
}

pub fn forward_fill(values: &mut [Option<f64>]) {
    let mut last = None;
    for slot in values.iter_mut() {
        match *slot {
            Some(value) => last = Some(value),
            None => *slot = last,
        }
    }
}

pub fn backward_fill(values: &mut [Option<f64>]) {
    let mut next = None;
    for slot in values.iter_mut().rev() {
        match *slot {
            Some(value) => next = Some(value),
            None => *slot = next,
        }
    }
}
