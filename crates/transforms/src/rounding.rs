//! Apportioned rounding: round a sequence so the rounded parts sum exactly
//! to the rounded whole.

/// Round half to even at `ndigits` decimal places (banker's rounding, the
/// same tie-breaking the source data tooling uses).
#[must_use]
pub fn round_half_even(value: f64, ndigits: i32) -> f64 {
    let factor = 10f64.powi(ndigits);
    (value * factor).round_ties_even() / factor
}

/// Round a sequence so its rounded values sum to the rounded total.
///
/// Largest-remainder-equivalent method via cumulative differencing: each
/// output element is the difference between consecutive rounded cumulative
/// prefixes, so rounding error is absorbed left to right and
/// `sum(output) == round(sum(input), ndigits)` holds exactly. Nulls count as
/// zero for accumulation and are restored in place afterwards. A negative
/// `ndigits` means no rounding was requested; the input comes back unchanged.
#[must_use]
pub fn round_apportioned(values: &[Option<f64>], ndigits: i32) -> Vec<Option<f64>> {
    if ndigits < 0 {
        return values.to_vec();
    }
    let mut output = Vec::with_capacity(values.len());
    let mut running = 0.0;
    let mut prev_baseline = 0.0;
    for &value in values {
        running += value.unwrap_or(0.0);
        let cumsum = round_half_even(running, ndigits);
        let rounded = cumsum - prev_baseline;
        prev_baseline = cumsum;
        output.push(value.map(|_| rounded));
    }
    output
}
