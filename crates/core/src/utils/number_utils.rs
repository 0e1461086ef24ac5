/// Replaces NaN and infinities with 0.
///
/// JSON has no representation for non-finite numbers: `serde_json` writes
/// them as `null`, so they must never reach the stored document.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Drops a non-finite optional amount.
pub fn finite_or_none(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
