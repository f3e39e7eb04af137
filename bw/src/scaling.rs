//! Scaling ingredient amounts to a different number of servings.

/// Round to at most two decimal places, half away from zero. Values too large
/// to carry decimals are returned as they are.
pub fn round2(value: f64) -> f64 {
    let hundredths = value * 100.0;
    if hundredths.is_finite() {
        hundredths.round() / 100.0
    } else {
        value
    }
}

/// Convert an amount stored for `base_servings` into the amount for `target_servings`.
///
/// Empty and zero amounts stay empty, so the display never shows a made-up "0".
/// A base serving count of 0 is treated as 1. An amount that overflows when
/// scaled is dropped as well.
pub fn scale(base_amount: Option<f64>, base_servings: u32, target_servings: u32) -> Option<f64> {
    let amount = base_amount.filter(|a| a.is_finite() && *a > 0.0)?;
    let base_servings = f64::from(base_servings.max(1));
    let scaled = amount / base_servings * f64::from(target_servings);
    scaled.is_finite().then(|| round2(scaled))
}
