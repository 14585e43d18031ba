//! Mathematical helpers for prediction statistics
//!
//! Percentages with zero-division handling and decimal rounding that matches
//! how values are displayed to users.

/// Calculate percentage safely, returning 0.0 if total is zero.
///
/// # Examples
/// ```
/// use ids_batch_client::utils::math::safe_percentage;
///
/// assert_eq!(safe_percentage(20, 100), 20.0);
/// assert_eq!(safe_percentage(1, 4), 25.0);
/// assert_eq!(safe_percentage(50, 0), 0.0);  // Zero-division guard
/// ```
#[inline]
pub fn safe_percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Round to a fixed number of decimal places
///
/// # Examples
/// ```
/// use ids_batch_client::utils::math::round_to;
///
/// assert_eq!(round_to(33.3333, 1), 33.3);
/// assert_eq!(round_to(98.766, 2), 98.77);
/// ```
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Clamp a percentage into `[0, 100]`; NaN maps to 0
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
