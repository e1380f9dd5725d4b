//! Display helpers shared by the normalizer and the view-model builder.

use chrono::{DateTime, Utc};

/// Shown wherever a value is absent or cannot be derived.
pub const NOT_AVAILABLE: &str = "N/A";

/// Renders a number the way a spreadsheet export reads: integral values
/// without a decimal point, everything else in shortest decimal form.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// `Mar 1, 2024` style date.
pub fn format_day(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}
