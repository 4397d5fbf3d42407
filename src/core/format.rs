use chrono::DateTime;

/// Formats a number the way a scripting host would stringify it.
///
/// Integral values print without a fractional part, `-0` prints as `0` and
/// non-finite values use the `NaN`/`Infinity` spellings.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }
    format!("{value}")
}

/// Formats with at most `max_decimals` fraction digits, trimming trailing zeros.
#[must_use]
pub fn format_trimmed(value: f64, max_decimals: usize) -> String {
    if !value.is_finite() {
        return format_number(value);
    }
    let mut text = format!("{value:.max_decimals$}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    if text == "-0" {
        text = "0".to_owned();
    }
    text
}

/// Short locale-style date label (`M/D/YYYY`) for an epoch-millis timestamp.
#[must_use]
pub fn format_date_label(epoch_millis: f64) -> String {
    if !epoch_millis.is_finite() {
        return "Invalid Date".to_owned();
    }
    match DateTime::from_timestamp_millis(epoch_millis as i64) {
        Some(time) => time.format("%-m/%-d/%Y").to_string(),
        None => "Invalid Date".to_owned(),
    }
}
