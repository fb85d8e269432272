//! Numeric text-field parsing for the control panel.
//!
//! The W/H/rotation inputs hold free text while focused. On commit an empty
//! field counts as `0`; anything unparsable leaves the previous value alone.

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;

/// Parse committed field text. `None` means "keep the previous value".
pub fn parse_field(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Render a value for display: at most two decimals, no trailing zeros.
pub fn format_field(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_owned();
    }
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_owned() } else { text.to_owned() }
}
