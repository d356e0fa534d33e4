/// `0.873` -> `"87.30%"`.
pub fn confidence_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Width for a probability bar, clamped to the 0..=100 range CSS expects.
pub fn bar_width(fraction: f64) -> String {
    format!("width: {:.1}%", (fraction * 100.0).clamp(0.0, 100.0))
}

pub fn yield_amount(tons_per_hectare: f64) -> String {
    format!("{} tons/hectare", tons_per_hectare)
}

/// Class labels come straight from the model (`Early_blight`); show them
/// with spaces.
pub fn disease_label(raw: &str) -> String {
    raw.replace('_', " ")
}

/// Shortens an ISO timestamp to its date part.
pub fn short_date(iso: &str) -> &str {
    iso.split('T').next().unwrap_or(iso)
}

/// Keeps long file names readable on a button.
pub fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() > max_chars {
        let head: String = name.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}
