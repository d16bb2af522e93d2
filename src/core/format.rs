/// Formats one sample value for legends, tooltips and axis labels.
///
/// Values in `[0.1, 10000)` by magnitude are printed plainly; larger
/// magnitudes are scaled down and suffixed `k`, `M`, `G` or `T`, smaller
/// ones are scaled up and suffixed `m`, `u` or `n`. The scaled number is
/// rounded to two decimals with trailing zeros trimmed. Gaps (`None`) and
/// non-finite values render as `"NaN"`, exact zero as `"0"`.
#[must_use]
pub fn format_value(value: Option<f64>) -> String {
    let Some(value) = value else {
        return "NaN".to_owned();
    };
    if !value.is_finite() {
        return "NaN".to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }

    let magnitude = value.abs();
    if (0.1..10_000.0).contains(&magnitude) {
        return round_trimmed(value);
    }

    if magnitude >= 10_000.0 {
        let (scaled, suffix) = if magnitude < 1e7 {
            (value / 1e3, "k")
        } else if magnitude < 1e10 {
            (value / 1e6, "M")
        } else if magnitude < 1e13 {
            (value / 1e9, "G")
        } else {
            (value / 1e12, "T")
        };
        return format!("{}{}", round_trimmed(scaled), suffix);
    }

    let (scaled, suffix) = if magnitude >= 1e-3 {
        (value * 1e3, "m")
    } else if magnitude >= 1e-6 {
        (value * 1e6, "u")
    } else {
        (value * 1e9, "n")
    };
    format!("{}{}", round_trimmed(scaled), suffix)
}

/// Two-decimal rounding with trailing zeros and a dangling separator removed.
fn round_trimmed(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_owned()
    } else {
        text.to_owned()
    }
}
