//! Display formatting for elapsed time and cost figures.

/// Formats a duration in seconds as a clock string.
///
/// Fractional seconds are truncated, not rounded. Durations of an hour or
/// more render as `HH:MM:SS`; shorter durations render as `MM:SS`, each field
/// zero-padded to two digits.
///
/// Callers guarantee a non-negative input; the clock never produces negative
/// elapsed values.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "truncation to whole seconds is the documented behavior"
)]
pub fn format_clock(total_seconds: f64) -> String {
    let total = total_seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Formats a dollar amount with two decimal places, without a currency sign.
pub fn format_dollars(dollars: f64) -> String {
    format!("{dollars:.2}")
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn format_clock_zero() {
        assert_snapshot!(format_clock(0.0), @"00:00");
    }

    #[test]
    fn format_clock_under_a_minute() {
        assert_snapshot!(format_clock(59.0), @"00:59");
    }

    #[test]
    fn format_clock_exact_minute() {
        assert_snapshot!(format_clock(60.0), @"01:00");
    }

    #[test]
    fn format_clock_just_under_an_hour() {
        assert_snapshot!(format_clock(3599.0), @"59:59");
    }

    #[test]
    fn format_clock_exact_hour() {
        assert_snapshot!(format_clock(3600.0), @"01:00:00");
    }

    #[test]
    fn format_clock_hours_minutes_seconds() {
        assert_eq!(format_clock(3600.0 * 2.0 + 60.0 * 5.0 + 7.0), "02:05:07");
    }

    #[test]
    fn format_clock_truncates_fractions() {
        // 59.9 must not round up to a minute
        assert_eq!(format_clock(59.9), "00:59");
        assert_eq!(format_clock(0.999), "00:00");
    }

    #[test]
    fn format_dollars_two_decimals() {
        assert_eq!(format_dollars(90.0), "90.00");
        assert_eq!(format_dollars(0.0), "0.00");
        assert_eq!(format_dollars(12.345), "12.35");
    }
}
