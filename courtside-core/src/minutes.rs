/// Convert a colon-delimited minutes string into fractional minutes.
///
/// - no colon: the value itself (`"12.5"` → 12.5)
/// - `MM:SS`: minutes plus seconds / 60 (`"32:15"` → 32.25)
/// - three segments: `first * 60 + second + third / 60`
///
/// Box score minute strings never carry hours, but a third segment still
/// reads the first field as hours.
///
/// Missing, empty, non-numeric and four-or-more-segment values become 0.0.
pub fn parse_minutes(value: Option<&str>) -> f64 {
    let Some(raw) = value.map(str::trim) else {
        return 0.0;
    };
    if raw.is_empty() {
        return 0.0;
    }

    let parts: Result<Vec<f64>, _> = raw.split(':').map(|p| p.trim().parse::<f64>()).collect();
    let Ok(parts) = parts else {
        return 0.0;
    };

    match parts.as_slice() {
        [minutes] => *minutes,
        [minutes, seconds] => minutes + seconds / 60.0,
        [hours, minutes, seconds] => hours * 60.0 + minutes + seconds / 60.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn minutes_and_seconds() {
        assert!(close(parse_minutes(Some("32:15")), 32.25));
        assert!(close(parse_minutes(Some("0:45")), 0.75));
        assert!(close(parse_minutes(Some("48:00")), 48.0));
    }

    #[test]
    fn plain_number() {
        assert!(close(parse_minutes(Some("12")), 12.0));
        assert!(close(parse_minutes(Some("12.5")), 12.5));
    }

    #[test]
    fn decimal_minutes_with_seconds() {
        assert!(close(parse_minutes(Some("34.000000:06")), 34.1));
    }

    #[test]
    fn three_segments_read_first_field_as_hours() {
        assert!(close(parse_minutes(Some("1:02:30")), 62.5));
    }

    #[test]
    fn missing_or_empty_is_zero() {
        assert_eq!(parse_minutes(None), 0.0);
        assert_eq!(parse_minutes(Some("")), 0.0);
        assert_eq!(parse_minutes(Some("   ")), 0.0);
    }

    #[test]
    fn malformed_falls_back_to_zero() {
        assert_eq!(parse_minutes(Some("1:2:3:4")), 0.0);
        assert_eq!(parse_minutes(Some("DNP")), 0.0);
        assert_eq!(parse_minutes(Some("12:xx")), 0.0);
    }
}
