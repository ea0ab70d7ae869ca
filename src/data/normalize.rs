use crate::error::ValueError;

// ---------------------------------------------------------------------------
// Value normalizer: sentinel filtering, H:MM durations, plain numbers
// ---------------------------------------------------------------------------

/// Normalize one raw cell.
///
/// * `Ok(None)` – the trimmed cell is a sentinel; no value.
/// * `Ok(Some(h))` – a duration `H:MM` as decimal hours, or a plain finite
///   number.
/// * `Err(_)` – neither; the caller decides whether that is fatal.
pub fn normalize_cell(raw: &str, sentinels: &[String]) -> Result<Option<f64>, ValueError> {
    let cell = raw.trim();
    if sentinels.iter().any(|s| s == cell) {
        return Ok(None);
    }
    if cell.contains(':') {
        return parse_duration(cell).map(Some);
    }
    parse_number(cell).map(Some)
}

/// `H:MM` → `H + MM/60`. Hours may have any number of digits; minutes are
/// exactly the two characters after the first colon. Anything after the
/// minutes (`:SS`, ` AM`, ...) is ignored.
pub fn parse_duration(cell: &str) -> Result<f64, ValueError> {
    let Some((hours, rest)) = cell.split_once(':') else {
        return parse_number(cell);
    };

    if hours.is_empty() || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValueError::InvalidHours(hours.to_string()));
    }
    // A digit string always parses as f64, however long.
    let hours: f64 = hours
        .parse()
        .map_err(|_| ValueError::InvalidHours(hours.to_string()))?;

    let minutes = match rest.get(..2) {
        Some(m) if m.bytes().all(|b| b.is_ascii_digit()) => m,
        _ => return Err(ValueError::InvalidMinutes(rest.to_string())),
    };
    let minutes: f64 = minutes
        .parse()
        .map_err(|_| ValueError::InvalidMinutes(minutes.to_string()))?;

    let value = hours + minutes / 60.0;
    if !value.is_finite() {
        return Err(ValueError::NotFinite);
    }
    Ok(value)
}

fn parse_number(cell: &str) -> Result<f64, ValueError> {
    let value: f64 = cell.parse().map_err(|_| ValueError::NotANumber)?;
    if !value.is_finite() {
        return Err(ValueError::NotFinite);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentinels() -> Vec<String> {
        vec!["0".into(), "#DIV/0!".into(), String::new()]
    }

    fn norm(raw: &str) -> Result<Option<f64>, ValueError> {
        normalize_cell(raw, &sentinels())
    }

    #[test]
    fn test_sentinels_yield_no_value() {
        assert_eq!(norm("0"), Ok(None));
        assert_eq!(norm("#DIV/0!"), Ok(None));
        assert_eq!(norm(""), Ok(None));
        assert_eq!(norm("   "), Ok(None));
        assert_eq!(norm(" 0 "), Ok(None));
    }

    #[test]
    fn test_zero_spelled_differently_is_a_value() {
        assert_eq!(norm("0.0"), Ok(Some(0.0)));
    }

    #[test]
    fn test_duration_conversion() {
        assert_eq!(norm("1:30"), Ok(Some(1.5)));
        assert_eq!(norm("0:15"), Ok(Some(0.25)));
        assert_eq!(norm("2:00"), Ok(Some(2.0)));
    }

    #[test]
    fn test_multi_digit_hours() {
        assert_eq!(norm("12:30"), Ok(Some(12.5)));
        assert_eq!(norm("10:45"), Ok(Some(10.75)));
    }

    #[test]
    fn test_text_after_minutes_is_ignored() {
        assert_eq!(norm("7:30:00"), Ok(Some(7.5)));
        assert_eq!(norm("7:30:59"), Ok(Some(7.5)));
        assert_eq!(norm("7:30:00.000"), Ok(Some(7.5)));
        assert_eq!(norm("1:30pm"), Ok(Some(1.5)));
        assert_eq!(norm("1:30 AM"), Ok(Some(1.5)));
    }

    #[test]
    fn test_minutes_are_not_range_checked() {
        assert_eq!(norm("1:75"), Ok(Some(1.0 + 75.0 / 60.0)));
        assert_eq!(norm("0:99"), Ok(Some(99.0 / 60.0)));
    }

    #[test]
    fn test_huge_hour_field_is_a_value() {
        assert_eq!(norm("99999999999:00"), Ok(Some(99_999_999_999.0)));
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(norm("7.5"), Ok(Some(7.5)));
        assert_eq!(norm("10"), Ok(Some(10.0)));
        assert_eq!(norm(" 142 "), Ok(Some(142.0)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(norm("abc"), Err(ValueError::NotANumber));
        assert_eq!(norm("7,5"), Err(ValueError::NotANumber));
        assert_eq!(norm("NaN"), Err(ValueError::NotFinite));
        assert_eq!(norm("inf"), Err(ValueError::NotFinite));
    }

    #[test]
    fn test_rejects_bad_durations() {
        assert_eq!(norm(":30"), Err(ValueError::InvalidHours(String::new())));
        assert_eq!(norm("x:30"), Err(ValueError::InvalidHours("x".into())));
        assert_eq!(norm("-1:30"), Err(ValueError::InvalidHours("-1".into())));
        assert_eq!(norm("1:5"), Err(ValueError::InvalidMinutes("5".into())));
        assert_eq!(norm("1:"), Err(ValueError::InvalidMinutes(String::new())));
        assert_eq!(norm("1:ab"), Err(ValueError::InvalidMinutes("ab".into())));
        assert_eq!(norm("1:5pm"), Err(ValueError::InvalidMinutes("5pm".into())));
    }

    #[test]
    fn test_non_ascii_minutes_do_not_panic() {
        assert!(matches!(norm("1:é5"), Err(ValueError::InvalidMinutes(_))));
    }

    #[test]
    fn test_deterministic() {
        for raw in ["1:30", "7.5", "abc", "#DIV/0!"] {
            assert_eq!(norm(raw), norm(raw));
        }
    }
}
