//! Clock formatting helpers for the in-game day cycle

/// Convert a day fraction in `[0, 1)` to `(hour, minute, second)`
///
/// Values outside the range wrap around the day.
pub fn from_value(daytime: f32) -> (u32, u32, u32) {
    let total = (f64::from(daytime).rem_euclid(1.0) * 86_400.0) as u32 % 86_400;
    (total / 3600, (total / 60) % 60, total % 60)
}

/// Left-pad `text` with `fill` up to `width` characters
pub fn lfill(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let mut out: String = std::iter::repeat(fill).take(width - len).collect();
    out.push_str(text);
    out
}

/// Format a day fraction as `HH:MM`
pub fn clock_string(daytime: f32) -> String {
    let (hour, minute, _) = from_value(daytime);
    format!(
        "{}:{}",
        lfill(&hour.to_string(), 2, '0'),
        lfill(&minute.to_string(), 2, '0')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value() {
        assert_eq!(from_value(0.0), (0, 0, 0));
        assert_eq!(from_value(0.5), (12, 0, 0));
        assert_eq!(from_value(0.75), (18, 0, 0));
        assert_eq!(from_value(1.0), (0, 0, 0));
    }

    #[test]
    fn test_lfill() {
        assert_eq!(lfill("7", 2, '0'), "07");
        assert_eq!(lfill("12", 2, '0'), "12");
        assert_eq!(lfill("123", 2, '0'), "123");
    }

    #[test]
    fn test_clock_string() {
        assert_eq!(clock_string(0.25), "06:00");
        assert_eq!(clock_string(0.0), "00:00");
    }
}
