//! Runtime formatting ("142 min" -> "2h 22m").

/// Minutes in a raw runtime string: every digit in it, read as one number.
/// `None` if there are no digits or the number does not fit.
pub fn parse_runtime_minutes(raw: &str) -> Option<u32> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Format a raw runtime as `"<h>h <m>m"`, `"<h>h"` or `"<m>m"`.
/// Input without a usable number comes back unchanged.
pub fn format_runtime(raw: &str) -> String {
    let Some(minutes) = parse_runtime_minutes(raw) else {
        return raw.to_string();
    };
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_and_minutes() {
        assert_eq!(format_runtime("142 min"), "2h 22m");
        assert_eq!(format_runtime("90 min"), "1h 30m");
        assert_eq!(format_runtime("45 min"), "45m");
        assert_eq!(format_runtime("120 min"), "2h");
        assert_eq!(format_runtime("0 min"), "0m");
    }

    #[test]
    fn non_numeric_passes_through() {
        assert_eq!(format_runtime("N/A"), "N/A");
        assert_eq!(format_runtime(""), "");
        assert_eq!(format_runtime("99999999999 min"), "99999999999 min");
    }

    #[test]
    fn parse_minutes() {
        assert_eq!(parse_runtime_minutes("142 min"), Some(142));
        assert_eq!(parse_runtime_minutes("N/A"), None);
    }
}
