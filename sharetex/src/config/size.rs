//! Human-readable byte sizes.

const KB: usize = 1024;
const MB: usize = KB * 1024;
const GB: usize = MB * 1024;

const UNITS: [(usize, &str); 3] = [(GB, "GB"), (MB, "MB"), (KB, "KB")];

/// Format a byte count with the largest unit it reaches.
///
/// Whole multiples print without decimals (`256 MB`), others with one
/// (`1.5 GB`). The output is accepted by [`parse_size`].
pub fn format_size(bytes: usize) -> String {
    for (unit, label) in UNITS {
        if bytes >= unit {
            return if bytes % unit == 0 {
                format!("{} {}", bytes / unit, label)
            } else {
                format!("{:.1} {}", bytes as f64 / unit as f64, label)
            };
        }
    }
    format!("{} B", bytes)
}

/// Parse a size such as `256MB`, `1.5 GB`, `512 kb` or `4096`.
///
/// A bare number is a byte count. Returns `None` for anything else.
pub fn parse_size(text: &str) -> Option<usize> {
    let text = text.trim();
    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);
    let number: f64 = number.parse().ok()?;
    if !number.is_finite() || number < 0.0 {
        return None;
    }

    let multiplier = match unit.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "K" | "KB" => KB,
        "M" | "MB" => MB,
        "G" | "GB" => GB,
        _ => return None,
    };
    Some((number * multiplier as f64).round() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2 KB");
        assert_eq!(format_size(256 * MB), "256 MB");
        assert_eq!(format_size(GB + GB / 2), "1.5 GB");
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("256MB"), Some(256 * MB));
        assert_eq!(parse_size("256 mb"), Some(256 * MB));
        assert_eq!(parse_size("1.5GB"), Some(GB + GB / 2));
        assert_eq!(parse_size("4096"), Some(4096));
        assert_eq!(parse_size(" 2 KB "), Some(2048));
        assert_eq!(parse_size("lots"), None);
        assert_eq!(parse_size("12 TB"), None);
        assert_eq!(parse_size(""), None);
    }

    #[test]
    fn test_format_output_parses_back() {
        for bytes in [1, 1024, 3 * MB, 7 * GB] {
            assert_eq!(parse_size(&format_size(bytes)), Some(bytes));
        }
    }
}
