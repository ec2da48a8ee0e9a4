//! Token estimation and display

/// Estimate tokens using a simple heuristic (chars / 4).
///
/// `char_count` is the number of Unicode code points, not bytes.
pub fn estimate_tokens(char_count: u64) -> u64 {
    char_count / 4
}

/// Short human form of a token count used in artifact names.
///
/// - `>= 1_000_000`: millions with one decimal and `M` (`1.0M`, `2.5M`)
/// - `>= 1_000`: whole thousands, truncated, with `k` (`1k`, `482k`)
/// - otherwise the plain integer
pub fn format_token_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1000 {
        format!("{}k", count / 1000)
    } else {
        count.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(format_token_count(0), "0");
        assert_eq!(format_token_count(999), "999");
        assert_eq!(format_token_count(1000), "1k");
        assert_eq!(format_token_count(999_999), "999k");
        assert_eq!(format_token_count(1_000_000), "1.0M");
    }

    #[test]
    fn thousands_truncate_instead_of_rounding() {
        assert_eq!(format_token_count(1999), "1k");
        assert_eq!(format_token_count(482_913), "482k");
    }

    #[test]
    fn millions_keep_one_decimal() {
        assert_eq!(format_token_count(1_234_567), "1.2M");
        assert_eq!(format_token_count(12_000_000), "12.0M");
    }

    #[test]
    fn numeric_value_never_decreases_across_bands() {
        fn value(formatted: &str) -> f64 {
            if let Some(m) = formatted.strip_suffix('M') {
                m.parse::<f64>().expect("millions") * 1_000_000.0
            } else if let Some(k) = formatted.strip_suffix('k') {
                k.parse::<f64>().expect("thousands") * 1000.0
            } else {
                formatted.parse::<f64>().expect("units")
            }
        }

        let samples = [0u64, 1, 998, 999, 1000, 1001, 9_999, 10_000, 999_999, 1_000_000, 1_049_999, 1_050_000, 25_000_000];
        let mut previous = -1.0;
        for count in samples {
            let current = value(&format_token_count(count));
            assert!(current >= previous, "format({count}) went backwards");
            previous = current;
        }
    }

    #[test]
    fn estimate_is_quarter_of_chars() {
        assert_eq!(estimate_tokens(4000), 1000);
        assert_eq!(estimate_tokens(3), 0);
        assert_eq!(estimate_tokens(7), 1);
    }
}
