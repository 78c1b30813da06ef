//! Swim time token parsing and formatting.
//!
//! Meet programs render elapsed times as `MM:SS.cc` or bare `SS.cc`, with an
//! optional leading `x`/`X` (exhibition) or `J` (judge's time) prefix. Status
//! tokens (DQ, SCR, NS, DFS, NT, NP) replace a time entirely and convert to
//! `None` rather than an error.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Elapsed time shape: optional exhibition prefix, optional minutes
    static ref RE_TIME: Regex = Regex::new(r"^x?(\d+:)?\d+\.\d+$").unwrap();
}

/// Status tokens that stand in for a time on a result line.
pub const STATUS_TOKENS: [&str; 6] = ["SCR", "DQ", "NS", "DFS", "NT", "NP"];

/// Splits and intermediate times outside this range are extraction noise.
pub const SPLIT_RANGE: (f64, f64) = (10.0, 1200.0);

/// Convert a time string (`MM:SS.cc` or `SS.cc`) to seconds.
///
/// Status tokens and unparsable input yield `None`. Exhibition/judge
/// prefixes are stripped before conversion. Result is rounded to
/// hundredths.
///
/// # Examples
///
/// ```
/// use meetparse::times::time_to_seconds;
///
/// assert_eq!(time_to_seconds("54.00"), Some(54.00));
/// assert_eq!(time_to_seconds("13:33.61"), Some(813.61));
/// assert_eq!(time_to_seconds("x1:29.62"), Some(89.62));
/// assert_eq!(time_to_seconds("SCR"), None);
/// ```
pub fn time_to_seconds(time_str: &str) -> Option<f64> {
    let trimmed = time_str.trim();
    if trimmed.is_empty() || STATUS_TOKENS.contains(&trimmed) {
        return None;
    }
    let cleaned = trimmed.trim_start_matches(['x', 'X', 'J']);

    let secs = if let Some((min_part, sec_part)) = cleaned.split_once(':') {
        let minutes: f64 = min_part.parse::<u32>().ok()? as f64;
        let seconds: f64 = sec_part.parse().ok()?;
        minutes * 60.0 + seconds
    } else {
        cleaned.parse().ok()?
    };

    Some(round_hundredths(secs))
}

/// Render seconds back to the `M:SS.cc` / `SS.cc` shape used in programs.
pub fn format_seconds(secs: f64) -> String {
    let secs = round_hundredths(secs);
    if secs >= 60.0 {
        let minutes = (secs / 60.0).floor();
        let rem = secs - minutes * 60.0;
        format!("{}:{:05.2}", minutes as u32, rem)
    } else {
        format!("{:.2}", secs)
    }
}

/// Check whether a token has the shape of a swim time.
pub fn looks_like_time(s: &str) -> bool {
    RE_TIME.is_match(s.trim())
}

/// Parse a token and keep it only if it is a plausible split/intermediate
/// time (10–1200 s).
pub fn plausible_split(token: &str) -> Option<f64> {
    let secs = time_to_seconds(token)?;
    if secs >= SPLIT_RANGE.0 && secs <= SPLIT_RANGE.1 {
        Some(secs)
    } else {
        None
    }
}

fn round_hundredths(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bare_seconds() {
        assert_eq!(time_to_seconds("54.00"), Some(54.0));
        assert_eq!(time_to_seconds("45.47"), Some(45.47));
    }

    #[test]
    fn test_minutes_seconds() {
        assert_eq!(time_to_seconds("1:34.59"), Some(94.59));
        assert_eq!(time_to_seconds("15:47.61"), Some(947.61));
        assert_eq!(time_to_seconds("13:33.61"), Some(813.61));
    }

    #[test]
    fn test_prefixes_stripped() {
        assert_eq!(time_to_seconds("x54.00"), Some(54.0));
        assert_eq!(time_to_seconds("X1:29.62"), Some(89.62));
        assert_eq!(time_to_seconds("J301.25"), Some(301.25));
    }

    #[test]
    fn test_status_tokens_are_none() {
        for tok in STATUS_TOKENS {
            assert_eq!(time_to_seconds(tok), None, "{tok} should not convert");
        }
    }

    #[test]
    fn test_junk_is_none() {
        assert_eq!(time_to_seconds(""), None);
        assert_eq!(time_to_seconds("abc"), None);
        assert_eq!(time_to_seconds("1:2:3.4"), None);
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(54.0), "54.00");
        assert_eq!(format_seconds(94.59), "1:34.59");
        assert_eq!(format_seconds(947.61), "15:47.61");
        assert_eq!(format_seconds(60.0), "1:00.00");
    }

    #[test]
    fn test_looks_like_time() {
        assert!(looks_like_time("54.00"));
        assert!(looks_like_time("x1:34.59"));
        assert!(!looks_like_time("SCR"));
        assert!(!looks_like_time("54"));
    }

    #[test]
    fn test_plausible_split_range() {
        assert_eq!(plausible_split("22.46"), Some(22.46));
        assert_eq!(plausible_split("9.99"), None);
        assert_eq!(plausible_split("21:00.00"), None);
    }

    proptest! {
        #[test]
        fn test_format_parse_round_trip(hundredths in 1000u32..120_000) {
            let secs = hundredths as f64 / 100.0;
            prop_assert_eq!(time_to_seconds(&format_seconds(secs)), Some(secs));
        }
    }
}
