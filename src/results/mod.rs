//! Result-line grammars.
//!
//! Three families (individual, relay, diving), the first two with dual-meet
//! and invitational variants. Each grammar is a pure function returning an
//! optional structured record; "try grammar A, else grammar B" is ordered
//! alternatives, not error handling. The preferred order follows the
//! document format: wide single-column programs are invitational style,
//! compact multi-column programs are dual-meet style.

pub mod diving;
pub mod individual;
pub mod relay;

pub use diving::parse_diving;
pub use individual::parse_individual;
pub use relay::parse_relay;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Decimal point split by extraction ("2. 50" at end of line)
    static ref RE_BROKEN_DECIMAL: Regex = Regex::new(r"(\d+)\.\s+(\d+)\s*$").unwrap();
}

/// Shared line preparation: trim, drop tie-indicator asterisks, and repair
/// decimal points that extraction split from their digits.
pub(crate) fn prepare_line(line: &str) -> Option<String> {
    let line = line.trim().trim_start_matches('*');
    if line.is_empty() {
        return None;
    }
    Some(RE_BROKEN_DECIMAL.replace(line, "$1.$2").into_owned())
}

/// Parse the place token: a number, or "---" for unplaced/no-time rows.
pub(crate) fn parse_place(token: &str) -> Option<u32> {
    if token == "---" {
        None
    } else {
        token.parse().ok()
    }
}

/// Parse an optional points capture.
pub(crate) fn parse_points(capture: Option<regex::Match<'_>>) -> Option<f64> {
    capture.and_then(|m| m.as_str().parse().ok())
}
