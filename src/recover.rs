//! Recovery of merged and garbled fields.
//!
//! Kerning collapse during text extraction merges adjacent fields without
//! reliable delimiters: a result's name, class-year code, and team code can
//! arrive as one blob ("Richardson, Chris ESRGTCH-GA"), and split lines mix
//! bare and parenthesized times whose meaning depends on context. Recovery
//! is a prioritized strategy list with an explicit no-confident-match
//! outcome, never an error.

use lazy_static::lazy_static;
use regex::Regex;

use crate::classify::RE_REACTION_PREFIX;
use crate::config::SplitConvention;
use crate::times::plausible_split;

/// Class-year codes in seniority order.
pub const YEAR_CODES: [&str; 5] = ["FR", "SO", "JR", "SR", "GS"];

lazy_static! {
    /// Year code merged directly into a trailing team code
    static ref RE_MERGED_YEAR_TEAM: Regex =
        Regex::new(r"(FR|SO|JR|SR|GS)([A-Z]{2,5}-[A-Z]{2}|[A-Z]{2,5})\s*$").unwrap();

    /// Dash-delimited team suffix ("-SC", "-GA")
    static ref RE_DASH_SUFFIX: Regex = Regex::new(r"-([A-Z]{2})\s*$").unwrap();

    /// Full dash team code shape
    static ref RE_DASH_TEAM: Regex = Regex::new(r"^[A-Z]{2,5}-[A-Z]{2}$").unwrap();

    /// Trailing team code with no dash
    static ref RE_PLAIN_TEAM: Regex = Regex::new(r"\s([A-Z]{2,6})\s*$").unwrap();

    /// Runs of whitespace, collapsed in recovered names
    static ref RE_WS: Regex = Regex::new(r"\s+").unwrap();
}

fn squash_ws(s: &str) -> String {
    RE_WS.replace_all(s.trim(), " ").to_string()
}

/// Split a name/class-year/team blob into its fields.
///
/// Ordered strategies, first success wins:
/// 1. year code merged into a compact uppercase team code at the tail;
/// 2. dash team code, trying team lengths 5 down to 2 at the dash, looking
///    for an adjacent or space-separated year code before the team;
/// 3. within 2: a garbled short uppercase fragment before the dash team is
///    searched for a year code as a character subsequence, the leftover
///    characters rejoining the name;
/// 4. trailing no-dash team code with an optional trailing year;
/// 5. the whole blob as the name, no year, empty team.
///
/// Returns `None` only when the recovered name lacks the mandatory comma
/// between surname and given name, the signal that the line should never
/// have matched a result grammar.
pub fn name_year_team(blob: &str) -> Option<(String, Option<String>, String)> {
    let blob = blob.trim();

    let (name, year, team) = recover_fields(blob);
    if name.contains(',') {
        Some((name, year, team))
    } else {
        None
    }
}

fn recover_fields(blob: &str) -> (String, Option<String>, String) {
    // Strategy 1: merged year+team at the tail
    if let Some(caps) = RE_MERGED_YEAR_TEAM.captures(blob) {
        let whole = caps.get(0).unwrap();
        let name = blob[..whole.start()].trim();
        if name.contains(',') {
            return (
                squash_ws(name),
                Some(caps[1].to_string()),
                caps[2].to_string(),
            );
        }
    }

    // Strategies 2 and 3: dash team codes
    if let Some(result) = recover_dash_team(blob) {
        return result;
    }

    // Strategy 4: trailing team code without a dash
    if let Some(caps) = RE_PLAIN_TEAM.captures(blob) {
        let team = caps[1].to_string();
        let before_team = blob[..caps.get(0).unwrap().start()].trim();
        let (name, year) = strip_trailing_year(before_team);
        return (squash_ws(&name), year, team);
    }

    // Strategy 5: no team found
    (squash_ws(blob), None, String::new())
}

/// Dash team recovery: try team-code lengths from longest to shortest at
/// the dash, keeping the first length that yields a year code; fall back to
/// the first length that at least yields a comma-bearing name.
fn recover_dash_team(blob: &str) -> Option<(String, Option<String>, String)> {
    let dash = RE_DASH_SUFFIX.find(blob)?;
    let dash_pos = dash.start();
    let mut best_no_year: Option<(String, String)> = None;

    for team_len in (2..=5usize).rev() {
        let Some(team_start) = dash_pos.checked_sub(team_len) else {
            continue;
        };
        if !blob.is_char_boundary(team_start) {
            continue;
        }
        let team_code = blob[team_start..dash.end()].trim_end();
        if !RE_DASH_TEAM.is_match(team_code) {
            continue;
        }
        let before_team = blob[..team_start].trim();
        if !before_team.contains(',') {
            continue;
        }

        // Year code at the tail, space-separated or merged
        for y in YEAR_CODES {
            if let Some(name) = before_team.strip_suffix(&format!(" {y}")) {
                return Some((squash_ws(name), Some(y.to_string()), team_code.to_string()));
            }
            if let Some(name) = before_team.strip_suffix(y) {
                if name.contains(',') {
                    return Some((squash_ws(name), Some(y.to_string()), team_code.to_string()));
                }
            }
        }

        // Garbled fragment: overlapping glyph positions can shuffle a
        // middle initial into the year code ("SER" for E + SR). Look for a
        // year code as an in-order subsequence of a short uppercase tail
        // token; whatever is left over belongs to the name.
        if let Some(result) = recover_garbled_year(before_team, team_code) {
            return Some(result);
        }

        if best_no_year.is_none() {
            best_no_year = Some((squash_ws(before_team), team_code.to_string()));
        }
    }

    best_no_year.map(|(name, team)| (name, None, team))
}

fn recover_garbled_year(before_team: &str, team_code: &str) -> Option<(String, Option<String>, String)> {
    let tokens: Vec<&str> = before_team.split_whitespace().collect();
    let suffix = *tokens.last()?;
    if !(2..=4).contains(&suffix.len()) || !suffix.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }

    for y in YEAR_CODES {
        let mut yc = y.chars();
        let (c0, c1) = (yc.next().unwrap(), yc.next().unwrap());
        let Some(idx0) = suffix.find(c0) else { continue };
        let Some(rel1) = suffix[idx0 + 1..].find(c1) else {
            continue;
        };
        let idx1 = idx0 + 1 + rel1;

        let remaining: String = suffix
            .char_indices()
            .filter(|&(i, _)| i != idx0 && i != idx1)
            .map(|(_, c)| c)
            .collect();
        let mut name_base = tokens[..tokens.len() - 1].join(" ");
        if !remaining.is_empty() {
            name_base.push(' ');
            name_base.push_str(&remaining);
        }
        if name_base.contains(',') {
            return Some((squash_ws(&name_base), Some(y.to_string()), team_code.to_string()));
        }
    }
    None
}

/// Strip a trailing year code, space-separated or merged, from a name.
fn strip_trailing_year(before_team: &str) -> (String, Option<String>) {
    for y in YEAR_CODES {
        if let Some(name) = before_team.strip_suffix(&format!(" {y}")) {
            return (name.trim().to_string(), Some(y.to_string()));
        }
        if before_team.len() > y.len() {
            if let Some(name) = before_team.strip_suffix(y) {
                return (name.trim().to_string(), Some(y.to_string()));
            }
        }
    }
    (before_team.to_string(), None)
}

/// Parse split times and an optional reaction time from a split line.
///
/// With parenthesized diff values present the line is diff-style: the
/// accepted splits are every parenthesized value plus every bare value not
/// immediately followed by a paren (bare-before-paren is a cumulative value
/// superseded by the paren diff). Without parens all plausible bare values
/// are returned as recorded, cumulative-vs-diff left to
/// [`derive_leg_times`].
pub fn parse_splits(line: &str) -> (Vec<f64>, Option<f64>) {
    let mut line = line.trim();

    let mut reaction_time = None;
    if let Some(caps) = RE_REACTION_PREFIX.captures(line) {
        reaction_time = caps[1].parse::<f64>().ok();
        line = &line[caps.get(0).unwrap().end()..];
    }

    let tokens = tokenize_splits(line);
    let has_parens = tokens.iter().any(|t| t.paren);

    let mut splits = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        let Some(secs) = plausible_split(&token.value) else {
            continue;
        };
        if token.paren {
            splits.push(secs);
        } else if has_parens {
            // Bare value followed by any paren is cumulative; drop it
            let next_is_paren = tokens.get(i + 1).is_some_and(|t| t.paren);
            if !next_is_paren {
                splits.push(secs);
            }
        } else {
            splits.push(secs);
        }
    }

    (splits, reaction_time)
}

struct SplitToken {
    value: String,
    paren: bool,
}

/// Tokenize a split line into bare and parenthesized values, preserving
/// order. An unclosed paren ends tokenization.
fn tokenize_splits(line: &str) -> Vec<SplitToken> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }
        if bytes[pos] == b'(' {
            let Some(close) = line[pos..].find(')') else {
                break;
            };
            tokens.push(SplitToken {
                value: line[pos + 1..pos + close].to_string(),
                paren: true,
            });
            pos += close + 1;
        } else {
            let start = pos;
            while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() && bytes[pos] != b'(' {
                pos += 1;
            }
            tokens.push(SplitToken {
                value: line[start..pos].to_string(),
                paren: false,
            });
        }
    }
    tokens
}

/// Turn recorded splits into per-leg/segment times under the configured
/// convention. `Auto` treats a strictly increasing run of three or more
/// values as cumulative; shorter sequences are left as recorded because
/// two splits can be monotonic by chance.
pub fn derive_leg_times(splits: &[f64], convention: SplitConvention) -> Vec<f64> {
    let cumulative = match convention {
        SplitConvention::Cumulative => true,
        SplitConvention::Differential => false,
        SplitConvention::Auto => {
            splits.len() >= 3 && splits.windows(2).all(|w| w[1] > w[0])
        },
    };

    if !cumulative {
        return splits.to_vec();
    }
    let mut legs = Vec::with_capacity(splits.len());
    let mut prev = 0.0;
    for &s in splits {
        legs.push(((s - prev) * 100.0).round() / 100.0);
        prev = s;
    }
    legs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nyt(blob: &str) -> (String, Option<String>, String) {
        name_year_team(blob).unwrap()
    }

    #[test]
    fn test_plain_spaced_fields() {
        assert_eq!(
            nyt("Rothwell, Vivien E JR GTCH"),
            ("Rothwell, Vivien E".into(), Some("JR".into()), "GTCH".into())
        );
        assert_eq!(
            nyt("Crush, Johnny R SO ARMY"),
            ("Crush, Johnny R".into(), Some("SO".into()), "ARMY".into())
        );
        assert_eq!(
            nyt("Brown, Allison SR GTCH"),
            ("Brown, Allison".into(), Some("SR".into()), "GTCH".into())
        );
    }

    #[test]
    fn test_dash_team_spaced() {
        assert_eq!(
            nyt("Prosinski, Raymond P JR SCAR-SC"),
            ("Prosinski, Raymond P".into(), Some("JR".into()), "SCAR-SC".into())
        );
    }

    #[test]
    fn test_merged_year_team() {
        assert_eq!(
            nyt("Dalton, Alexis S FRSCAR-SC"),
            ("Dalton, Alexis S".into(), Some("FR".into()), "SCAR-SC".into())
        );
    }

    #[test]
    fn test_garbled_initial_year_merge() {
        // "ESR" = middle initial E shuffled into SR by overlapping glyphs
        assert_eq!(
            nyt("Richardson, Chris ESRGTCH-GA"),
            ("Richardson, Chris E".into(), Some("SR".into()), "GTCH-GA".into())
        );
    }

    #[test]
    fn test_garbled_subsequence_order() {
        // Year chars out of adjacency: S..R with the initial between
        assert_eq!(
            nyt("Walsh, Pat SER GTCH-GA"),
            ("Walsh, Pat E".into(), Some("SR".into()), "GTCH-GA".into())
        );
    }

    #[test]
    fn test_no_year_found() {
        let (name, year, team) = nyt("Smith, Alex GTCH");
        assert_eq!(name, "Smith, Alex");
        assert_eq!(year, None);
        assert_eq!(team, "GTCH");
    }

    #[test]
    fn test_no_team_fallback() {
        let (name, year, team) = nyt("Smith, Alex");
        assert_eq!(name, "Smith, Alex");
        assert_eq!(year, None);
        assert_eq!(team, "");
    }

    #[test]
    fn test_missing_comma_rejected() {
        assert!(name_year_team("University of Florida").is_none());
        assert!(name_year_team("353.10").is_none());
    }

    #[test]
    fn test_splits_diff_style() {
        let (splits, rt) = parse_splits("r:0.22 22.46 (22.46) 46.96 (24.50)");
        assert_eq!(rt, Some(0.22));
        assert_eq!(splits, vec![22.46, 24.50]);
    }

    #[test]
    fn test_splits_bare_style() {
        let (splits, rt) = parse_splits("25.59 53.27 1:21.46 1:49.48");
        assert_eq!(rt, None);
        assert_eq!(splits, vec![25.59, 53.27, 81.46, 109.48]);
    }

    #[test]
    fn test_splits_trailing_bare_kept_in_diff_style() {
        // Final bare value with no following paren is a real split
        let (splits, _) = parse_splits("22.46 (22.46) 47.01");
        assert_eq!(splits, vec![22.46, 47.01]);
    }

    #[test]
    fn test_splits_out_of_range_dropped() {
        let (splits, _) = parse_splits("5.00 22.46 9999.99");
        assert_eq!(splits, vec![22.46]);
    }

    #[test]
    fn test_negative_reaction_time() {
        let (_, rt) = parse_splits("r:-0.39 22.46 23.01");
        assert_eq!(rt, Some(-0.39));
    }

    #[test]
    fn test_derive_leg_times_auto_cumulative() {
        let legs = derive_leg_times(&[25.59, 53.27, 81.46, 109.48], SplitConvention::Auto);
        assert_eq!(legs, vec![25.59, 27.68, 28.19, 28.02]);
    }

    #[test]
    fn test_derive_leg_times_auto_short_sequence_kept() {
        let legs = derive_leg_times(&[22.46, 24.50], SplitConvention::Auto);
        assert_eq!(legs, vec![22.46, 24.50]);
    }

    #[test]
    fn test_derive_leg_times_forced() {
        assert_eq!(
            derive_leg_times(&[30.0, 60.0], SplitConvention::Cumulative),
            vec![30.0, 30.0]
        );
        assert_eq!(
            derive_leg_times(&[30.0, 60.0, 90.0], SplitConvention::Differential),
            vec![30.0, 60.0, 90.0]
        );
    }
}
