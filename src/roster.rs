//! Relay roster extraction.
//!
//! Roster lines list the four relay legs under a relay result, either
//! numbered ("1) Name YR 2) Name YR") or as bare name+year pairs. Column
//! extraction sometimes glues a swimmer's age to the next leg marker
//! ("Smith, Ana 184)" for age 18 and leg 4), so those are pried apart
//! before splitting.

use lazy_static::lazy_static;
use regex::Regex;

use crate::classify::RE_REACTION_PREFIX;

lazy_static! {
    /// Two-digit age glued to the next leg marker ("184)" = age 18, leg 4)
    static ref RE_MERGED_AGE: Regex = Regex::new(r"(\d{2})(\d\))").unwrap();

    /// Leg marker "1)" .. "4)"
    static ref RE_LEG_MARKER: Regex = Regex::new(r"\d\)").unwrap();

    /// Name followed by a class year or two-digit age, anchored to a
    /// segment end
    static ref RE_NAME_YEAR: Regex =
        Regex::new(r"^(.+?)\s+(\d{2}|FR|SO|JR|SR|GS)\s*$").unwrap();

    /// Repeated "Surname, Given [M] YR" groups on an unnumbered line
    static ref RE_UNNUMBERED: Regex =
        Regex::new(r"([A-Za-z'\-]+,\s*[A-Za-z]+(?:\s+[A-Z])?)\s+(FR|SO|JR|SR|GS|\d{2})").unwrap();
}

/// One relay leg pulled off a roster line. The leg number is present only
/// in the numbered form; the block parser's running counter fills the gap.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    /// Explicit leg number, numbered form only
    pub leg: Option<u8>,
    /// Exchange reaction time for this leg
    pub reaction_time: Option<f64>,
    /// Swimmer name ("Surname, Given [M]")
    pub name: String,
    /// Class year or two-digit age
    pub year: Option<String>,
}

/// Parse a relay roster line into its leg entries.
///
/// Returns `None` when no entry can be recovered; segments that fail the
/// name+year shape are skipped rather than failing the whole line.
pub fn parse_roster_line(line: &str) -> Option<Vec<RosterEntry>> {
    let line = RE_MERGED_AGE.replace_all(line.trim(), "$1 $2");
    numbered(&line).or_else(|| unnumbered(&line))
}

/// Numbered form: split on "N)" markers, then name+year per segment.
fn numbered(line: &str) -> Option<Vec<RosterEntry>> {
    let markers: Vec<regex::Match<'_>> = RE_LEG_MARKER.find_iter(line).collect();
    if markers.is_empty() {
        return None;
    }

    let mut entries = Vec::new();
    for (i, marker) in markers.iter().enumerate() {
        let leg: u8 = match marker.as_str().trim_end_matches(')').parse() {
            Ok(n) => n,
            Err(_) => continue,
        };
        let end = markers.get(i + 1).map_or(line.len(), |next| next.start());
        let segment = line[marker.end()..end].trim();
        if segment.is_empty() {
            continue;
        }

        let reaction = RE_REACTION_PREFIX
            .captures(segment)
            .and_then(|caps| caps[1].parse().ok());
        let segment = RE_REACTION_PREFIX.replace(segment, "");

        if let Some(caps) = RE_NAME_YEAR.captures(segment.trim()) {
            let name = caps[1].trim().to_string();
            if !name.contains(',') {
                continue;
            }
            entries.push(RosterEntry {
                leg: Some(leg),
                reaction_time: reaction,
                name,
                year: Some(caps[2].to_string()),
            });
        }
    }

    if entries.is_empty() {
        None
    } else {
        Some(entries)
    }
}

/// Unnumbered form: every "Surname, Given YR" group on the line.
fn unnumbered(line: &str) -> Option<Vec<RosterEntry>> {
    let entries: Vec<RosterEntry> = RE_UNNUMBERED
        .captures_iter(line)
        .map(|caps| RosterEntry {
            leg: None,
            reaction_time: None,
            name: caps[1].trim().to_string(),
            year: Some(caps[2].to_string()),
        })
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_roster() {
        let legs = parse_roster_line(
            "1) Stanisavljevic, Nina SO 2) Reis, Giovana SO 3) Dressel, Sherridon JR 4) Scott, Abby FR",
        )
        .unwrap();
        assert_eq!(legs.len(), 4);
        assert_eq!(legs[0].name, "Stanisavljevic, Nina");
        assert_eq!(legs[0].leg, Some(1));
        assert_eq!(legs[0].year, Some("SO".into()));
        assert_eq!(legs[3].name, "Scott, Abby");
        assert_eq!(legs[3].leg, Some(4));
    }

    #[test]
    fn test_numbered_roster_reaction_times() {
        let legs = parse_roster_line("3) r:0.12 Smith, Isabella 18 4) r:0.04 Parker, Sarah 18").unwrap();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].leg, Some(3));
        assert_eq!(legs[0].reaction_time, Some(0.12));
        assert_eq!(legs[0].year, Some("18".into()));
        assert_eq!(legs[1].name, "Parker, Sarah");
        assert_eq!(legs[1].reaction_time, Some(0.04));
    }

    #[test]
    fn test_glued_age_and_leg_marker() {
        let legs = parse_roster_line("3) r:0.12 Smith, Isabella 184) r:0.04 Parker, Sarah 18").unwrap();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].name, "Smith, Isabella");
        assert_eq!(legs[0].year, Some("18".into()));
        assert_eq!(legs[1].leg, Some(4));
        assert_eq!(legs[1].year, Some("18".into()));
    }

    #[test]
    fn test_unnumbered_roster() {
        let legs = parse_roster_line("Rothwell, Vivien E JR Deedy, Anne SR").unwrap();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].name, "Rothwell, Vivien E");
        assert_eq!(legs[0].leg, None);
        assert_eq!(legs[1].name, "Deedy, Anne");
        assert_eq!(legs[1].year, Some("SR".into()));
    }

    #[test]
    fn test_segment_without_comma_skipped() {
        let legs = parse_roster_line("1) Stanisavljevic, Nina SO 2) garbage FR").unwrap();
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].leg, Some(1));
    }

    #[test]
    fn test_no_roster_content() {
        assert!(parse_roster_line("25.59 53.27 1:21.46 1:49.48").is_none());
    }
}
