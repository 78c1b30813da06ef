//! Relay result grammars.
//!
//! Relays key on a squad letter (A–D) instead of a class year, and the team
//! name doubles as the entrant name. Dual-meet programs use compact team
//! codes; invitationals print the full team name with seed and finals
//! columns. A DQ token may be followed by the real elapsed time, which is
//! recorded as the finals time.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::{EventHeader, SwimResult};
use crate::results::{parse_place, parse_points, prepare_line};
use crate::times::time_to_seconds;

lazy_static! {
    /// Invitational relay: place, full team name, letter, seed, finals,
    /// optional points
    static ref RE_INVITATIONAL: Regex = Regex::new(
        r"^(\d+|---)\s+(.+?)\s+([A-D])\s+((?:\d+:)?\d+\.\d+|NT|DQ|NS)\s+(x?(?:\d+:)?\d+\.\d+|DQ|NS|SCR)(?:\s+(\d+\.?\d*))?\s*$"
    )
    .unwrap();

    /// Dual-meet relay: place, team code, letter, optional exhibition
    /// marker, time or status, optional real time after a DQ, points
    static ref RE_DUAL: Regex = Regex::new(
        r"^(\d+|---)\s+([A-Z][A-Za-z]{1,30}(?:-[A-Z]{2})?)\s+([A-D])\s+(x|X)?((?:\d+:)?\d+\.\d+|DQ|NS|SCR)(?:\s+((?:\d+:)?\d+\.\d+))?(?:\s+(\d+\.?\d*))?\s*$"
    )
    .unwrap();
}

/// Parse a relay result line, trying the grammar families in the given
/// preference order.
pub fn parse_relay(line: &str, event: &EventHeader, invitational_first: bool) -> Option<SwimResult> {
    let line = prepare_line(line)?;
    if invitational_first {
        invitational(&line, event).or_else(|| dual(&line, event))
    } else {
        dual(&line, event).or_else(|| invitational(&line, event))
    }
}

/// Invitational relay grammar.
pub fn invitational(line: &str, event: &EventHeader) -> Option<SwimResult> {
    let caps = RE_INVITATIONAL.captures(line)?;
    let place = parse_place(&caps[1]);
    let team = caps[2].trim().to_string();
    let letter = caps[3].chars().next()?;
    let finals = &caps[5];

    let is_exhibition = finals.starts_with('x') || finals.starts_with('X');
    let clean = finals.trim_start_matches(['x', 'X']);

    let mut result = SwimResult::new(event, place, team.clone(), team);
    result.relay_letter = Some(letter);
    result.is_exhibition = is_exhibition;
    result.is_dq = clean == "DQ";
    result.is_scratch = matches!(clean, "SCR" | "NS");
    result.finals_seconds = time_to_seconds(clean);
    result.finals_time = clean.to_string();
    result.points = parse_points(caps.get(6));
    Some(result)
}

/// Dual-meet relay grammar.
pub fn dual(line: &str, event: &EventHeader) -> Option<SwimResult> {
    let caps = RE_DUAL.captures(line)?;
    let place = parse_place(&caps[1]);
    let team = caps[2].to_string();
    let letter = caps[3].chars().next()?;
    let time1 = &caps[5];
    let time2 = caps.get(6).map(|m| m.as_str());

    let is_dq = time1 == "DQ";
    // DQ followed by the real elapsed time: record that time
    let finals = match (is_dq, time2) {
        (true, Some(actual)) => actual.to_string(),
        _ => time1.to_string(),
    };

    let mut result = SwimResult::new(event, place, team.clone(), team);
    result.relay_letter = Some(letter);
    result.is_exhibition = caps.get(4).is_some();
    result.is_dq = is_dq;
    result.is_scratch = matches!(time1, "SCR" | "NS");
    result.finals_seconds = time_to_seconds(&finals);
    result.finals_time = finals;
    result.points = parse_points(caps.get(7));
    Some(result)
}
