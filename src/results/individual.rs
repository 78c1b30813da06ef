//! Individual result grammars.
//!
//! Invitational programs print a wide row: place, name, age, school, seed
//! time, finals time, points. Dual-meet programs print a compact row where
//! name, class year, and team collapse into one blob that field recovery
//! has to pull apart. Grammar priority within the invitational family
//! matters: the DQ-with-actual-time shape must win before the seed-time
//! field gets a chance to swallow the DQ token.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::{EventHeader, SwimResult};
use crate::recover::name_year_team;
use crate::results::{parse_place, parse_points, prepare_line};
use crate::times::time_to_seconds;

/// Name: "Surname[ Surname...], Given [M.]" with multi-word surnames,
/// hyphens and apostrophes allowed, comma mandatory.
const NAME: &str = r"([A-Za-z'\-]+(?:\s[A-Za-z'\-]+)*,\s*[A-Za-z\s.\-]+?)";
/// Elapsed time with optional exhibition/judge prefix
const TIME: &str = r"[xXJ]?(?:\d+:)?\d+\.\d+";

lazy_static! {
    /// DQ with a recorded actual time: disqualified but timed
    static ref RE_INV_DQ_TIMED: Regex = Regex::new(&format!(
        r"^(\d+|---)\s+{NAME}\s+(\d{{1,2}})\s+(.+?)\s+({TIME}|NT|NP)\s+DQ\s+((?:\d+:)?\d+\.\d+)(?:\s+(\d+\.?\d*))?\s*$"
    ))
    .unwrap();

    /// DQ without a time; seed optional, DQ possibly doubled
    static ref RE_INV_DQ: Regex = Regex::new(&format!(
        r"^(\d+|---)\s+{NAME}\s+(\d{{1,2}})\s+(.+?)\s+(?:({TIME}|NT|NP)\s+)?DQ(?:\s+DQ)?\s*$"
    ))
    .unwrap();

    /// Declared false start; seed optional
    static ref RE_INV_DFS: Regex = Regex::new(&format!(
        r"^(\d+|---)\s+{NAME}\s+(\d{{1,2}})\s+(.+?)\s+(?:({TIME}|NT|NP)\s+)?DFS\s*$"
    ))
    .unwrap();

    /// Main five-field grammar. The seed alternatives exclude DQ so the
    /// school field cannot absorb the seed ahead of a real DQ status.
    static ref RE_INV_FULL: Regex = Regex::new(&format!(
        r"^(\d+|---)\s+{NAME}\s+(\d{{1,2}})\s+(.+?)\s+({TIME}|NT|NP|SCR)\s+({TIME}|SCR|DQ|DFS|NS)(?:\s+(\d+\.?\d*))?\s*$"
    ))
    .unwrap();

    /// Degraded: no seed-time column
    static ref RE_INV_NO_SEED: Regex = Regex::new(&format!(
        r"^(\d+|---)\s+{NAME}\s+(\d{{1,2}})\s+(.+?)\s+({TIME}|SCR|DQ|DFS|NS)(?:\s+(\d+\.?\d*))?\s*$"
    ))
    .unwrap();

    /// Degraded: no age column (rare extraction anomaly)
    static ref RE_INV_NO_AGE: Regex = Regex::new(&format!(
        r"^(\d+|---)\s+{NAME}\s+(.+?)\s+({TIME}|NT|NP|SCR)\s+({TIME}|SCR|DQ|DFS|NS)(?:\s+(\d+\.?\d*))?\s*$"
    ))
    .unwrap();

    /// Dual-meet row: place, name blob, optional exhibition marker, time or
    /// status, optional standard code, optional points
    static ref RE_DUAL: Regex = Regex::new(
        r"^(\d+|---)\s+(.+?)\s+(x|X)?((?:\d+:)?\d+\.\d+|DQ|SCR|NS)\s*([A-Z]+)?\s*(\d+\.?\d*)?\s*$"
    )
    .unwrap();

    /// Dual-meet DQ with the real time after the DQ marker
    static ref RE_DUAL_DQ: Regex = Regex::new(
        r"^(\d+|---)\s+(.+?)(DQ)\s*((?:\d+:)?\d+\.\d+)?\s*([A-Z]+)?\s*(\d+\.?\d*)?\s*$"
    )
    .unwrap();
}

/// Parse an individual result line, trying the grammar families in the
/// given preference order.
pub fn parse_individual(
    line: &str,
    event: &EventHeader,
    invitational_first: bool,
) -> Option<SwimResult> {
    let line = prepare_line(line)?;
    if invitational_first {
        invitational(&line, event).or_else(|| dual(&line, event))
    } else {
        dual(&line, event).or_else(|| invitational(&line, event))
    }
}

/// Invitational grammar family, most specific first.
pub fn invitational(line: &str, event: &EventHeader) -> Option<SwimResult> {
    if line.contains("DQ") {
        if let Some(caps) = RE_INV_DQ_TIMED.captures(line) {
            let mut result = base(event, &caps, true)?;
            let actual = caps[6].to_string();
            result.finals_seconds = time_to_seconds(&actual);
            result.finals_time = actual;
            result.is_dq = true;
            result.points = parse_points(caps.get(7));
            return Some(result);
        }
        if let Some(caps) = RE_INV_DQ.captures(line) {
            let mut result = base(event, &caps, true)?;
            result.finals_time = "DQ".to_string();
            result.is_dq = true;
            return Some(result);
        }
    }

    if line.contains("DFS") {
        if let Some(caps) = RE_INV_DFS.captures(line) {
            let mut result = base(event, &caps, true)?;
            result.finals_time = "DFS".to_string();
            result.is_scratch = true;
            return Some(result);
        }
    }

    let (caps, has_age) = if let Some(caps) = RE_INV_FULL.captures(line) {
        (caps, true)
    } else if let Some(caps) = RE_INV_NO_SEED.captures(line) {
        let mut result = base(event, &caps, true)?;
        apply_finals(&mut result, &caps[5]);
        result.points = parse_points(caps.get(6));
        return Some(result);
    } else if let Some(caps) = RE_INV_NO_AGE.captures(line) {
        // An age-bearing line that lost its grammar match would put the
        // age digits at the front of the school capture; reject that.
        if caps[3].trim().starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        (caps, false)
    } else {
        return None;
    };

    let place = parse_place(&caps[1]);
    let name = caps[2].trim().to_string();
    if !name.contains(',') {
        return None;
    }
    let (year, school_idx) = if has_age {
        (Some(caps[3].to_string()), 4)
    } else {
        (None, 3)
    };
    let school = clean_school(&caps[school_idx]);
    let finals = caps[school_idx + 2].to_string();
    let points = parse_points(caps.get(school_idx + 3));

    let mut result = SwimResult::new(event, place, name, school);
    result.year = year;
    apply_finals(&mut result, &finals);
    result.points = points;
    Some(result)
}

/// Dual-meet grammar family. The name blob goes through field recovery;
/// a blob that yields no comma-bearing name declines the line.
pub fn dual(line: &str, event: &EventHeader) -> Option<SwimResult> {
    // DQ rows first: the general grammar would misread a real elapsed time
    // after the DQ marker as a points column
    if line.contains("DQ") && !line.contains("SCR") {
        if let Some(caps) = RE_DUAL_DQ.captures(line) {
            let place = parse_place(&caps[1]);
            let blob = caps[2].trim();
            let time_str = caps
                .get(4)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "DQ".to_string());
            let (name, year, team) = name_year_team(blob)?;

            let mut result = SwimResult::new(event, place, name, team);
            result.year = year;
            result.is_dq = true;
            result.finals_seconds = time_to_seconds(&time_str);
            result.finals_time = time_str;
            result.time_standard = caps.get(5).map(|m| m.as_str().to_string());
            result.points = parse_points(caps.get(6));
            return Some(result);
        }
    }

    if let Some(caps) = RE_DUAL.captures(line) {
        let place = parse_place(&caps[1]);
        let blob = caps[2].trim();
        let time_str = caps[4].to_string();
        let (name, year, team) = name_year_team(blob)?;

        let mut result = SwimResult::new(event, place, name, team);
        result.year = year;
        result.is_exhibition = caps.get(3).is_some();
        result.is_scratch = time_str == "SCR" || time_str == "NS";
        result.is_dq = time_str == "DQ" || blob.contains("DQ");
        result.finals_seconds = time_to_seconds(&time_str);
        result.finals_time = time_str;
        result.time_standard = caps.get(5).map(|m| m.as_str().to_string());
        result.points = parse_points(caps.get(6));
        return Some(result);
    }

    None
}

/// Build the common (place, name, age, school) prefix shared by the DQ/DFS
/// grammars; capture groups 1–4 line up across them.
fn base(event: &EventHeader, caps: &regex::Captures<'_>, has_age: bool) -> Option<SwimResult> {
    let place = parse_place(&caps[1]);
    let name = caps[2].trim().to_string();
    if !name.contains(',') {
        return None;
    }
    let school = clean_school(&caps[4]);
    let mut result = SwimResult::new(event, place, name, school);
    if has_age {
        result.year = Some(caps[3].to_string());
    }
    Some(result)
}

/// Set finals time, derived seconds, and status flags from the accepted
/// finals token.
fn apply_finals(result: &mut SwimResult, finals: &str) {
    result.is_exhibition = finals.starts_with('x') || finals.starts_with('X');
    let clean = finals.trim_start_matches(['x', 'X', 'J']);
    result.is_scratch = matches!(clean, "SCR" | "DFS" | "NS");
    result.is_dq = clean == "DQ";
    result.finals_seconds = time_to_seconds(clean);
    result.finals_time = clean.to_string();
}

fn clean_school(s: &str) -> String {
    s.trim().trim_end_matches(',').to_string()
}
