//! Diving result grammar.
//!
//! Diving rows carry a judged score rather than an elapsed time, so the
//! score column is bare digits with a decimal point and never has a
//! minutes part. The entrant blob still splits with the shared name, year
//! and team recovery.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::{EventHeader, SwimResult};
use crate::recover::name_year_team;
use crate::results::{parse_place, parse_points, prepare_line};

lazy_static! {
    /// Place, entrant blob, optional exhibition marker, score or scratch,
    /// optional points
    static ref RE_DIVING: Regex =
        Regex::new(r"^(\d+|---)\s+(.+?)\s+(x)?J?([\d.]+|SCR)\s*(\d+\.?\d*)?\s*$").unwrap();
}

/// Parse a diving result line.
pub fn parse_diving(line: &str, event: &EventHeader) -> Option<SwimResult> {
    let line = prepare_line(line)?;
    let caps = RE_DIVING.captures(&line)?;

    let place = parse_place(&caps[1]);
    let (name, year, team) = name_year_team(&caps[2])?;
    let score = &caps[4];

    let mut result = SwimResult::new(event, place, name, team);
    result.year = year;
    result.is_exhibition = caps.get(3).is_some();
    result.is_scratch = score == "SCR";
    if !result.is_scratch {
        result.finals_seconds = score.parse().ok();
    }
    result.finals_time = score.to_string();
    result.points = parse_points(caps.get(5));
    Some(result)
}
