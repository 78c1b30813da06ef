//! Data model for parsed meet results.
//!
//! These are the output-boundary types: event metadata recovered from header
//! lines, one record per placed entrant or relay team, relay leg rosters, and
//! the best-effort meet metadata scraped from the first page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Competition gender category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Women's events
    Women,
    /// Men's events
    Men,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Women => write!(f, "Women"),
            Gender::Men => write!(f, "Men"),
        }
    }
}

/// Normalized stroke (or discipline, for diving events).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stroke {
    /// Freestyle
    Freestyle,
    /// Backstroke
    Backstroke,
    /// Breaststroke
    Breaststroke,
    /// Butterfly
    Butterfly,
    /// Individual medley
    Im,
    /// Medley (relay events)
    Medley,
    /// Diving events
    Diving,
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stroke::Freestyle => "Freestyle",
            Stroke::Backstroke => "Backstroke",
            Stroke::Breaststroke => "Breaststroke",
            Stroke::Butterfly => "Butterfly",
            Stroke::Im => "IM",
            Stroke::Medley => "Medley",
            Stroke::Diving => "Diving",
        };
        write!(f, "{}", s)
    }
}

/// Competition round a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Round {
    /// Preliminary heats
    Prelim,
    /// Finals (A/B/C finals, consolation, timed finals)
    Finals,
    /// Time trial swim
    TimeTrial,
    /// Swim-off between tied entrants
    SwimOff,
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Round::Prelim => "Prelim",
            Round::Finals => "Finals",
            Round::TimeTrial => "Time Trial",
            Round::SwimOff => "Swim-off",
        };
        write!(f, "{}", s)
    }
}

/// Event metadata recovered from a header line.
///
/// Immutable once created; the event number is the unique key across a
/// document and continuation headers only look it up again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventHeader {
    /// Event number (unique key within a document)
    pub number: u32,
    /// Gender category
    pub gender: Gender,
    /// Distance in yards/meters (0 for platform diving)
    pub distance: u32,
    /// Normalized stroke
    pub stroke: Stroke,
    /// Relay event flag
    pub is_relay: bool,
    /// Diving event flag
    pub is_diving: bool,
    /// Round qualifier carried in the header itself (Time Trial / Swim-off)
    pub round_hint: Option<Round>,
    /// Canonical event name, e.g. "Women 100 Freestyle"
    pub name: String,
}

/// One swimmer's leg of a relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelaySwimmer {
    /// Swimmer name ("Surname, Given [M]")
    pub name: String,
    /// Class year (FR/SO/JR/SR/GS) or two-digit age
    pub year: Option<String>,
    /// Leg number, 1–4
    pub leg: u8,
    /// Relay exchange reaction time at this changeover
    pub reaction_time: Option<f64>,
}

/// One placed entrant or relay team in one event.
///
/// Event fields are denormalized copies so each record stands alone
/// downstream. Built by a result grammar, then extended in place by the
/// block parser as dq-reason, split, and roster lines follow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwimResult {
    /// Event number
    pub event_number: u32,
    /// Canonical event name
    pub event_name: String,
    /// Event gender
    pub event_gender: Gender,
    /// Event distance
    pub event_distance: u32,
    /// Event stroke
    pub event_stroke: Stroke,
    /// Relay result flag
    pub is_relay: bool,
    /// Finishing place; `None` for "---" rows (unplaced / no time)
    pub place: Option<u32>,
    /// Entrant name, or team name for relays
    pub name: String,
    /// Class year or age; always `None` for relays
    pub year: Option<String>,
    /// Team name or code
    pub team: String,
    /// Relay squad letter (A–D), relays only
    pub relay_letter: Option<char>,
    /// Raw finals time token (may be a status token)
    pub finals_time: String,
    /// Finals time in seconds; `None` when the time is a status token
    pub finals_seconds: Option<f64>,
    /// Points scored
    pub points: Option<f64>,
    /// Qualifying-mark code (A, B, NCAA, ...)
    pub time_standard: Option<String>,
    /// Exhibition (non-scoring) swim
    pub is_exhibition: bool,
    /// Disqualified
    pub is_dq: bool,
    /// Scratched / no-show / declared false start
    pub is_scratch: bool,
    /// Competition round
    pub round: Option<Round>,
    /// Start or lead-off reaction time
    pub reaction_time: Option<f64>,
    /// Disqualification reason from a follow-on line
    pub dq_reason: Option<String>,
    /// Ordered split times
    pub splits: Vec<f64>,
    /// Relay leg roster, relays only
    pub relay_swimmers: Vec<RelaySwimmer>,
}

impl SwimResult {
    /// Construct a result from its event context and line-level fields.
    /// Flags and accumulating fields start empty.
    pub(crate) fn new(event: &EventHeader, place: Option<u32>, name: String, team: String) -> Self {
        SwimResult {
            event_number: event.number,
            event_name: event.name.clone(),
            event_gender: event.gender,
            event_distance: event.distance,
            event_stroke: event.stroke,
            is_relay: event.is_relay,
            place,
            name,
            year: None,
            team,
            relay_letter: None,
            finals_time: String::new(),
            finals_seconds: None,
            points: None,
            time_standard: None,
            is_exhibition: false,
            is_dq: false,
            is_scratch: false,
            round: None,
            reaction_time: None,
            dq_reason: None,
            splits: Vec::new(),
            relay_swimmers: Vec::new(),
        }
    }

    /// Deduplication key: (name, event name, finals time, round).
    pub(crate) fn dedup_key(&self) -> (String, String, String, Option<Round>) {
        (
            self.name.clone(),
            self.event_name.clone(),
            self.finals_time.clone(),
            self.round,
        )
    }
}

/// Best-effort meet metadata scraped from the first page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetInfo {
    /// Meet name, if a plausible title line was found
    pub name: Option<String>,
    /// Meet date as it appeared in the document
    pub date: Option<String>,
}

impl MeetInfo {
    /// Meet date parsed to a calendar date, when the raw string matches
    /// `M/D/YYYY` or `YYYY-MM-DD`.
    pub fn date_parsed(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%m/%d/%Y")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()
    }
}

/// Summary counts over a parsed result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetSummary {
    /// Total result records
    pub total_results: usize,
    /// Distinct events with at least one result
    pub events: usize,
    /// Distinct teams
    pub teams: usize,
    /// Individual (non-relay) results
    pub individual_results: usize,
    /// Relay results
    pub relay_results: usize,
}

/// The ordered table of results produced by a document parse.
///
/// Results are sorted by (event number, place) with unplaced entries
/// trailing, deduplicated, and with known team-name truncations patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    results: Vec<SwimResult>,
}

impl ResultTable {
    pub(crate) fn new(results: Vec<SwimResult>) -> Self {
        ResultTable { results }
    }

    /// Number of result records.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when the table holds no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate over all results in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, SwimResult> {
        self.results.iter()
    }

    /// All results as a slice.
    pub fn results(&self) -> &[SwimResult] {
        &self.results
    }

    /// Individual (non-relay) results.
    pub fn individuals(&self) -> impl Iterator<Item = &SwimResult> {
        self.results.iter().filter(|r| !r.is_relay)
    }

    /// Relay results.
    pub fn relays(&self) -> impl Iterator<Item = &SwimResult> {
        self.results.iter().filter(|r| r.is_relay)
    }

    /// Results for one event number.
    pub fn for_event(&self, number: u32) -> impl Iterator<Item = &SwimResult> {
        self.results.iter().filter(move |r| r.event_number == number)
    }

    /// Results whose name contains `needle` (case-insensitive).
    pub fn for_swimmer<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a SwimResult> {
        let needle = needle.to_lowercase();
        self.results
            .iter()
            .filter(move |r| r.name.to_lowercase().contains(&needle))
    }

    /// Results whose team contains `needle` (case-insensitive).
    pub fn for_team<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a SwimResult> {
        let needle = needle.to_lowercase();
        self.results
            .iter()
            .filter(move |r| r.team.to_lowercase().contains(&needle))
    }

    /// Summary counts for the whole table.
    pub fn summary(&self) -> MeetSummary {
        use std::collections::HashSet;
        let events: HashSet<&str> = self.results.iter().map(|r| r.event_name.as_str()).collect();
        let teams: HashSet<&str> = self.results.iter().map(|r| r.team.as_str()).collect();
        MeetSummary {
            total_results: self.results.len(),
            events: events.len(),
            teams: teams.len(),
            individual_results: self.individuals().count(),
            relay_results: self.relays().count(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a SwimResult;
    type IntoIter = std::slice::Iter<'a, SwimResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> EventHeader {
        EventHeader {
            number: 3,
            gender: Gender::Women,
            distance: 100,
            stroke: Stroke::Freestyle,
            is_relay: false,
            is_diving: false,
            round_hint: None,
            name: "Women 100 Freestyle".to_string(),
        }
    }

    #[test]
    fn test_result_carries_event_fields() {
        let r = SwimResult::new(&event(), Some(1), "Rothwell, Vivien E".into(), "GTCH".into());
        assert_eq!(r.event_number, 3);
        assert_eq!(r.event_name, "Women 100 Freestyle");
        assert_eq!(r.event_gender, Gender::Women);
        assert!(!r.is_relay);
        assert!(r.splits.is_empty());
        assert!(r.relay_swimmers.is_empty());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Stroke::Im.to_string(), "IM");
        assert_eq!(Round::SwimOff.to_string(), "Swim-off");
        assert_eq!(Gender::Men.to_string(), "Men");
    }

    #[test]
    fn test_meet_info_date_parsing() {
        let info = MeetInfo {
            name: None,
            date: Some("11/18/2025".to_string()),
        };
        let date = info.date_parsed().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 18).unwrap());

        let iso = MeetInfo {
            name: None,
            date: Some("2025-11-18".to_string()),
        };
        assert_eq!(iso.date_parsed(), info.date_parsed());
    }

    #[test]
    fn test_table_queries() {
        let mut a = SwimResult::new(&event(), Some(1), "Rothwell, Vivien E".into(), "GTCH".into());
        a.finals_time = "54.00".into();
        let mut b = a.clone();
        b.name = "Georgia Tech".into();
        b.is_relay = true;
        let table = ResultTable::new(vec![a, b]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.individuals().count(), 1);
        assert_eq!(table.relays().count(), 1);
        assert_eq!(table.for_swimmer("rothwell").count(), 1);
        assert_eq!(table.for_team("gtch").count(), 2);
        assert_eq!(table.summary().teams, 1);
    }
}
