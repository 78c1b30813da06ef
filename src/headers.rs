//! Event header parsing.
//!
//! Recognizes the two header shapes, swimming events
//! ("#1 Women 200 Yard Medley Relay", "Event 15 Men 500 Meter Freestyle")
//! and diving events ("Event 7 Women 3 mtr Diving", "#9 Men Platform
//! Diving"), plus the parenthesized continuation form re-announcing an
//! event mid-column.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::{EventHeader, Gender, Round, Stroke};

lazy_static! {
    /// Swimming event header
    static ref RE_SWIM_EVENT: Regex = Regex::new(
        r"^(?:#|Event\s+)(\d+)\s+(Women|Men)\s+(\d+)\s+(?:Yard|Meter)\s+(.+)$"
    )
    .unwrap();

    /// Springboard diving event header ("... 1 mtr Diving")
    static ref RE_DIVING_EVENT: Regex =
        Regex::new(r"^(?:#|Event\s+)(\d+)\s+(Women|Men)\s+(\d+)\s+mtr\s+Diving").unwrap();

    /// Platform diving event header
    static ref RE_PLATFORM_EVENT: Regex =
        Regex::new(r"^(?:#|Event\s+)(\d+)\s+(Women|Men)\s+Platform\s+Diving").unwrap();

    /// Continuation header: "(Event 3 Women ..." / "(#3 Women ..."
    static ref RE_CONTINUATION: Regex =
        Regex::new(r"^\((?:#|Event\s+)(\d+)\s+(Women|Men)").unwrap();

    /// Trailing swim-off qualifier in the stroke text
    static ref RE_SWIM_OFF: Regex = Regex::new(r"\s*Swim-[Oo]ff").unwrap();
}

/// Parse an event header line into event metadata.
///
/// Returns `None` when the line is not a header. Stroke names are
/// normalized, relay markers are folded into the flag, and trailing
/// "Time Trial" / "Swim-off" qualifiers become the round hint.
pub fn parse_event_header(line: &str) -> Option<EventHeader> {
    let line = line.trim();

    if let Some(caps) = RE_SWIM_EVENT.captures(line) {
        let number: u32 = caps[1].parse().ok()?;
        let gender = parse_gender(&caps[2])?;
        let distance: u32 = caps[3].parse().ok()?;
        let descriptor = caps[4].trim();

        let is_relay = descriptor.contains("Relay");
        let mut stroke_text = descriptor.replace(" Relay", "").trim().to_string();

        let mut round_hint = None;
        if stroke_text.contains("Time Trial") {
            stroke_text = stroke_text.replace(" Time Trial", "").trim().to_string();
            round_hint = Some(Round::TimeTrial);
        } else if stroke_text.contains("Swim-off") || stroke_text.contains("Swim-Off") {
            stroke_text = RE_SWIM_OFF.replace_all(&stroke_text, "").trim().to_string();
            round_hint = Some(Round::SwimOff);
        }

        let stroke = normalize_stroke(&stroke_text, is_relay)?;
        let name = format!(
            "{} {} {}{}",
            gender,
            distance,
            stroke,
            if is_relay { " Relay" } else { "" }
        );

        return Some(EventHeader {
            number,
            gender,
            distance,
            stroke,
            is_relay,
            is_diving: false,
            round_hint,
            name,
        });
    }

    if let Some(caps) = RE_DIVING_EVENT.captures(line) {
        let gender = parse_gender(&caps[2])?;
        let distance: u32 = caps[3].parse().ok()?;
        return Some(EventHeader {
            number: caps[1].parse().ok()?,
            gender,
            distance,
            stroke: Stroke::Diving,
            is_relay: false,
            is_diving: true,
            round_hint: None,
            name: format!("{} {}m Diving", gender, distance),
        });
    }

    if let Some(caps) = RE_PLATFORM_EVENT.captures(line) {
        let gender = parse_gender(&caps[2])?;
        return Some(EventHeader {
            number: caps[1].parse().ok()?,
            gender,
            distance: 0,
            stroke: Stroke::Diving,
            is_relay: false,
            is_diving: true,
            round_hint: None,
            name: format!("{} Platform Diving", gender),
        });
    }

    None
}

/// Recognize a continuation header and return the event number it
/// re-announces. The caller resolves it against the known event map; a
/// continuation never creates an event.
pub fn parse_continuation(line: &str) -> Option<u32> {
    RE_CONTINUATION
        .captures(line.trim())
        .and_then(|caps| caps[1].parse().ok())
}

fn parse_gender(s: &str) -> Option<Gender> {
    match s {
        "Women" => Some(Gender::Women),
        "Men" => Some(Gender::Men),
        _ => None,
    }
}

/// Normalize the stroke descriptor to the closed enum. "Medley" means the
/// medley relay order for relays and the individual medley otherwise.
fn normalize_stroke(text: &str, is_relay: bool) -> Option<Stroke> {
    match text {
        "Free" | "Freestyle" => Some(Stroke::Freestyle),
        "Back" | "Backstroke" => Some(Stroke::Backstroke),
        "Breast" | "Breaststroke" => Some(Stroke::Breaststroke),
        "Fly" | "Butterfly" => Some(Stroke::Butterfly),
        "Medley" => Some(if is_relay { Stroke::Medley } else { Stroke::Im }),
        "IM" => Some(Stroke::Im),
        _ => None,
    }
}
