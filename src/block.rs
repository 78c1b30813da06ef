//! Stateful block parser.
//!
//! One `BlockParser` walks every line of every column in document order,
//! carrying the active event and round across column and page boundaries.
//! Result lines become a pending record that later split, roster, and
//! dq-reason lines extend; the pending record is flushed into the output
//! when the next result or header arrives, or at a column boundary.
//! Splits stay as recorded on the line; deriving per-leg times is left to
//! [`crate::recover::derive_leg_times`].

use indexmap::IndexMap;

use crate::classify;
use crate::headers;
use crate::model::{EventHeader, RelaySwimmer, Round, SwimResult};
use crate::recover::parse_splits;
use crate::results::{parse_individual, parse_relay};
use crate::roster::parse_roster_line;

/// Line-by-line state machine over result columns.
pub(crate) struct BlockParser {
    events: IndexMap<u32, EventHeader>,
    invitational_first: bool,
    current_event: Option<EventHeader>,
    current_round: Option<Round>,
    pending: Option<SwimResult>,
    pending_roster: Vec<RelaySwimmer>,
    next_leg: u8,
    results: Vec<SwimResult>,
}

impl BlockParser {
    /// Start a parser over a pre-scanned event map.
    pub(crate) fn new(events: IndexMap<u32, EventHeader>, invitational_first: bool) -> Self {
        BlockParser {
            events,
            invitational_first,
            current_event: None,
            current_round: None,
            pending: None,
            pending_roster: Vec::new(),
            next_leg: 1,
            results: Vec::new(),
        }
    }

    /// Consume one line. Classification order matters: several categories
    /// share surface tokens, and the first matching category wins.
    pub(crate) fn feed_line(&mut self, raw: &str) {
        let line = raw.trim();

        if let Some(round) = classify::detect_round(line) {
            log::trace!("round marker: {}", round);
            self.current_round = Some(round);
            return;
        }

        if classify::is_skip_line(line) {
            return;
        }

        // A reason line is only meaningful directly under a DQ result
        if self.pending.as_ref().is_some_and(|r| r.is_dq) && classify::is_dq_reason_line(line) {
            if let Some(pending) = self.pending.as_mut() {
                pending.dq_reason = Some(line.to_string());
            }
            return;
        }

        if let Some(number) = headers::parse_continuation(line) {
            // A continuation re-announces an event; it never creates one
            if let Some(event) = self.events.get(&number).cloned() {
                self.flush();
                self.current_event = Some(event);
            }
            return;
        }

        if let Some(header) = headers::parse_event_header(line) {
            log::trace!("event header: {}", header.name);
            self.flush();
            self.current_round = header.round_hint;
            self.events.insert(header.number, header.clone());
            self.current_event = Some(header);
            return;
        }

        let Some(event) = self.current_event.clone() else {
            return;
        };
        if event.is_diving {
            return;
        }

        if classify::is_split_line(line) {
            let (splits, reaction) = parse_splits(line);
            if let Some(pending) = self.pending.as_mut() {
                pending.splits.extend(splits);
                if pending.reaction_time.is_none() {
                    pending.reaction_time = reaction;
                }
            }
            return;
        }

        if event.is_relay && !classify::starts_like_result(line) && classify::is_roster_line(line) {
            if let Some(entries) = parse_roster_line(line) {
                for entry in entries {
                    // Explicit leg numbers resync the running counter
                    let leg = entry.leg.unwrap_or(self.next_leg);
                    self.next_leg = leg.saturating_add(1);
                    self.pending_roster.push(RelaySwimmer {
                        name: entry.name,
                        year: entry.year,
                        leg,
                        reaction_time: entry.reaction_time,
                    });
                }
            }
            return;
        }

        let parsed = if event.is_relay {
            parse_relay(line, &event, self.invitational_first)
        } else {
            parse_individual(line, &event, self.invitational_first)
        };
        if let Some(mut result) = parsed {
            result.round = self.current_round;
            self.flush();
            self.pending = Some(result);
        }
    }

    /// Flush at a column boundary. The active event and round carry over;
    /// a half-built record must not absorb lines from the next column.
    pub(crate) fn end_of_column(&mut self) {
        self.flush();
    }

    /// Flush and yield all results in document order.
    pub(crate) fn finish(mut self) -> Vec<SwimResult> {
        self.flush();
        self.results
    }

    fn flush(&mut self) {
        if let Some(mut result) = self.pending.take() {
            result.relay_swimmers = std::mem::take(&mut self.pending_roster);
            log::trace!("flush: event {} {}", result.event_number, result.name);
            self.results.push(result);
        } else {
            self.pending_roster.clear();
        }
        self.next_leg = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Stroke};

    fn feed(parser: &mut BlockParser, lines: &[&str]) {
        for line in lines {
            parser.feed_line(line);
        }
    }

    fn dual_parser() -> BlockParser {
        BlockParser::new(IndexMap::new(), false)
    }

    #[test]
    fn test_relay_block_with_roster_and_splits() {
        let mut parser = dual_parser();
        feed(
            &mut parser,
            &[
                "#1 Women 200 Yard Medley Relay",
                "1 GTCH A 1:29.62 22",
                "1) Stanisavljevic, Nina SO 2) Reis, Giovana SO",
                "3) Dressel, Sherridon JR 4) Scott, Abby FR",
                "r:0.22 22.46 (22.46) 46.96 (24.50)",
                "2 ARMY A 1:31.05",
            ],
        );
        let results = parser.finish();
        assert_eq!(results.len(), 2);

        let first = &results[0];
        assert_eq!(first.team, "GTCH");
        assert_eq!(first.relay_swimmers.len(), 4);
        assert_eq!(first.relay_swimmers[0].leg, 1);
        assert_eq!(first.relay_swimmers[3].leg, 4);
        assert_eq!(first.relay_swimmers[3].name, "Scott, Abby");
        assert_eq!(first.splits, vec![22.46, 24.50]);
        assert_eq!(first.reaction_time, Some(0.22));

        let second = &results[1];
        assert_eq!(second.team, "ARMY");
        assert!(second.relay_swimmers.is_empty());
    }

    #[test]
    fn test_diff_style_splits_stored_as_recorded() {
        // Per-leg diffs can increase strictly on a fading swim; already
        // resolved diff values must not be differenced again
        let mut parser = dual_parser();
        feed(
            &mut parser,
            &[
                "Event 4 Women 200 Yard Breaststroke",
                "1 Walters, Sam FR GTCH 2:11.45 16",
                "29.12 (29.12) 1:02.52 (33.40) 1:36.57 (34.05) 2:11.45 (34.88)",
            ],
        );
        let results = parser.finish();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].splits, vec![29.12, 33.40, 34.05, 34.88]);
    }

    #[test]
    fn test_dq_reason_attaches_to_pending_dq() {
        let mut parser = dual_parser();
        feed(
            &mut parser,
            &[
                "#4 Women 100 Yard Breaststroke",
                "--- Walters, Sam FR GTCH DQ 59.70",
                "Butterfly kick other than breaststroke",
                "1 Crush, Johnny R SO ARMY 1:01.79 16",
            ],
        );
        let results = parser.finish();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_dq);
        assert_eq!(
            results[0].dq_reason.as_deref(),
            Some("Butterfly kick other than breaststroke")
        );
        assert!(results[1].dq_reason.is_none());
    }

    #[test]
    fn test_round_and_continuation_carry_over_columns() {
        let mut events = IndexMap::new();
        events.insert(
            3,
            EventHeader {
                number: 3,
                gender: Gender::Women,
                distance: 200,
                stroke: Stroke::Freestyle,
                is_relay: false,
                is_diving: false,
                round_hint: None,
                name: "Women 200 Freestyle".to_string(),
            },
        );
        let mut parser = BlockParser::new(events, false);

        feed(
            &mut parser,
            &["#3 Women 200 Yard Freestyle", "Preliminaries", "1 Rothwell, Vivien E JR GTCH 1:48.00"],
        );
        parser.end_of_column();
        feed(
            &mut parser,
            &["(Event 3 Women 200 Yard Freestyle)", "2 Deedy, Anne SR ARMY 1:49.10"],
        );

        let results = parser.finish();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].round, Some(Round::Prelim));
        assert_eq!(results[1].round, Some(Round::Prelim));
        assert_eq!(results[1].event_number, 3);
        assert_eq!(results[1].event_name, "Women 200 Freestyle");
    }

    #[test]
    fn test_unknown_continuation_dropped() {
        let mut parser = dual_parser();
        feed(
            &mut parser,
            &["(Event 9 Men 100 Yard Backstroke)", "1 Crush, Johnny R SO ARMY 47.79 16"],
        );
        // No known event 9 and no header seen, so nothing pends
        assert!(parser.finish().is_empty());
    }

    #[test]
    fn test_lines_before_any_header_dropped() {
        let mut parser = dual_parser();
        feed(&mut parser, &["1 Crush, Johnny R SO ARMY 47.79 16"]);
        assert!(parser.finish().is_empty());
    }

    #[test]
    fn test_diving_lines_dropped() {
        let mut parser = dual_parser();
        feed(
            &mut parser,
            &["#15 Women 1 mtr Diving", "1 Coburn, Megan JR GTCH 301.35 9"],
        );
        assert!(parser.finish().is_empty());
    }

    #[test]
    fn test_column_boundary_flushes_pending() {
        let mut parser = dual_parser();
        feed(
            &mut parser,
            &["#5 Men 100 Yard Freestyle", "1 Crush, Johnny R SO ARMY 47.79 16"],
        );
        parser.end_of_column();
        feed(&mut parser, &["22.46 47.79"]);
        let results = parser.finish();
        assert_eq!(results.len(), 1);
        // Split line in the next column must not reach the flushed record
        assert!(results[0].splits.is_empty());
    }
}
