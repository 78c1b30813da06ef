//! End-to-end parse of a synthetic three-column dual-meet program, layout
//! detection included.

use meetparse::{parse_document, parse_document_with_meet_info, Page, ParseConfig, TextDocument};

const COL1: &str = "Georgia Tech vs Army
11/18/2025
#1 Women 200 Yard Medley Relay
1 GTCH A 1:29.62 22
1) Reis, Giovana SO 2) Cera, Ana FR
3) Tallon, Sue JR 4) Scott, Abby FR
r:0.22 22.46 (22.46) 46.96 (24.50)
2 ARMY A 1:31.05 9
--- ARMY B DQ 1:33.34";

const COL2: &str = "#2 Men 1000 Yard Freestyle
1 Crush, Johnny R SO ARMY 9:29.94 16
2 Gerhard, Ben M FR GTCH 9:45.10 13
#4 Women 100 Yard Breaststroke
--- Walters, Sam FR GTCH DQ 59.70
Butterfly kick other than breaststroke
1 Rothwell, Vivien E JR GTCH 1:01.20 16";

const COL3: &str = "(#4 Women 100 Yard Breaststroke)
--- Kling, Joey T SR ARMY SCR
#15 Women 1 mtr Diving
1 Coburn, Megan JR GTCH 301.35 9";

fn dual_meet_doc() -> TextDocument {
    TextDocument::new(vec![Page::from_columns(
        1800.0,
        792.0,
        &[(50.0, COL1), (650.0, COL2), (1250.0, COL3)],
    )])
}

#[test]
fn test_full_parse() {
    let (table, info) = parse_document_with_meet_info(&dual_meet_doc(), &ParseConfig::new()).unwrap();

    // Diving results are not parsed, so event 15 contributes nothing
    assert_eq!(table.len(), 8);
    assert_eq!(table.relays().count(), 3);
    assert_eq!(table.individuals().count(), 5);

    assert_eq!(info.name.as_deref(), Some("Georgia Tech vs Army"));
    assert_eq!(info.date.as_deref(), Some("11/18/2025"));
    assert!(info.date_parsed().is_some());
}

#[test]
fn test_relay_record_fully_assembled() {
    let table = parse_document(&dual_meet_doc(), &ParseConfig::new()).unwrap();
    let winner = table.for_event(1).next().unwrap();

    assert_eq!(winner.team, "GTCH");
    assert_eq!(winner.relay_letter, Some('A'));
    assert_eq!(winner.place, Some(1));
    assert_eq!(winner.finals_seconds, Some(89.62));
    assert_eq!(winner.points, Some(22.0));
    assert_eq!(winner.reaction_time, Some(0.22));
    assert_eq!(winner.splits, vec![22.46, 24.50]);

    let legs: Vec<(u8, &str)> = winner
        .relay_swimmers
        .iter()
        .map(|s| (s.leg, s.name.as_str()))
        .collect();
    assert_eq!(
        legs,
        vec![
            (1, "Reis, Giovana"),
            (2, "Cera, Ana"),
            (3, "Tallon, Sue"),
            (4, "Scott, Abby"),
        ]
    );
}

#[test]
fn test_relay_dq_keeps_recorded_time() {
    let table = parse_document(&dual_meet_doc(), &ParseConfig::new()).unwrap();
    let dq = table.for_event(1).find(|r| r.is_dq).unwrap();
    assert_eq!(dq.team, "ARMY");
    assert_eq!(dq.relay_letter, Some('B'));
    assert_eq!(dq.place, None);
    assert_eq!(dq.finals_time, "1:33.34");
}

#[test]
fn test_dq_reason_attaches() {
    let table = parse_document(&dual_meet_doc(), &ParseConfig::new()).unwrap();
    let walters = table.for_swimmer("Walters").next().unwrap();
    assert!(walters.is_dq);
    assert_eq!(walters.finals_time, "59.70");
    assert_eq!(
        walters.dq_reason.as_deref(),
        Some("Butterfly kick other than breaststroke")
    );

    // The reason must not bleed onto the following result
    let rothwell = table.for_swimmer("Rothwell").next().unwrap();
    assert!(rothwell.dq_reason.is_none());
}

#[test]
fn test_continuation_reuses_event_across_columns() {
    let table = parse_document(&dual_meet_doc(), &ParseConfig::new()).unwrap();
    let kling = table.for_swimmer("Kling").next().unwrap();
    assert_eq!(kling.event_number, 4);
    assert_eq!(kling.event_name, "Women 100 Breaststroke");
    assert!(kling.is_scratch);
    assert_eq!(kling.finals_seconds, None);
}

#[test]
fn test_sorted_by_event_then_place_with_unplaced_trailing() {
    let table = parse_document(&dual_meet_doc(), &ParseConfig::new()).unwrap();
    let order: Vec<(u32, Option<u32>)> = table.iter().map(|r| (r.event_number, r.place)).collect();
    assert_eq!(
        order,
        vec![
            (1, Some(1)),
            (1, Some(2)),
            (1, None),
            (2, Some(1)),
            (2, Some(2)),
            (4, Some(1)),
            (4, None),
            (4, None),
        ]
    );
}

#[test]
fn test_status_flags_are_exclusive() {
    let table = parse_document(&dual_meet_doc(), &ParseConfig::new()).unwrap();
    for result in &table {
        assert!(
            !(result.is_dq && result.is_scratch),
            "{} is both DQ and scratch",
            result.name
        );
        if !result.is_relay {
            assert!(result.relay_swimmers.is_empty());
        } else {
            assert!(result.year.is_none());
        }
    }
}

#[test]
fn test_parse_is_idempotent() {
    let doc = dual_meet_doc();
    let config = ParseConfig::new();
    let first = parse_document(&doc, &config).unwrap();
    let second = parse_document(&doc, &config).unwrap();
    assert_eq!(first, second);
}
