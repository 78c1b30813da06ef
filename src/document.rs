//! Document orchestration.
//!
//! Two passes over every column of every page. Pass 1 collects event
//! headers only, so a continuation header early in the reading order can
//! resolve an event announced later. Pass 2 runs one block parser across
//! the whole document, then the raw records are deduplicated, patched for
//! known team-name truncations, and sorted.

use std::collections::HashSet;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use crate::block::BlockParser;
use crate::config::{GrammarOrder, ParseConfig};
use crate::error::{Error, Result};
use crate::headers::parse_event_header;
use crate::layout::{detect_layout, extract_columns, Layout};
use crate::model::{MeetInfo, ResultTable, SwimResult};
use crate::page::{Page, PageSource};

lazy_static! {
    /// US-style date "11/18/2025"
    static ref RE_DATE_US: Regex = Regex::new(r"\d{1,2}/\d{1,2}/\d{4}").unwrap();

    /// ISO date "2025-11-18"
    static ref RE_DATE_ISO: Regex = Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap();

    /// Title-block boilerplate that can never be a meet name
    static ref RE_TITLE_BOILERPLATE: Regex =
        Regex::new(r"(?i)HY-TEK|MEET MANAGER|Site License|Page\s+\d").unwrap();
}

/// Known team names the fixed-width output truncates.
const TEAM_FIXES: [(&str, &str); 1] = [(
    "Georgia Institute of Technolog",
    "Georgia Institute of Technology",
)];

/// How many leading lines of the first page to scan for meet metadata.
const TITLE_SCAN_LINES: usize = 15;

/// Parse a document into its result table.
pub fn parse_document<S: PageSource>(source: &S, config: &ParseConfig) -> Result<ResultTable> {
    parse_document_with_meet_info(source, config).map(|(table, _)| table)
}

/// Parse a document into its result table plus best-effort meet metadata
/// from the title block.
pub fn parse_document_with_meet_info<S: PageSource>(
    source: &S,
    config: &ParseConfig,
) -> Result<(ResultTable, MeetInfo)> {
    let pages = source.pages();
    if pages.is_empty() {
        return Ok((ResultTable::default(), MeetInfo::default()));
    }

    let (layout, splits) = resolve_layout(pages, config)?;
    log::debug!("layout {:?}, splits {:?}", layout, splits);

    let invitational_first = match config.grammar_order {
        GrammarOrder::Auto => layout == Layout::OneColumn,
        GrammarOrder::DualFirst => false,
        GrammarOrder::InvitationalFirst => true,
    };

    // Pass 1: headers only, across the whole document
    let mut events = IndexMap::new();
    for page in pages {
        for column in extract_columns(page, layout, &splits) {
            for line in column.lines() {
                if let Some(header) = parse_event_header(line) {
                    events.insert(header.number, header);
                }
            }
        }
    }
    log::debug!("pass 1 found {} events", events.len());

    // Pass 2: one block parser in document order
    let mut parser = BlockParser::new(events, invitational_first);
    for page in pages {
        for column in extract_columns(page, layout, &splits) {
            for line in column.lines() {
                parser.feed_line(line);
            }
            parser.end_of_column();
        }
    }

    let results = assemble(parser.finish());
    log::debug!("parsed {} results", results.len());
    Ok((ResultTable::new(results), extract_meet_info(pages)))
}

/// Layout from the config override, validated, or from the detector.
fn resolve_layout(pages: &[Page], config: &ParseConfig) -> Result<(Layout, Vec<f32>)> {
    if let Some((layout, splits)) = &config.layout_override {
        let expected = layout.column_count() - 1;
        if splits.len() != expected {
            return Err(Error::Config(format!(
                "layout override for {:?} needs {} split(s), got {}",
                layout,
                expected,
                splits.len()
            )));
        }
        return Ok((*layout, splits.clone()));
    }
    Ok(detect_layout(pages))
}

/// Deduplicate (keep-first), patch truncated team names, and sort by
/// (event number, place) with unplaced records trailing.
fn assemble(results: Vec<SwimResult>) -> Vec<SwimResult> {
    let mut seen = HashSet::new();
    let mut out: Vec<SwimResult> = Vec::with_capacity(results.len());
    for mut result in results {
        if !seen.insert(result.dedup_key()) {
            continue;
        }
        for &(truncated, full) in &TEAM_FIXES {
            if result.team == truncated {
                result.team = full.to_string();
            }
            if result.name == truncated {
                result.name = full.to_string();
            }
        }
        out.push(result);
    }
    out.sort_by_key(|r| (r.event_number, r.place.unwrap_or(u32::MAX)));
    out
}

/// Scrape the meet name and date from the first page's title block.
fn extract_meet_info(pages: &[Page]) -> MeetInfo {
    let mut info = MeetInfo::default();
    let Some(first) = pages.first() else {
        return info;
    };

    let mut fallback: Option<&str> = None;
    for line in first.text.lines().take(TITLE_SCAN_LINES) {
        let line = line.trim();
        if line.is_empty() || RE_TITLE_BOILERPLATE.is_match(line) {
            continue;
        }

        if info.date.is_none() {
            if let Some(m) = RE_DATE_US.find(line) {
                info.date = Some(m.as_str().to_string());
                if info.name.is_none() {
                    let head = line[..m.start()].trim().trim_end_matches(['-', ',']).trim();
                    if head.len() >= 4 {
                        info.name = Some(head.to_string());
                    }
                }
                continue;
            }
            if let Some(m) = RE_DATE_ISO.find(line) {
                info.date = Some(m.as_str().to_string());
                continue;
            }
        }

        if info.name.is_none() && looks_like_meet_name(line) {
            info.name = Some(line.to_string());
        }
        if fallback.is_none_or(|f| line.len() > f.len()) {
            fallback = Some(line);
        }
    }

    if info.name.is_none() {
        if let Some(f) = fallback.filter(|f| f.len() >= 10) {
            info.name = Some(f.to_string());
        }
    }
    info
}

fn looks_like_meet_name(line: &str) -> bool {
    let lower = line.to_lowercase();
    if lower.split_whitespace().any(|w| w == "vs" || w == "vs." || w == "@") {
        return true;
    }
    ["meet", "invitational", "championship", "dual", "tournament"]
        .iter()
        .any(|kw| lower.contains(kw))
}
