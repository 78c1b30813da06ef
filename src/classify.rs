//! Line classification for result columns.
//!
//! Each physical line of a column falls into exactly one category, tested in
//! priority order by the block parser: round header, boilerplate/skip,
//! dq-reason, event header, split line, relay-roster line, candidate result.
//! Several categories share superficial tokens, so the order matters; the
//! predicates here are deliberately independent of each other and carry no
//! state.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::Round;
use crate::times::plausible_split;

lazy_static! {
    /// Round/section markers paired with the round they select
    static ref ROUND_PATTERNS: Vec<(Regex, Round)> = vec![
        (Regex::new(r"(?i)^[ABC]\s*-\s*Final").unwrap(), Round::Finals),
        (Regex::new(r"(?i)^Prelim").unwrap(), Round::Prelim),
        (Regex::new(r"(?i)^Consolation").unwrap(), Round::Finals),
        (Regex::new(r"(?i)^Timed\s+Finals").unwrap(), Round::Finals),
    ];

    /// Boilerplate emitted by the meet-management tool: titles, column
    /// headers, page footers, score boxes
    static ref SKIP_PATTERNS: Vec<Regex> = [
        r"HY-TEK",
        r"MEET MANAGER",
        r"Page\s+\d",
        r"Results\s*-",
        r"Site License",
        r"^\d{4}-\d{4}",
        r"^Team\s+R\s*elay",
        r"^Name\s+(?:Y\s*r|Age)",
        r"Scores\s*-",
        r"Team Rankings",
        r"^Seed\s+Time",
        r"^Finals\s+Time",
    ]
    .iter()
    .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
    .collect();

    /// Qualifying-standard line: a time followed by a cut code
    static ref RE_STANDARD_LINE: Regex =
        Regex::new(r"^[\d:.]+\s+(?:A|B|NCAA|RELB|RELA)$").unwrap();

    /// Short bare cut standard like "52.65 A"
    static ref RE_SHORT_STANDARD: Regex = Regex::new(r"^\d+\.\d+\s+[A-Z]+$").unwrap();

    /// Place number (or "---") followed by a letter: the shape of a result
    /// line, used to exclude result lines from split/roster classification
    static ref RE_PLACE_PREFIX: Regex = Regex::new(r"^\*?(\d+|---)\s+[A-Za-z]").unwrap();

    /// Reaction-time prefix "r:+0.54" / "r:-0.39" / "r:0.22"
    pub(crate) static ref RE_REACTION_PREFIX: Regex =
        Regex::new(r"^r:([+\-]?\d+\.?\d*)\s*").unwrap();

    /// Parenthesized group (cumulative/diff split annotations)
    static ref RE_PAREN_GROUP: Regex = Regex::new(r"\([^)]*\)").unwrap();

    /// Numbered roster segment start: "1) Name" or "1) r:0.22 Name"
    static ref RE_NUMBERED_ROSTER: Regex =
        Regex::new(r"^\d\)\s*(?:r:[+\-]?\d+\.?\d*\s+)?[A-Za-z'\-]+").unwrap();

    /// Two name+year groups on one line (unnumbered roster)
    static ref RE_DOUBLE_NAME: Regex =
        Regex::new(r"[A-Za-z'\-]+,\s+[A-Za-z]+.*?(FR|SO|JR|SR)\s+[A-Za-z'\-]+,").unwrap();

    /// A single trailing name+year group (last roster line)
    static ref RE_SINGLE_NAME: Regex =
        Regex::new(r"^[A-Za-z'\-]+,\s+[A-Za-z]+.*?(FR|SO|JR|SR|GS|\d{2})$").unwrap();
}

/// Keywords from the closed vocabulary of disqualification descriptions.
const DQ_KEYWORDS: [&str; 21] = [
    "cycle:",
    "stroke:",
    "turn:",
    "start:",
    "finish:",
    "pull",
    "kick",
    "touch",
    "delay",
    "false",
    "alternating",
    "scissors",
    "flutter",
    "dolphin",
    "not simultaneous",
    "did not",
    "early",
    "late",
    "one hand",
    "non-simultaneous",
    "past vertical",
];

/// Check for a round/section header ("A - Final", "Prelims", ...).
pub fn detect_round(line: &str) -> Option<Round> {
    let line = line.trim();
    ROUND_PATTERNS
        .iter()
        .find(|(pat, _)| pat.is_match(line))
        .map(|&(_, round)| round)
}

/// Check for boilerplate to skip: tool banners, column headers, page
/// numbers, pure qualifying-standard lines, blank lines.
pub fn is_skip_line(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return true;
    }
    if SKIP_PATTERNS.iter().any(|pat| pat.is_match(line)) {
        return true;
    }
    if RE_STANDARD_LINE.is_match(line) {
        return true;
    }
    if RE_SHORT_STANDARD.is_match(line) && line.len() < 25 {
        return true;
    }
    false
}

/// Check for a disqualification-reason line. Only meaningful immediately
/// after a result already flagged DQ; the caller enforces that.
pub fn is_dq_reason_line(line: &str) -> bool {
    let lower = line.trim().to_lowercase();
    DQ_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Check whether a line is dominated by split times.
///
/// A line starting with a reaction-time prefix is always a split line.
/// Otherwise, after stripping the prefix and parenthesized groups, at least
/// two tokens must parse as plausible swim times and they must make up at
/// least half the tokens. Lines shaped like place-prefixed results are
/// never split lines.
pub fn is_split_line(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() || RE_PLACE_PREFIX.is_match(line) {
        return false;
    }
    if RE_REACTION_PREFIX.is_match(line) {
        return true;
    }

    let cleaned = RE_REACTION_PREFIX.replace(line, "");
    let cleaned = RE_PAREN_GROUP.replace_all(&cleaned, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return false;
    }

    let parts: Vec<&str> = cleaned.split_whitespace().collect();
    if parts.len() < 2 {
        return false;
    }
    let time_count = parts.iter().filter(|p| plausible_split(p).is_some()).count();
    time_count >= 2 && time_count * 2 >= parts.len()
}

/// Check for a relay-roster line in numbered or unnumbered form.
///
/// A line beginning with a place number and a capitalized word is a result
/// line, not a roster line; the block parser filters that shape before
/// calling the roster parser.
pub fn is_roster_line(line: &str) -> bool {
    let line = line.trim();
    if RE_NUMBERED_ROSTER.is_match(line) && line.contains(',') {
        return true;
    }
    if RE_DOUBLE_NAME.is_match(line) {
        return true;
    }
    RE_SINGLE_NAME.is_match(line)
}

/// Check whether a line starts with a place number followed by a
/// capitalized word, the shape of a result line.
pub fn starts_like_result(line: &str) -> bool {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^\d+\s+[A-Z]").unwrap();
    }
    RE.is_match(line.trim())
}
