// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::type_complexity)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::match_like_matches_macro)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # meetparse
//!
//! Parsing engine for swim-meet result documents whose only machine-readable
//! form is extracted text: characters with positions, no semantic structure.
//!
//! ## Pipeline
//!
//! - **Layout inference**: one, two, or three printed columns per page,
//!   detected from the spatial distribution of line starts
//! - **Column splitting**: gutters located by character density, pages cut
//!   into ordered per-column text blocks
//! - **Line classification**: round headers, boilerplate, event headers,
//!   split lines, relay rosters, candidate results
//! - **Result grammars**: individual, relay, and diving families, each with
//!   dual-meet and invitational variants tried as ordered alternatives
//! - **Field recovery**: names, class years, and team codes pried out of
//!   merged text blobs
//! - **Assembly**: deduplication, team-name repair, (event, place) ordering
//!
//! ## Quick Start
//!
//! ```ignore
//! use meetparse::{parse_document_with_meet_info, ParseConfig, TextDocument};
//!
//! # fn main() -> meetparse::Result<()> {
//! let doc = TextDocument::from_file("meet.json")?;
//! let (results, info) = parse_document_with_meet_info(&doc, &ParseConfig::new())?;
//!
//! println!("{:?}: {} results", info.name, results.len());
//! for result in results.for_team("GTCH") {
//!     println!("{} {} {}", result.event_name, result.name, result.finals_time);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Input boundary and configuration
pub mod config;
pub mod page;

// Layout analysis
pub mod layout;

// Line-level parsing
pub mod classify;
pub mod headers;
pub mod recover;
pub mod results;
pub mod roster;
pub mod times;

// Data model
pub mod model;

// Document parsing
mod block;
pub mod document;

// Re-exports
pub use config::{GrammarOrder, ParseConfig, SplitConvention};
pub use document::{parse_document, parse_document_with_meet_info};
pub use error::{Error, Result};
pub use layout::Layout;
pub use model::{
    EventHeader, Gender, MeetInfo, MeetSummary, RelaySwimmer, ResultTable, Round, Stroke,
    SwimResult,
};
pub use page::{Page, PageChar, PageSource, TextDocument};

/// Library version from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name from the crate manifest.
pub const NAME: &str = env!("CARGO_PKG_NAME");

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all
    /// other values, so sorting operations never panic.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => {
                // Both are normal numbers, safe to unwrap
                a.partial_cmp(&b).unwrap()
            },
        }
    }

}
