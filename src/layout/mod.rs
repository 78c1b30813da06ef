//! Page layout analysis for column-formatted result documents.
//!
//! Meet programs print results in one, two, or three columns per page, and
//! the column layout is constant for the whole document. This module infers
//! the column count from the spatial distribution of line starts, locates
//! the gutters between columns from character density, and cuts each page
//! into ordered per-column text blocks.

pub mod detector;
pub mod gutter;
pub mod splitter;

// Re-export main types
pub use detector::{Layout, detect_layout};
pub use gutter::find_gutters;
pub use splitter::extract_columns;
