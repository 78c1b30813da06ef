//! Column-count inference from line-start positions.
//!
//! Buckets every line's starting x-coordinate into horizontal bands over a
//! sample of pages. Contiguous occupied bands merge into clusters, each
//! cluster marking a column's left edge; the cluster count decides the
//! layout. Gutter positions come from the character-density histogram in
//! [`crate::layout::gutter`], with geometric fallbacks when no clean gutter
//! exists.

use crate::layout::gutter::find_gutters;
use crate::page::{Page, PageChar};

/// Pages sampled for layout analysis. The layout is constant per document,
/// so a short prefix is enough.
const SAMPLE_PAGES: usize = 3;

/// Vertical distance above which a character starts a new line.
pub(crate) const LINE_Y_THRESHOLD: f32 = 3.0;

/// Bands in the line-start histogram.
const START_BANDS: usize = 20;

/// A band is occupied above this share of all sampled line starts.
const MIN_BAND_SHARE: f32 = 0.04;

/// A cluster only counts above this total line-start share; filters noise
/// from indented continuation lines.
const MIN_CLUSTER_SHARE: f32 = 0.08;

/// Two clusters must split line starts at least this evenly to count as a
/// two-column layout.
const BALANCE_FLOOR: f32 = 0.30;

/// Detected page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Single wide column (invitational style)
    OneColumn,
    /// Two printed columns
    TwoColumn,
    /// Three printed columns (compact dual-meet style)
    ThreeColumn,
}

impl Layout {
    /// Number of printed columns.
    pub fn column_count(&self) -> usize {
        match self {
            Layout::OneColumn => 1,
            Layout::TwoColumn => 2,
            Layout::ThreeColumn => 3,
        }
    }
}

/// A line-start cluster: (center x, right edge x).
#[derive(Debug, Clone, Copy)]
struct Cluster {
    center: f32,
    right: f32,
}

/// Infer the column layout and gutter split x-coordinates.
///
/// Returns `(layout, splits)` where `splits.len() == column_count - 1`.
/// An empty document defaults to a single column; this never fails.
pub fn detect_layout(pages: &[Page]) -> (Layout, Vec<f32>) {
    let mut all_chars: Vec<PageChar> = Vec::new();
    let mut line_starts: Vec<f32> = Vec::new();

    for page in pages.iter().take(SAMPLE_PAGES) {
        let chars = page.sorted_chars();
        // Adjacent columns print their rows at the same y, so a y change
        // alone only ever sees the leftmost column. A backward or
        // band-scale forward x jump within a row starts a line too.
        let x_jump = page.width / START_BANDS as f32;
        let mut current_y: Option<f32> = None;
        let mut prev_x: Option<f32> = None;
        for c in &chars {
            let new_row = current_y.is_none_or(|y| (c.y - y).abs() > LINE_Y_THRESHOLD);
            if new_row || prev_x.is_some_and(|x| c.x < x || c.x - x > x_jump) {
                line_starts.push(c.x);
                current_y = Some(c.y);
            }
            prev_x = Some(c.x);
        }
        all_chars.extend(chars);
    }

    if line_starts.is_empty() {
        return (Layout::OneColumn, vec![]);
    }

    let width = pages[0].width;
    let clusters = find_clusters(&line_starts, width);

    log::debug!(
        "layout detection: {} line starts, {} clusters at {:?}",
        line_starts.len(),
        clusters.len(),
        clusters.iter().map(|c| c.center).collect::<Vec<_>>()
    );

    if clusters.len() >= 3 {
        let mut splits = find_gutters(&all_chars, width, 2);
        if splits.len() < 2 {
            // Fallback: midpoints between neighboring cluster edges
            splits = clusters
                .windows(2)
                .map(|pair| (pair[0].right + pair[1].center) / 2.0)
                .collect();
        }
        splits.truncate(2);
        return (Layout::ThreeColumn, splits);
    }

    if clusters.len() == 2 {
        let split_x = (clusters[0].center + clusters[1].center) / 2.0;
        let left = line_starts.iter().filter(|&&x| x < split_x).count();
        let right = line_starts.len() - left;
        let (lo, hi) = (left.min(right), left.max(right));
        let balance = if hi > 0 { lo as f32 / hi as f32 } else { 0.0 };
        if balance > BALANCE_FLOOR {
            let mut splits = find_gutters(&all_chars, width, 1);
            if splits.is_empty() {
                splits = vec![width / 2.0];
            }
            splits.truncate(1);
            return (Layout::TwoColumn, splits);
        }
        log::debug!("two clusters but unbalanced ({:.2}); treating as one column", balance);
    }

    (Layout::OneColumn, vec![])
}

/// Merge contiguous occupied bands of the line-start histogram into
/// clusters, dropping clusters below the coverage floor.
fn find_clusters(line_starts: &[f32], width: f32) -> Vec<Cluster> {
    if width <= 0.0 {
        return vec![];
    }
    let band_width = width / START_BANDS as f32;
    let mut bands = [0usize; START_BANDS];
    for &x in line_starts {
        let b = ((x / band_width) as usize).min(START_BANDS - 1);
        bands[b] += 1;
    }

    let total = line_starts.len() as f32;
    let occupied = |count: usize| count as f32 > total * MIN_BAND_SHARE;

    let mut clusters = Vec::new();
    let mut i = 0;
    while i < START_BANDS {
        if occupied(bands[i]) {
            let start = i;
            let mut cluster_count = 0;
            while i < START_BANDS && occupied(bands[i]) {
                cluster_count += bands[i];
                i += 1;
            }
            if cluster_count as f32 > total * MIN_CLUSTER_SHARE {
                clusters.push(Cluster {
                    center: ((start + i) as f32 / 2.0) * band_width,
                    right: i as f32 * band_width,
                });
            }
        } else {
            i += 1;
        }
    }
    clusters
}
