//! Gutter location from character density.
//!
//! A gutter is a low-density vertical band flanked on both sides by real
//! content. The character-density histogram is finer grained than the
//! line-start histogram used for column counting, which gives accurate
//! split coordinates even when columns have ragged right edges.

use crate::page::PageChar;

/// Bands in the character-density histogram.
const DENSITY_BANDS: usize = 60;

/// A band is gutter-eligible below this fraction of the average density.
const LOW_DENSITY_FRACTION: f32 = 0.4;

/// Fraction of the page width excluded at each edge; page margins are
/// low-density but are not gutters.
const EDGE_MARGIN: f32 = 0.10;

/// Bands examined on each side of a candidate gutter.
const SIDE_CHECK_BANDS: usize = 8;

/// Both sides of a gutter must exceed this fraction of the average density.
const MIN_SIDE_FRACTION: f32 = 0.3;

/// Find up to `num_gutters` gutter center x-coordinates.
///
/// Candidates are interior low-density runs with significant content on
/// both sides; the lowest-density candidates win, returned in left-to-right
/// order. May return fewer than requested (including none) when the page
/// has no qualifying gutters.
pub fn find_gutters(chars: &[PageChar], width: f32, num_gutters: usize) -> Vec<f32> {
    if chars.is_empty() || width <= 0.0 {
        return vec![];
    }

    let band_width = width / DENSITY_BANDS as f32;
    let mut bands = [0usize; DENSITY_BANDS];
    for c in chars {
        let b = ((c.x / band_width) as usize).min(DENSITY_BANDS - 1);
        bands[b] += 1;
    }

    let avg = chars.len() as f32 / DENSITY_BANDS as f32;
    let threshold = avg * LOW_DENSITY_FRACTION;
    let margin = (DENSITY_BANDS as f32 * EDGE_MARGIN) as usize;

    // (center x, minimum density in the run)
    let mut candidates: Vec<(f32, usize)> = Vec::new();
    let mut i = margin;
    while i < DENSITY_BANDS - margin {
        if (bands[i] as f32) < threshold {
            let start = i;
            let mut min_val = bands[i];
            while i < DENSITY_BANDS - margin && (bands[i] as f32) < threshold {
                min_val = min_val.min(bands[i]);
                i += 1;
            }
            let end = i;
            let center_x = ((start + end) as f32 / 2.0) * band_width;

            // A real gutter has content on both sides
            let left_start = start.saturating_sub(SIDE_CHECK_BANDS);
            let right_end = (end + SIDE_CHECK_BANDS).min(DENSITY_BANDS);
            let left_avg = side_average(&bands[left_start..start]);
            let right_avg = side_average(&bands[end..right_end]);
            let min_side = avg * MIN_SIDE_FRACTION;
            if left_avg > min_side && right_avg > min_side {
                candidates.push((center_x, min_val));
            }
        } else {
            i += 1;
        }
    }

    // Lowest density = strongest gutter
    candidates.sort_by_key(|&(_, min_val)| min_val);
    let mut result: Vec<f32> = candidates
        .into_iter()
        .take(num_gutters)
        .map(|(x, _)| x)
        .collect();
    result.sort_by(|a, b| crate::utils::safe_float_cmp(*a, *b));
    result
}

fn side_average(bands: &[usize]) -> f32 {
    if bands.is_empty() {
        return 0.0;
    }
    bands.iter().sum::<usize>() as f32 / bands.len() as f32
}
