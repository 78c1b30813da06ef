//! Column splitting: cut a page into ordered per-column text blocks.
//!
//! A pure function of (page, layout, splits). The single-column case passes
//! the page's extracted text through untouched; multi-column pages are
//! re-assembled from character geometry so that each column reads top to
//! bottom without interleaving.

use crate::layout::detector::{LINE_Y_THRESHOLD, Layout};
use crate::page::{Page, PageChar};

/// Extract the page's text columns in left-to-right order.
///
/// `splits` are the gutter x-coordinates from layout detection; when they
/// are missing, columns fall back to equal divisions of the page width.
/// Columns with no text are omitted.
pub fn extract_columns(page: &Page, layout: Layout, splits: &[f32]) -> Vec<String> {
    if layout == Layout::OneColumn {
        return if page.text.trim().is_empty() {
            vec![]
        } else {
            vec![page.text.clone()]
        };
    }

    let width = page.width;
    let boundaries: Vec<(f32, f32)> = match layout {
        Layout::OneColumn => unreachable!(),
        Layout::TwoColumn => {
            let mid = splits.first().copied().unwrap_or(width / 2.0);
            vec![(0.0, mid), (mid, width)]
        },
        Layout::ThreeColumn => {
            let s1 = splits.first().copied().unwrap_or(width / 3.0);
            let s2 = splits.get(1).copied().unwrap_or(width * 2.0 / 3.0);
            vec![(0.0, s1), (s1, s2), (s2, width)]
        },
    };

    let chars = page.sorted_chars();
    let mut columns = Vec::new();
    for (x0, x1) in boundaries {
        let in_range: Vec<PageChar> =
            chars.iter().filter(|c| c.x >= x0 && c.x < x1).copied().collect();
        let text = assemble_lines(&in_range);
        if !text.trim().is_empty() {
            columns.push(text);
        }
    }
    columns
}

/// Re-assemble lines from position-sorted characters.
///
/// Characters within [`LINE_Y_THRESHOLD`] of the current line's anchor stay
/// on that line. A space is inserted at horizontal gaps wider than the
/// line's typical advance, for extractors that do not emit space
/// characters.
fn assemble_lines(chars: &[PageChar]) -> String {
    let mut lines: Vec<Vec<PageChar>> = Vec::new();
    let mut current_y: Option<f32> = None;

    for &c in chars {
        if current_y.is_none_or(|y| (c.y - y).abs() > LINE_Y_THRESHOLD) {
            lines.push(Vec::new());
            current_y = Some(c.y);
        }
        lines.last_mut().expect("line started above").push(c);
    }

    let mut out = String::new();
    for (i, line) in lines.iter_mut().enumerate() {
        line.sort_by(|a, b| crate::utils::safe_float_cmp(a.x, b.x));
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_line(line));
    }
    out
}

fn render_line(line: &[PageChar]) -> String {
    let gap_threshold = space_gap_threshold(line);
    let mut s = String::new();
    let mut prev: Option<PageChar> = None;
    for &c in line {
        if let Some(p) = prev {
            if p.ch != ' ' && c.ch != ' ' && c.x - p.x > gap_threshold {
                s.push(' ');
            }
        }
        s.push(c.ch);
        prev = Some(c);
    }
    s.trim_end().to_string()
}

/// Gap width that implies a missing space: 1.75× the median advance
/// between consecutive characters on the line.
fn space_gap_threshold(line: &[PageChar]) -> f32 {
    if line.len() < 2 {
        return f32::MAX;
    }
    let mut advances: Vec<f32> = line.windows(2).map(|w| w[1].x - w[0].x).collect();
    advances.sort_by(|a, b| crate::utils::safe_float_cmp(*a, *b));
    let median = advances[advances.len() / 2];
    (median * 1.75).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_column_passthrough() {
        let page = Page::from_text("line one\nline two");
        let cols = extract_columns(&page, Layout::OneColumn, &[]);
        assert_eq!(cols, vec!["line one\nline two".to_string()]);
    }

    #[test]
    fn test_one_column_empty_page() {
        let page = Page::from_text("");
        assert!(extract_columns(&page, Layout::OneColumn, &[]).is_empty());
    }

    #[test]
    fn test_two_columns_split() {
        let page = Page::from_columns(612.0, 792.0, &[(20.0, "alpha\nbravo"), (330.0, "charlie\ndelta")]);
        let cols = extract_columns(&page, Layout::TwoColumn, &[300.0]);
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0], "alpha\nbravo");
        assert_eq!(cols[1], "charlie\ndelta");
    }

    #[test]
    fn test_three_columns_preserve_order() {
        let page = Page::from_columns(
            612.0,
            792.0,
            &[(10.0, "one"), (215.0, "two"), (420.0, "three")],
        );
        let cols = extract_columns(&page, Layout::ThreeColumn, &[190.0, 390.0]);
        assert_eq!(cols, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_missing_splits_fall_back_to_equal_division() {
        let page = Page::from_columns(600.0, 792.0, &[(20.0, "left"), (330.0, "right")]);
        let cols = extract_columns(&page, Layout::TwoColumn, &[]);
        assert_eq!(cols, vec!["left", "right"]);
    }

    #[test]
    fn test_empty_column_omitted() {
        let page = Page::from_columns(612.0, 792.0, &[(20.0, "only left")]);
        let cols = extract_columns(&page, Layout::TwoColumn, &[300.0]);
        assert_eq!(cols, vec!["only left"]);
    }

    #[test]
    fn test_space_inserted_at_wide_gap() {
        // No space characters in the stream; the gap must produce one
        let chars = vec![
            PageChar { ch: 'a', x: 0.0, y: 0.0 },
            PageChar { ch: 'b', x: 5.0, y: 0.0 },
            PageChar { ch: 'c', x: 30.0, y: 0.0 },
            PageChar { ch: 'd', x: 35.0, y: 0.0 },
        ];
        assert_eq!(assemble_lines(&chars), "ab cd");
    }
}
