//! Reconstruct table structure from pdftotext -layout output.
//!
//! pdftotext -layout preserves column alignment using spaces; runs of
//! two or more spaces separate the cells of a row.

use crate::extraction::PageContent;

/// Column label that marks the header row of a line-item table.
const ITEM_MARKER: &str = "item";

/// A line-item table located within a page.
#[derive(Debug, Clone)]
pub struct TableRegion {
    /// Line index of the header row.
    pub header_line: usize,
    /// First data line.
    pub start_line: usize,
    /// One past the last data line.
    pub end_line: usize,
}

/// Detect if a line is a line-item header row: the item-column label
/// must appear in the row's first cell.
pub fn is_header_row(line: &str) -> bool {
    match split_by_whitespace_gaps(line).first() {
        Some(first) => first.to_lowercase().contains(ITEM_MARKER),
        None => false,
    }
}

/// Find line-item tables within one page.
///
/// A header row opens a table; it runs to the next blank line, the next
/// header row, or the end of the page.
pub fn find_table_regions(page: &PageContent) -> Vec<TableRegion> {
    let mut regions = Vec::new();
    let mut open: Option<TableRegion> = None;

    for (i, line) in page.lines.iter().enumerate() {
        if is_header_row(line) {
            close_region(&mut open, i, &mut regions);
            open = Some(TableRegion {
                header_line: i,
                start_line: i + 1,
                end_line: page.lines.len(),
            });
        } else if line.trim().is_empty() {
            close_region(&mut open, i, &mut regions);
        }
    }

    close_region(&mut open, page.lines.len(), &mut regions);
    regions
}

fn close_region(open: &mut Option<TableRegion>, at: usize, regions: &mut Vec<TableRegion>) {
    if let Some(mut region) = open.take() {
        region.end_line = at;
        if region.end_line > region.start_line {
            regions.push(region);
        }
    }
}

/// Split a line by gaps of 2+ whitespace characters.
pub fn split_by_whitespace_gaps(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = None;
    let mut space_count = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            space_count += 1;
            if space_count == 2 {
                if let Some(s) = start {
                    let end = i - 1; // exclude the first space
                    segments.push(&line[s..end]);
                    start = None;
                }
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            space_count = 0;
        }
    }

    if let Some(s) = start {
        segments.push(&line[s..]);
    }

    segments
}
