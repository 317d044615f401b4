//! Section boundary location: marker pages, page ranges, and line spans.
//!
//! The same five marker strings anchor two coordinate systems. Page numbers
//! drive the PDF splitter and the embedded viewers; line offsets into the
//! whole-document layout text drive the classifier.

use std::collections::BTreeMap;

use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::classify::{leading_spaces, normalize_spaces};
use crate::config::GuideConfig;
use crate::error::{Error, Result};
use crate::extract::TextExtractor;

/// Inclusive, 1-indexed page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    /// Number of pages covered.
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Always false for a validated range, present for completeness.
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// First pages found for each marker during the per-page scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerPages {
    /// Section number → first page containing its marker (or, for section 1,
    /// the body probe).
    pub sections: BTreeMap<u32, u32>,
    /// Page where the terminal notes marker appears, if found.
    pub notes: Option<u32>,
    /// Total pages in the document.
    pub total: u32,
}

/// Scan every page of the document for section markers.
///
/// A section whose marker never appears is a hard error: defaulting its
/// range would silently produce a guide with wrong page boundaries.
pub fn find_marker_pages(extractor: &TextExtractor, config: &GuideConfig) -> Result<MarkerPages> {
    find_marker_pages_with(extractor, config, |_, _| {})
}

/// Like [`find_marker_pages`], reporting `(page, total)` after each page for
/// progress display.
pub fn find_marker_pages_with(
    extractor: &TextExtractor,
    config: &GuideConfig,
    mut progress: impl FnMut(u32, u32),
) -> Result<MarkerPages> {
    let total = extractor.page_count()?;
    let notes_re = notes_regex(&config.notes_marker)?;

    let mut sections: BTreeMap<u32, u32> = BTreeMap::new();
    let mut notes = None;

    for page in 1..=total {
        let text = extractor.page_text(page)?;

        if !sections.contains_key(&config.sections[0].num) && text.contains(&config.body_probe) {
            sections.insert(config.sections[0].num, page);
        }

        for section in &config.sections {
            if let Some(marker) = &section.start_marker {
                if !sections.contains_key(&section.num) && text.contains(marker.as_str()) {
                    sections.insert(section.num, page);
                }
            }
        }

        if notes.is_none() && notes_re.is_match(&text) {
            notes = Some(page);
        }

        progress(page, total);
    }

    for section in &config.sections {
        if !sections.contains_key(&section.num) {
            let marker = section
                .start_marker
                .clone()
                .unwrap_or_else(|| config.body_probe.clone());
            return Err(Error::MarkerNotFound {
                section: section.num,
                marker,
            });
        }
    }

    if notes.is_none() {
        warn!(
            "notes marker {:?} not found; final section will extend to page {}",
            config.notes_marker, total
        );
    }

    debug!("marker pages: {sections:?}, notes: {notes:?}");

    Ok(MarkerPages {
        sections,
        notes,
        total,
    })
}

/// Compute inclusive page ranges per section.
///
/// A boundary page — where the next section's heading appears — belongs to
/// both sections, since it usually carries trailing text of the earlier one
/// above the heading. Section 1 starts at page 1 to include the title and
/// epigraph pages; the last section runs through the notes page (the essay's
/// final paragraph sits above the notes heading).
pub fn compute_page_ranges(
    markers: &MarkerPages,
    config: &GuideConfig,
) -> Result<BTreeMap<u32, PageRange>> {
    let nums: Vec<u32> = config.sections.iter().map(|s| s.num).collect();
    let notes_page = markers.notes.unwrap_or(markers.total);

    let mut ranges = BTreeMap::new();
    for (i, &num) in nums.iter().enumerate() {
        let start = if i == 0 { 1 } else { markers.sections[&num] };
        let end = match nums.get(i + 1) {
            Some(next) => markers.sections[next],
            None => notes_page,
        };
        if end < start {
            return Err(Error::InvalidPageRange(format!(
                "section {num}: start page {start} is past end page {end}"
            )));
        }
        ranges.insert(num, PageRange { start, end });
    }
    Ok(ranges)
}

/// `[start, end)` line spans per section within the full layout text.
pub fn section_line_spans(
    all_lines: &[&str],
    config: &GuideConfig,
) -> Result<BTreeMap<u32, (usize, usize)>> {
    let mut starts: BTreeMap<u32, usize> = BTreeMap::new();

    for (i, line) in all_lines.iter().enumerate() {
        let s = line.trim();
        if !starts.contains_key(&config.sections[0].num) && line.contains(&config.body_probe) {
            starts.insert(config.sections[0].num, i);
        }
        for section in &config.sections {
            if let Some(marker) = &section.start_marker {
                if !starts.contains_key(&section.num) && s.contains(marker.as_str()) {
                    starts.insert(section.num, i);
                }
            }
        }
    }

    let notes_line = all_lines
        .iter()
        .position(|line| line.trim() == config.notes_marker);
    if notes_line.is_none() {
        warn!(
            "notes marker {:?} not found in layout text; last section runs to end",
            config.notes_marker
        );
    }

    for section in &config.sections {
        if !starts.contains_key(&section.num) {
            let marker = section
                .start_marker
                .clone()
                .unwrap_or_else(|| config.body_probe.clone());
            return Err(Error::MarkerNotFound {
                section: section.num,
                marker,
            });
        }
    }

    let nums: Vec<u32> = config.sections.iter().map(|s| s.num).collect();
    let mut spans = BTreeMap::new();
    for (i, &num) in nums.iter().enumerate() {
        let start = starts[&num];
        let end = match nums.get(i + 1) {
            Some(next) => starts[next],
            None => notes_line.unwrap_or(all_lines.len()),
        };
        spans.insert(num, (start, end));
    }
    Ok(spans)
}

/// Capture the epigraph poem from the front matter before section 1's body.
///
/// Indented verse lines before the body probe are collected; title and
/// byline lines are skipped, and the attribution line closes the poem.
pub fn capture_epigraph(
    all_lines: &[&str],
    body_start: usize,
    config: &GuideConfig,
) -> Vec<String> {
    let mut poem = Vec::new();

    for line in all_lines.iter().take(body_start) {
        let s = line.trim();
        if s.is_empty() {
            continue;
        }
        // The title page spreads the title with layout padding.
        if normalize_spaces(s).contains(&config.title) {
            continue;
        }
        if config.epigraph_skip.iter().any(|skip| s.contains(skip)) {
            continue;
        }
        if let Some(end) = &config.epigraph_end {
            if s.contains(end.as_str()) {
                poem.push(s.to_string());
                break;
            }
        }
        if leading_spaces(line) >= config.epigraph_min_indent {
            poem.push(s.to_string());
        }
    }

    poem
}

fn notes_regex(marker: &str) -> Result<Regex> {
    Regex::new(&format!(r"(?m)^{}\s*$", regex::escape(marker)))
        .map_err(|e| Error::Config(format!("bad notes marker: {e}")))
}
