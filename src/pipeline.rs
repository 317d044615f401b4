//! Stage orchestration: the two end-to-end passes.
//!
//! `clean_sources` produces the per-section markdown files from the layout
//! extraction. `build_guide` produces the split PDFs and the HTML study
//! guide. Both recompute everything from the source PDF; re-running simply
//! overwrites the outputs.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use log::{debug, info};

use crate::analysis::{extract_parts, AnalysisParts};
use crate::classify::{classify, ClassifyOptions, LineScanner};
use crate::config::GuideConfig;
use crate::error::Result;
use crate::extract::TextExtractor;
use crate::locate::{
    capture_epigraph, compute_page_ranges, find_marker_pages_with, section_line_spans, MarkerPages,
    PageRange,
};
use crate::render::{build_study_guide, section_markdown};
use crate::split::split_sections;

/// Extract, classify, and write one cleaned markdown file per section.
///
/// Returns the written paths in section order.
pub fn clean_sources(config: &GuideConfig, options: &ClassifyOptions) -> Result<Vec<PathBuf>> {
    let extractor = TextExtractor::new(&config.pdf);
    let layout_text = extractor.layout_text()?;
    let all_lines: Vec<&str> = layout_text.lines().collect();

    let spans = section_line_spans(&all_lines, config)?;
    let scanner = LineScanner::new(
        options.clone(),
        &config.artifact_patterns,
        &config.main_headings(),
    )?;

    let first_num = config.sections[0].num;
    let epigraph = capture_epigraph(&all_lines, spans[&first_num].0, config);

    fs::create_dir_all(&config.sources_dir)?;

    let mut written = Vec::with_capacity(config.sections.len());
    for section in &config.sections {
        let (start, end) = spans[&section.num];
        debug!(
            "section {}: lines {start}-{end} ({})",
            section.num, section.title
        );

        let items = scanner.scan(&all_lines, start, end);
        let elements = classify(&items, options);

        let poem = (section.num == first_num && !epigraph.is_empty()).then_some(&epigraph[..]);
        let markdown = section_markdown(section, &elements, poem);

        let path = config.sources_dir.join(&section.filename);
        fs::write(&path, markdown)?;
        info!("wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Locate section markers and compute page ranges.
///
/// `progress` is called with `(page, total)` after each scanned page.
pub fn locate_ranges(
    config: &GuideConfig,
    progress: impl FnMut(u32, u32),
) -> Result<(MarkerPages, BTreeMap<u32, PageRange>)> {
    let extractor = TextExtractor::new(&config.pdf);
    let markers = find_marker_pages_with(&extractor, config, progress)?;
    let ranges = compute_page_ranges(&markers, config)?;
    Ok((markers, ranges))
}

/// Split the PDF per section and write the HTML study guide.
///
/// Returns the path of the written HTML file.
pub fn build_guide(config: &GuideConfig, progress: impl FnMut(u32, u32)) -> Result<PathBuf> {
    let (_, ranges) = locate_ranges(config, progress)?;

    split_sections(&config.pdf, &ranges, &config.sections_dir())?;

    let mut parts: BTreeMap<u32, AnalysisParts> = BTreeMap::new();
    for section in &config.sections {
        let text = fs::read_to_string(config.analysis_path(section))?;
        parts.insert(section.num, extract_parts(&text, section));
    }

    let html = build_study_guide(config, &ranges, &parts)?;

    fs::create_dir_all(&config.output_dir)?;
    let out_path = config.output_dir.join("study-guide.html");
    fs::write(&out_path, html)?;
    info!("wrote {}", out_path.display());

    Ok(out_path)
}
