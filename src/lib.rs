//! # studyguide
//!
//! Turns one typeset PDF essay into study material: cleaned markdown source
//! text split by section, and an HTML study guide that embeds the original
//! pages between pre-written "before/after reading" commentary.
//!
//! Text comes out of the PDF via `pdftotext -layout`, whose preserved
//! indentation lets a heuristic classifier tell paragraphs, block quotes,
//! subheadings, and dividers apart. Section boundaries are found by scanning
//! for the document's own heading strings; the same markers drive both the
//! line spans fed to the classifier and the page ranges used to split the
//! PDF for embedding.
//!
//! ## Quick Start
//!
//! ```no_run
//! use studyguide::{ClassifyOptions, GuideConfig};
//!
//! fn main() -> studyguide::Result<()> {
//!     let config = GuideConfig::default().with_pdf("2007-thiel.pdf");
//!
//!     // Cleaned markdown, one file per section
//!     studyguide::clean_sources(&config, &ClassifyOptions::default())?;
//!
//!     // Split PDFs + HTML study guide
//!     let guide = studyguide::build_guide(&config, |_, _| {})?;
//!     println!("open {}", guide.display());
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod locate;
pub mod pipeline;
pub mod render;
pub mod split;

// Re-export commonly used types
pub use analysis::{extract_parts, markdown_to_html, AnalysisParts};
pub use classify::{classify, ClassifyOptions, Element, LineItem, LineScanner};
pub use config::{AnalysisKind, GuideConfig, SectionConfig};
pub use error::{Error, Result};
pub use extract::TextExtractor;
pub use locate::{
    capture_epigraph, compute_page_ranges, find_marker_pages, section_line_spans, MarkerPages,
    PageRange,
};
pub use pipeline::{build_guide, clean_sources, locate_ranges};
pub use render::{build_study_guide, render_elements, section_markdown, DIVIDER_GLYPH};
pub use split::split_sections;
