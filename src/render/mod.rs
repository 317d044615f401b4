//! Rendering: markdown section files and the study-guide HTML document.

mod html;
mod markdown;

pub use html::build_study_guide;
pub use markdown::{render_elements, render_epigraph, section_markdown, DIVIDER_GLYPH};
