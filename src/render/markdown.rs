//! Markdown rendering for classified section elements.

use crate::classify::Element;
use crate::config::SectionConfig;

/// Glyph used for typographic section breaks (asterism).
pub const DIVIDER_GLYPH: &str = "\u{2042}";

/// Render elements to markdown, blank line between elements.
pub fn render_elements(elements: &[Element]) -> String {
    let parts: Vec<String> = elements
        .iter()
        .map(|element| match element {
            Element::Paragraph(text) => text.clone(),
            Element::Quote(text) => format!("> {text}"),
            Element::Subheading(text) => text.clone(),
            Element::Divider => DIVIDER_GLYPH.to_string(),
        })
        .collect();
    parts.join("\n\n")
}

/// Render epigraph verse lines as a line-per-line quote block.
pub fn render_epigraph(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| format!("> {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assemble one section's markdown document.
pub fn section_markdown(
    section: &SectionConfig,
    elements: &[Element],
    epigraph: Option<&[String]>,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Section {}: {}\n\n", section.num, section.title));

    if let Some(lines) = epigraph {
        if !lines.is_empty() {
            output.push_str(&render_epigraph(lines));
            output.push_str("\n\n");
        }
    }

    output.push_str(&render_elements(elements));
    output.push('\n');
    output
}
