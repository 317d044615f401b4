//! Analysis-file slicing and markdown-to-HTML conversion.
//!
//! The commentary shown before and after each embedded section comes from
//! pre-written analysis markdown. The "Backgrounder" subsection becomes the
//! before-reading block and everything from "Summary" on becomes the
//! after-reading block. No parsing beyond heading-substring slicing is done
//! here; the files are trusted prose.

use log::warn;
use pulldown_cmark::{html, Options, Parser};

use crate::config::{AnalysisKind, SectionConfig};

/// The two commentary fragments for one section, still in markdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisParts {
    /// Shown before the embedded pages ("Before You Read").
    pub backgrounder: String,
    /// Shown after them ("After You Read").
    pub after_reading: String,
}

/// Slice the backgrounder and summary out of an analysis file's text.
///
/// For [`AnalysisKind::Main`] files the section's own `## Section N:` block
/// is sliced out first. If either subsection heading is missing, the whole
/// (sliced) text becomes the backgrounder and the after-reading block stays
/// empty — loudly, since a silently empty guide block usually means the
/// analysis file changed shape.
pub fn extract_parts(text: &str, section: &SectionConfig) -> AnalysisParts {
    let scoped = match section.analysis_kind {
        AnalysisKind::Main => {
            let start_tag = format!("## Section {}:", section.num);
            let end_tag = format!("## Section {}:", section.num + 1);
            match slice_between(text, &start_tag, &end_tag) {
                Some(block) => block,
                None => {
                    warn!(
                        "section {}: block {start_tag:?} not found in {}",
                        section.num, section.analysis
                    );
                    return AnalysisParts::default();
                }
            }
        }
        AnalysisKind::Standalone => text.trim(),
    };

    let bg_start = find_heading(scoped, "Backgrounder");
    let summary_start = find_heading(scoped, "Summary");

    match (bg_start, summary_start) {
        (Some(bg), Some(sm)) if bg <= sm => AnalysisParts {
            backgrounder: scoped[bg..sm].trim().to_string(),
            after_reading: scoped[sm..].trim().to_string(),
        },
        _ => {
            warn!(
                "section {}: Backgrounder/Summary headings not found in {}; \
                 using whole file as backgrounder",
                section.num, section.analysis
            );
            AnalysisParts {
                backgrounder: scoped.to_string(),
                after_reading: String::new(),
            }
        }
    }
}

/// Convert markdown to an HTML fragment, tables enabled.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Find a `## Heading` or `### Heading` whose text starts with `name`.
fn find_heading(text: &str, name: &str) -> Option<usize> {
    // Longer prefix first, or "## X" would match inside "### X".
    for prefix in [format!("### {name}"), format!("## {name}")] {
        if let Some(pos) = text.find(&prefix) {
            return Some(pos);
        }
    }
    None
}

fn slice_between<'a>(text: &'a str, start_tag: &str, end_tag: &str) -> Option<&'a str> {
    let start = text.find(start_tag)?;
    let end = text[start..]
        .find(end_tag)
        .map(|rel| start + rel)
        .unwrap_or(text.len());
    Some(text[start..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GuideConfig;

    fn section(num: usize) -> SectionConfig {
        GuideConfig::default().sections[num - 1].clone()
    }

    #[test]
    fn test_standalone_slicing() {
        let text = "# Title\n\nintro\n\n## Backgrounder\n\nWho Locke was.\n\n\
                    ## Summary\n\nWhat the section argued.\n";
        let parts = extract_parts(text, &section(2));
        assert!(parts.backgrounder.starts_with("## Backgrounder"));
        assert!(parts.backgrounder.contains("Who Locke was."));
        assert!(!parts.backgrounder.contains("Summary"));
        assert!(parts.after_reading.starts_with("## Summary"));
    }

    #[test]
    fn test_standalone_accepts_h3_headings() {
        let text = "### Backgrounder\n\nbg\n\n### Summary\n\nsm\n";
        let parts = extract_parts(text, &section(3));
        assert!(parts.backgrounder.contains("bg"));
        assert!(parts.after_reading.contains("sm"));
    }

    #[test]
    fn test_main_file_sliced_to_section_block() {
        let text = "# Pass 1\n\n## Section 1: Introduction\n\n\
                    ### Backgrounder\n\nhuman nature bg\n\n\
                    ### Summary\n\nhuman nature sm\n\n\
                    ## Section 2: Locke\n\n### Backgrounder\n\nwrong one\n";
        let parts = extract_parts(text, &section(1));
        assert!(parts.backgrounder.contains("human nature bg"));
        assert!(!parts.backgrounder.contains("wrong one"));
        assert!(parts.after_reading.contains("human nature sm"));
        assert!(!parts.after_reading.contains("Section 2"));
    }

    #[test]
    fn test_missing_subsections_fall_back_to_whole_text() {
        let text = "just prose, no headings at all";
        let parts = extract_parts(text, &section(4));
        assert_eq!(parts.backgrounder, text);
        assert!(parts.after_reading.is_empty());
    }

    #[test]
    fn test_main_file_missing_section_block_is_empty() {
        let text = "## Section 9: Something Else\n";
        let parts = extract_parts(text, &section(1));
        assert_eq!(parts, AnalysisParts::default());
    }

    #[test]
    fn test_markdown_to_html_basics() {
        let html = markdown_to_html("## Heading\n\nSome **bold** text.");
        assert!(html.contains("<h2>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_markdown_to_html_tables() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }
}
