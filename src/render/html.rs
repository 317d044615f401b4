//! Study-guide HTML assembly.
//!
//! One self-contained HTML document: sticky section nav, a how-to intro,
//! then for each section a before-reading block, the original pages in an
//! embedded PDF viewer, and an after-reading block. Styling is a fixed
//! stylesheet; relative links point at the split PDFs next to the file.

use std::collections::BTreeMap;

use crate::analysis::{markdown_to_html, AnalysisParts};
use crate::config::GuideConfig;
use crate::error::{Error, Result};
use crate::locate::PageRange;

/// Height of the embedded PDF viewers. Roughly one letter page plus room to
/// scroll.
const EMBED_HEIGHT_PX: u32 = 900;

/// Build the study-guide HTML document.
///
/// `parts` maps section number to its commentary fragments; every configured
/// section must have a range and parts entry.
pub fn build_study_guide(
    config: &GuideConfig,
    ranges: &BTreeMap<u32, PageRange>,
    parts: &BTreeMap<u32, AnalysisParts>,
) -> Result<String> {
    let mut sections_html = String::new();
    for section in &config.sections {
        let range = ranges
            .get(&section.num)
            .ok_or_else(|| Error::Render(format!("no page range for section {}", section.num)))?;
        let analysis = parts
            .get(&section.num)
            .ok_or_else(|| Error::Render(format!("no analysis for section {}", section.num)))?;

        let before = markdown_to_html(&analysis.backgrounder);
        let after = markdown_to_html(&analysis.after_reading);
        let pages = range.len();
        let plural = if pages == 1 { "" } else { "s" };

        sections_html.push_str(&format!(
            r#"
    <section id="section-{num}">
      <h1>Section {num}: {title}</h1>

      <div class="before-reading">
        <h2>Before You Read</h2>
        {before}
      </div>

      <div class="original-text">
        <h2>The Text</h2>
        <p class="pdf-info">Pages {start}&ndash;{end} of the original document ({pages} page{plural})</p>
        <embed src="sections/section-{num}.pdf#toolbar=0&view=FitH" type="application/pdf"
               width="100%" height="{height}px">
      </div>

      <div class="after-reading">
        <h2>After You Read</h2>
        {after}
      </div>
    </section>"#,
            num = section.num,
            title = section.title,
            start = range.start,
            end = range.end,
            height = EMBED_HEIGHT_PX,
        ));
    }

    let nav_html = config
        .sections
        .iter()
        .map(|s| format!(r##"<a href="#section-{0}">{0}. {1}</a>"##, s.num, s.title))
        .collect::<Vec<_>>()
        .join("\n        ");

    let generated = chrono::Local::now().format("%Y-%m-%d");

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} &mdash; Study Guide</title>
  <style>{style}</style>
</head>
<body>
  <header>
    <h1>{title}</h1>
    <div class="subtitle">{subtitle}</div>
  </header>

  <nav>
    {nav_html}
  </nav>

  <div class="intro">
    <h2>How to Use This Guide</h2>
    <p>For each section of the essay, this guide provides three parts in reading order:</p>
    <ol>
      <li><strong>Before You Read</strong> &mdash; Background on the thinkers and concepts you'll encounter. Read this first to orient yourself.</li>
      <li><strong>The Text</strong> &mdash; The essay itself, displayed as the original typeset pages. Read it carefully, noting what's clear and what's confusing.</li>
      <li><strong>After You Read</strong> &mdash; A summary, glossary of key terms, a paraphrase test, and open questions. Use these to check and deepen your understanding.</li>
    </ol>
    <p>Take your time with each section before moving to the next.</p>
  </div>
{sections_html}

  <footer>
    Layered Lenses Deep Reading Framework &mdash; Pass 1: Comprehension &mdash; generated {generated}
  </footer>
</body>
</html>"#,
        title = config.title,
        subtitle = config.subtitle,
        style = STYLE,
    ))
}

const STYLE: &str = r#"
    * { box-sizing: border-box; }

    body {
      font-family: Georgia, 'Times New Roman', serif;
      font-size: 16px;
      line-height: 1.7;
      color: #1a1a1a;
      background: #fafaf8;
      margin: 0;
      padding: 0;
    }

    header {
      background: #2c2c2c;
      color: #f0ede6;
      padding: 2.5rem 2rem;
      text-align: center;
    }

    header h1 {
      font-size: 2rem;
      margin: 0 0 0.3rem 0;
      font-weight: normal;
      letter-spacing: 0.02em;
    }

    header .subtitle {
      font-size: 1rem;
      color: #b8b4a8;
      font-style: italic;
    }

    nav {
      background: #3a3a3a;
      padding: 1rem 2rem;
      text-align: center;
      position: sticky;
      top: 0;
      z-index: 100;
      border-bottom: 1px solid #555;
    }

    nav a {
      color: #d4d0c8;
      text-decoration: none;
      margin: 0 0.8rem;
      font-size: 0.85rem;
      padding: 0.3rem 0;
      border-bottom: 2px solid transparent;
      transition: border-color 0.2s, color 0.2s;
    }

    nav a:hover {
      color: #fff;
      border-bottom-color: #c9a96e;
    }

    .intro {
      max-width: 48rem;
      margin: 2rem auto;
      padding: 0 2rem;
    }

    .intro h2 {
      font-size: 1.3rem;
      color: #333;
      margin-bottom: 0.5rem;
    }

    .intro p, .intro li {
      font-size: 0.95rem;
      color: #444;
    }

    section {
      max-width: 56rem;
      margin: 0 auto 3rem auto;
      padding: 0 2rem;
    }

    section h1 {
      font-size: 1.8rem;
      color: #2c2c2c;
      border-bottom: 2px solid #c9a96e;
      padding-bottom: 0.4rem;
      margin-top: 3rem;
    }

    section h2 {
      font-size: 1.3rem;
      color: #444;
      margin-top: 2rem;
      margin-bottom: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.05em;
      font-weight: normal;
    }

    .before-reading, .after-reading {
      background: #fff;
      border: 1px solid #e0ddd4;
      border-radius: 4px;
      padding: 1.5rem 2rem;
      margin: 1rem 0;
    }

    .before-reading h3, .after-reading h3 {
      font-size: 1.1rem;
      color: #555;
      margin-top: 1.5rem;
      margin-bottom: 0.5rem;
    }

    .before-reading h4, .after-reading h4 {
      font-size: 1rem;
      color: #666;
      margin-top: 1.2rem;
      margin-bottom: 0.4rem;
      font-style: italic;
    }

    .before-reading p, .after-reading p {
      margin-bottom: 0.8rem;
      text-align: justify;
    }

    .before-reading ul, .after-reading ul,
    .before-reading ol, .after-reading ol {
      margin-bottom: 0.8rem;
      padding-left: 1.5rem;
    }

    .before-reading li, .after-reading li {
      margin-bottom: 0.4rem;
    }

    blockquote {
      margin: 1em 0;
      padding: 0.5em 1.2em;
      border-left: 3px solid #c9a96e;
      background: #f9f8f4;
      font-style: italic;
      color: #555;
    }

    .original-text {
      margin: 1.5rem 0;
    }

    .pdf-info {
      font-size: 0.85rem;
      color: #888;
      margin-bottom: 0.5rem;
      font-style: italic;
    }

    embed {
      border: 1px solid #ccc;
      border-radius: 4px;
      background: #fff;
    }

    table {
      border-collapse: collapse;
      width: 100%;
      margin: 1em 0;
      font-size: 0.9rem;
    }

    th, td {
      border: 1px solid #ddd;
      padding: 0.6rem 0.8rem;
      text-align: left;
      vertical-align: top;
    }

    th {
      background: #f5f3ee;
      font-weight: bold;
      color: #444;
    }

    hr {
      border: none;
      border-top: 1px solid #ddd;
      margin: 2rem 0;
    }

    strong { color: #222; }

    code {
      font-family: 'Menlo', 'Courier New', monospace;
      font-size: 0.88em;
      background: #f4f3ef;
      padding: 1px 5px;
      border-radius: 3px;
    }

    footer {
      text-align: center;
      padding: 2rem;
      color: #999;
      font-size: 0.85rem;
      border-top: 1px solid #e0ddd4;
      margin-top: 3rem;
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (GuideConfig, BTreeMap<u32, PageRange>, BTreeMap<u32, AnalysisParts>) {
        let config = GuideConfig::default();
        let mut ranges = BTreeMap::new();
        let mut parts = BTreeMap::new();
        for (i, section) in config.sections.iter().enumerate() {
            let start = (i as u32) * 5 + 1;
            ranges.insert(
                section.num,
                PageRange {
                    start,
                    end: start + 5,
                },
            );
            parts.insert(
                section.num,
                AnalysisParts {
                    backgrounder: format!("## Backgrounder\n\nBefore text {}", section.num),
                    after_reading: format!("## Summary\n\nAfter text {}", section.num),
                },
            );
        }
        (config, ranges, parts)
    }

    #[test]
    fn test_guide_contains_nav_and_all_sections() {
        let (config, ranges, parts) = fixtures();
        let html = build_study_guide(&config, &ranges, &parts).unwrap();
        for section in &config.sections {
            assert!(html.contains(&format!(r##"href="#section-{}""##, section.num)));
            assert!(html.contains(&format!(r#"<section id="section-{}">"#, section.num)));
            assert!(html.contains(&format!("sections/section-{}.pdf", section.num)));
        }
    }

    #[test]
    fn test_guide_renders_fragments_as_html() {
        let (config, ranges, parts) = fixtures();
        let html = build_study_guide(&config, &ranges, &parts).unwrap();
        assert!(html.contains("<h2>Backgrounder</h2>"));
        assert!(html.contains("Before text 3"));
        assert!(html.contains("After text 5"));
    }

    #[test]
    fn test_guide_shows_page_ranges() {
        let (config, ranges, parts) = fixtures();
        let html = build_study_guide(&config, &ranges, &parts).unwrap();
        assert!(html.contains("Pages 1&ndash;6 of the original document (6 pages)"));
    }

    #[test]
    fn test_missing_range_is_an_error() {
        let (config, mut ranges, parts) = fixtures();
        ranges.remove(&3);
        assert!(matches!(
            build_study_guide(&config, &ranges, &parts),
            Err(Error::Render(_))
        ));
    }
}
