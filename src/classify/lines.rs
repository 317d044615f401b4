//! Line scanning: raw layout text into filtered, typed line items.
//!
//! `pdftotext -layout` output keeps the page's leading whitespace, which is
//! the only structural signal this document offers. The scanner strips page
//! furniture, folds blank runs, recognizes dividers and subheadings, and
//! leaves everything else as `(indent, text)` content items for the
//! classifier.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

use super::ClassifyOptions;

/// One scanned line, after filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItem {
    /// One or more blank lines (never emitted consecutively).
    Blank,
    /// A typographic section break (asterisk run).
    Divider,
    /// An internal centered ALL-CAPS heading, kept in the text.
    Subheading(String),
    /// A body line with its leading-space count and normalized text.
    Content { indent: usize, text: String },
}

impl LineItem {
    /// Indent of a content item, if this is one.
    pub fn indent(&self) -> Option<usize> {
        match self {
            LineItem::Content { indent, .. } => Some(*indent),
            _ => None,
        }
    }

    /// True for divider and subheading sentinels.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, LineItem::Divider | LineItem::Subheading(_))
    }
}

/// Count leading spaces; blank lines count as zero.
pub fn leading_spaces(line: &str) -> usize {
    if line.trim().is_empty() {
        return 0;
    }
    line.len() - line.trim_start_matches(' ').len()
}

/// Collapse runs of 2+ interior spaces left by column layout.
pub fn normalize_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = false;
    for c in text.chars() {
        if c == ' ' {
            if !last_was_space {
                out.push(c);
            }
            last_was_space = true;
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
    out
}

/// Scans raw lines into [`LineItem`]s.
pub struct LineScanner {
    options: ClassifyOptions,
    artifact_patterns: Vec<Regex>,
    main_headings: Vec<String>,
    divider_charset: Regex,
}

impl LineScanner {
    /// Create a scanner.
    ///
    /// `artifact_patterns` match running headers, footers, and bare page
    /// numbers (against the trimmed line). `main_headings` are the top-level
    /// section headings that duplicate the markdown titles and are dropped.
    pub fn new(
        options: ClassifyOptions,
        artifact_patterns: &[String],
        main_headings: &[&str],
    ) -> Result<Self> {
        let artifact_patterns = artifact_patterns
            .iter()
            .map(|p| Regex::new(p).map_err(|e| Error::Config(format!("bad artifact pattern: {e}"))))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            options,
            artifact_patterns,
            main_headings: main_headings.iter().map(|s| s.to_string()).collect(),
            // The extractor renders the ornamental break as a mix of
            // asterisks and misread glyphs (k, O, x, ×, dots).
            divider_charset: Regex::new(r"^[\s*kKOox.×]+$").unwrap(),
        })
    }

    /// Scan the `[start, end)` slice of `all_lines` into filtered items.
    ///
    /// Leading and trailing blanks are stripped, and blank runs are folded
    /// into a single [`LineItem::Blank`].
    pub fn scan(&self, all_lines: &[&str], start: usize, end: usize) -> Vec<LineItem> {
        let mut items: Vec<LineItem> = Vec::new();
        // The opening paragraph sits to the right of a large decorative
        // first letter, so its lines carry spurious indentation. Treat them
        // as unindented until the first genuinely flush line.
        let mut in_drop_cap = true;

        for line in &all_lines[start.min(all_lines.len())..end.min(all_lines.len())] {
            if self.is_page_artifact(line) {
                continue;
            }
            if self.is_main_heading(line) {
                continue;
            }
            if line.trim().is_empty() {
                if !matches!(items.last(), None | Some(LineItem::Blank)) {
                    items.push(LineItem::Blank);
                }
                continue;
            }
            if self.is_divider(line) {
                items.push(LineItem::Divider);
                in_drop_cap = false;
                continue;
            }
            if self.is_subheading(line) {
                items.push(LineItem::Subheading(line.trim().to_string()));
                in_drop_cap = false;
                continue;
            }

            let mut indent = leading_spaces(line);
            let mut text: String = normalize_spaces(line.trim()).nfc().collect();

            if in_drop_cap {
                if indent >= self.options.min_indent {
                    indent = 0;
                } else {
                    in_drop_cap = false;
                }
            }

            // The decorative capital itself is often lost in extraction,
            // leaving "he " where the text reads "The ".
            if in_drop_cap && items.is_empty() {
                if let Some(rest) = text.strip_prefix("he ") {
                    text = format!("The {rest}");
                } else if let Some(rest) = text.strip_prefix("he\u{a0}") {
                    text = format!("The\u{a0}{rest}");
                }
            }

            items.push(LineItem::Content { indent, text });
        }

        while matches!(items.first(), Some(LineItem::Blank)) {
            items.remove(0);
        }
        while matches!(items.last(), Some(LineItem::Blank)) {
            items.pop();
        }

        items
    }

    fn is_page_artifact(&self, line: &str) -> bool {
        let s = line.trim();
        if s.is_empty() {
            return false;
        }
        self.artifact_patterns.iter().any(|re| re.is_match(s))
    }

    fn is_main_heading(&self, line: &str) -> bool {
        let s = line.trim();
        if s.is_empty() {
            return false;
        }
        self.main_headings.iter().any(|h| s.contains(h.as_str()))
    }

    fn is_divider(&self, line: &str) -> bool {
        let s = line.trim();
        !s.is_empty()
            && s.len() <= self.options.divider_max_len
            && s.contains('*')
            && self.divider_charset.is_match(s)
    }

    fn is_subheading(&self, line: &str) -> bool {
        let s = line.trim();
        if s.len() < self.options.subheading_min_len {
            return false;
        }
        if leading_spaces(line) < self.options.subheading_min_indent {
            return false;
        }
        // Mostly uppercase, and not the notes marker (which ends the essay).
        let letters = s.replace(' ', "");
        if letters.is_empty() || s == "NOTES" {
            return false;
        }
        let upper = s.chars().filter(|c| c.is_uppercase()).count();
        upper * 2 > letters.chars().count()
    }
}
