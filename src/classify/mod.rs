//! Layout-text classification.
//!
//! Converts whitespace-indented plain text lines into a sequence of typed
//! elements: paragraphs, block quotes, subheadings, and dividers. Indentation
//! is the primary signal — an indented line opens either a block quote or a
//! new paragraph, disambiguated by looking ahead (past blank lines) to the
//! next content line. Blank lines inside an element are tolerated as
//! page-break artifacts, and words hyphenated across fragments are rejoined.

mod lines;

pub use lines::{leading_spaces, normalize_spaces, LineItem, LineScanner};

/// Thresholds for line scanning and classification.
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    /// Minimum leading spaces for a line to count as "indented"
    /// (paragraph start or quote line).
    pub min_indent: usize,

    /// Minimum leading spaces for a centered subheading.
    pub subheading_min_indent: usize,

    /// Minimum trimmed length for a subheading candidate.
    pub subheading_min_len: usize,

    /// Maximum trimmed length for a divider line.
    pub divider_max_len: usize,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            min_indent: 4,
            subheading_min_indent: 10,
            subheading_min_len: 10,
            divider_max_len: 20,
        }
    }
}

/// A classified document element, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Body paragraph.
    Paragraph(String),
    /// Indented block quote.
    Quote(String),
    /// Internal centered heading, kept as text.
    Subheading(String),
    /// Typographic section break.
    Divider,
}

/// Classify scanned line items into elements.
///
/// Pure function over an immutable item slice; a cursor walks the items and
/// each element consumes a contiguous run.
pub fn classify(items: &[LineItem], options: &ClassifyOptions) -> Vec<Element> {
    let mut elements = Vec::new();
    let mut i = 0;

    while i < items.len() {
        match &items[i] {
            LineItem::Blank => i += 1,
            LineItem::Divider => {
                elements.push(Element::Divider);
                i += 1;
            }
            LineItem::Subheading(text) => {
                elements.push(Element::Subheading(text.clone()));
                i += 1;
            }
            LineItem::Content { indent, .. } => {
                if *indent >= options.min_indent && starts_quote(items, i, options.min_indent) {
                    let (text, next) = collect_quote(items, i, options.min_indent);
                    elements.push(Element::Quote(text));
                    i = next;
                } else {
                    // Either an indented paragraph-opening line or flush text
                    // after a divider or quote.
                    let (text, next) = collect_paragraph(items, i, options.min_indent);
                    elements.push(Element::Paragraph(text));
                    i = next;
                }
            }
        }
    }

    elements
}

/// Does the indented line at `idx` open a block quote?
///
/// Look ahead past blanks: if the next content item is also indented, the
/// run is a quote; a lone indented line followed by flush text is a
/// paragraph start. One-item lookahead, no backtracking.
fn starts_quote(items: &[LineItem], idx: usize, min_indent: usize) -> bool {
    let mut j = idx + 1;
    while matches!(items.get(j), Some(LineItem::Blank)) {
        j += 1;
    }
    matches!(items.get(j), Some(LineItem::Content { indent, .. }) if *indent >= min_indent)
}

/// Does the indented line at `idx` open a new paragraph? True only when the
/// next content line (past blanks) is flush; an indented, sentinel, or
/// absent successor leaves it as quote material.
fn opens_paragraph(items: &[LineItem], idx: usize, min_indent: usize) -> bool {
    let mut j = idx + 1;
    while matches!(items.get(j), Some(LineItem::Blank)) {
        j += 1;
    }
    matches!(items.get(j), Some(LineItem::Content { indent, .. }) if *indent < min_indent)
}

/// Collect a block quote starting at `start`. Returns the joined text and
/// the index of the first item past the quote.
fn collect_quote(items: &[LineItem], start: usize, min_indent: usize) -> (String, usize) {
    let mut parts: Vec<&str> = Vec::new();
    let mut i = start;

    while i < items.len() {
        match &items[i] {
            LineItem::Blank => {
                let mut j = i + 1;
                while matches!(items.get(j), Some(LineItem::Blank)) {
                    j += 1;
                }
                match items.get(j) {
                    Some(LineItem::Content { indent, .. }) if *indent >= min_indent => {
                        // An indented line after the blank continues this
                        // quote across a page break unless it verifiably
                        // opens a new indented paragraph (flush successor).
                        if opens_paragraph(items, j, min_indent) {
                            break;
                        }
                        i = j;
                        continue;
                    }
                    Some(LineItem::Content { .. }) => {
                        if parts.last().is_some_and(|p| ends_with_open_hyphen(p)) {
                            i = j;
                            continue;
                        }
                        break;
                    }
                    _ => break,
                }
            }
            LineItem::Divider | LineItem::Subheading(_) => break,
            LineItem::Content { indent, text } => {
                if *indent >= min_indent {
                    parts.push(text);
                    i += 1;
                } else if parts.last().is_some_and(|p| ends_with_open_hyphen(p))
                    && text.chars().next().is_some_and(char::is_lowercase)
                {
                    // Flush continuation of a hyphenated word inside a quote.
                    parts.push(text);
                    i += 1;
                } else {
                    break;
                }
            }
        }
    }

    (join_fragments(&parts), i)
}

/// Collect a paragraph starting at `start`: the opening line plus following
/// flush continuation lines, tolerating page-break blanks.
fn collect_paragraph(items: &[LineItem], start: usize, min_indent: usize) -> (String, usize) {
    let mut parts: Vec<&str> = Vec::new();
    let mut i = start;

    if let Some(LineItem::Content { text, .. }) = items.get(i) {
        parts.push(text);
        i += 1;
    }

    while i < items.len() {
        match &items[i] {
            LineItem::Blank => {
                let mut j = i + 1;
                while matches!(items.get(j), Some(LineItem::Blank)) {
                    j += 1;
                }
                match items.get(j) {
                    Some(LineItem::Content { indent, .. }) if *indent < min_indent => {
                        // Page-break blank; the paragraph continues flush.
                        i = j;
                    }
                    _ => break,
                }
            }
            LineItem::Divider | LineItem::Subheading(_) => break,
            LineItem::Content { indent, text } => {
                if *indent >= min_indent {
                    // Next paragraph or quote begins.
                    break;
                }
                parts.push(text);
                i += 1;
            }
        }
    }

    (join_fragments(&parts), i)
}

/// Does the fragment end in a single hyphen directly after a letter?
/// Double hyphens (em-dash stand-ins) do not count.
fn ends_with_open_hyphen(s: &str) -> bool {
    let mut chars = s.chars().rev();
    matches!(
        (chars.next(), chars.next()),
        (Some('-'), Some(c)) if c.is_alphabetic()
    )
}

/// Join fragments, repairing hyphenated word breaks: a fragment ending in a
/// letter-hyphen followed by a lowercase fragment merges with the hyphen
/// dropped; everything else joins with a single space.
pub fn join_fragments(parts: &[&str]) -> String {
    let mut iter = parts.iter();
    let Some(first) = iter.next() else {
        return String::new();
    };
    let mut result = first.to_string();
    for part in iter {
        if part.is_empty() {
            continue;
        }
        if ends_with_open_hyphen(&result)
            && part.chars().next().is_some_and(char::is_lowercase)
        {
            result.pop();
            result.push_str(part);
        } else {
            result.push(' ');
            result.push_str(part);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(indent: usize, text: &str) -> LineItem {
        LineItem::Content {
            indent,
            text: text.to_string(),
        }
    }

    fn run(items: &[LineItem]) -> Vec<Element> {
        classify(items, &ClassifyOptions::default())
    }

    #[test]
    fn test_indented_blank_indented_is_one_quote() {
        let elements = run(&[
            content(4, "first quoted line"),
            LineItem::Blank,
            content(4, "second quoted line"),
        ]);
        assert_eq!(
            elements,
            vec![Element::Quote(
                "first quoted line second quoted line".to_string()
            )]
        );
    }

    #[test]
    fn test_single_indented_line_starts_paragraph() {
        let elements = run(&[
            content(4, "An indented opening line"),
            content(0, "continues flush"),
            LineItem::Blank,
            content(0, "past a page break."),
        ]);
        assert_eq!(
            elements,
            vec![Element::Paragraph(
                "An indented opening line continues flush past a page break.".to_string()
            )]
        );
    }

    #[test]
    fn test_hyphen_break_repaired() {
        let joined = join_fragments(&["pre-", "fix"]);
        assert_eq!(joined, "prefix");
    }

    #[test]
    fn test_double_hyphen_not_merged() {
        let joined = join_fragments(&["wait--", "what"]);
        assert_eq!(joined, "wait-- what");
    }

    #[test]
    fn test_hyphen_before_capital_not_merged() {
        let joined = join_fragments(&["anti-", "Americanism"]);
        assert_eq!(joined, "anti- Americanism");
    }

    #[test]
    fn test_lone_indented_hyphen_line_opens_paragraph() {
        // The flush successor makes the lookahead say "paragraph", and the
        // hyphenated word is repaired across the join.
        let elements = run(&[
            content(6, "the opening line breaks mid-"),
            content(0, "word and continues flush"),
        ]);
        assert_eq!(
            elements,
            vec![Element::Paragraph(
                "the opening line breaks midword and continues flush".to_string()
            )]
        );
    }

    #[test]
    fn test_quote_hyphen_continuation_stays_in_quote() {
        let elements = run(&[
            content(6, "quote line one"),
            content(6, "ends with a bro-"),
            content(0, "ken word continuing lowercase"),
        ]);
        assert_eq!(
            elements,
            vec![Element::Quote(
                "quote line one ends with a broken word continuing lowercase".to_string()
            )]
        );
    }

    #[test]
    fn test_quote_resumes_after_page_break_before_divider() {
        // The line after the blank has no flush successor, so it stays in
        // the quote even though it is the last content before the divider.
        let elements = run(&[
            content(4, "quoted before the break"),
            LineItem::Blank,
            content(4, "quoted after the break"),
            LineItem::Divider,
        ]);
        assert_eq!(
            elements,
            vec![
                Element::Quote("quoted before the break quoted after the break".to_string()),
                Element::Divider,
            ]
        );
    }

    #[test]
    fn test_quote_stops_at_divider() {
        let elements = run(&[
            content(4, "quoted one"),
            content(4, "quoted two"),
            LineItem::Divider,
            content(0, "new paragraph"),
        ]);
        assert_eq!(
            elements,
            vec![
                Element::Quote("quoted one quoted two".to_string()),
                Element::Divider,
                Element::Paragraph("new paragraph".to_string()),
            ]
        );
    }

    #[test]
    fn test_paragraph_stops_before_new_indented_line() {
        let elements = run(&[
            content(4, "First paragraph opens"),
            content(0, "and continues."),
            LineItem::Blank,
            content(4, "Second paragraph opens"),
            content(0, "and also continues."),
        ]);
        assert_eq!(elements.len(), 2);
        assert_eq!(
            elements[0],
            Element::Paragraph("First paragraph opens and continues.".to_string())
        );
    }

    #[test]
    fn test_quote_then_new_indented_paragraph_after_blank() {
        // Blank, then an indented line whose own successor is flush: that
        // line starts a new paragraph, not a continuation of the quote.
        let elements = run(&[
            content(4, "quote line one"),
            content(4, "quote line two"),
            LineItem::Blank,
            content(4, "A new paragraph opens"),
            content(0, "with flush continuation."),
        ]);
        assert_eq!(elements.len(), 2);
        assert!(matches!(elements[0], Element::Quote(_)));
        assert!(matches!(elements[1], Element::Paragraph(_)));
    }

    #[test]
    fn test_subheading_passes_through() {
        let elements = run(&[
            content(0, "before"),
            LineItem::Subheading("AFTER SEPTEMBER 11".to_string()),
            content(0, "after"),
        ]);
        assert_eq!(elements[1], Element::Subheading("AFTER SEPTEMBER 11".to_string()));
    }

    #[test]
    fn test_empty_input() {
        assert!(run(&[]).is_empty());
        assert_eq!(join_fragments(&[]), "");
    }

    #[test]
    fn test_ends_with_open_hyphen() {
        assert!(ends_with_open_hyphen("exam-"));
        assert!(!ends_with_open_hyphen("exam--"));
        assert!(!ends_with_open_hyphen("-"));
        assert!(!ends_with_open_hyphen("5-"));
        assert!(!ends_with_open_hyphen("plain"));
    }
}
