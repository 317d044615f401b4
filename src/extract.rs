//! Text extraction via the external `pdftotext` tool (poppler).
//!
//! Two modes are used: whole-document `-layout` extraction, which preserves
//! the leading whitespace the classifier keys on, and plain per-page
//! extraction for locating section markers.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Wraps `pdftotext` invocations against one source PDF.
pub struct TextExtractor {
    pdf: PathBuf,
}

impl TextExtractor {
    /// Create an extractor for the given PDF.
    pub fn new<P: AsRef<Path>>(pdf: P) -> Self {
        Self {
            pdf: pdf.as_ref().to_path_buf(),
        }
    }

    /// The source PDF path.
    pub fn pdf(&self) -> &Path {
        &self.pdf
    }

    /// Extract the whole document with layout preservation.
    ///
    /// Leading whitespace in the output is significant: the classifier uses
    /// it to tell paragraph starts and block quotes apart.
    pub fn layout_text(&self) -> Result<String> {
        let text = self.run(&["-layout", "-enc", "UTF-8"])?;
        if text.trim().is_empty() {
            return Err(Error::EmptyExtraction(self.pdf.clone()));
        }
        Ok(text)
    }

    /// Extract the text of a single page (1-indexed).
    ///
    /// Unlike [`layout_text`](Self::layout_text), an empty page is not an
    /// error; title and image pages legitimately have no text layer.
    pub fn page_text(&self, page: u32) -> Result<String> {
        let page = page.to_string();
        self.run(&["-f", &page, "-l", &page, "-enc", "UTF-8"])
    }

    /// Total page count, read from the PDF structure itself.
    pub fn page_count(&self) -> Result<u32> {
        let doc = lopdf::Document::load(&self.pdf)?;
        Ok(doc.get_pages().len() as u32)
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("pdftotext")
            .args(args)
            .arg(&self.pdf)
            .arg("-")
            .output()
            .map_err(|e| {
                Error::Extract(format!(
                    "failed to spawn pdftotext (is poppler installed?): {e}"
                ))
            })?;

        if !output.status.success() {
            return Err(Error::Extract(format!(
                "pdftotext exited with status {} for {}",
                output.status,
                self.pdf.display()
            )));
        }

        String::from_utf8(output.stdout).map_err(|_| Error::NonUtf8Output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_keeps_path() {
        let extractor = TextExtractor::new("essay.pdf");
        assert_eq!(extractor.pdf(), Path::new("essay.pdf"));
    }

    #[test]
    fn test_missing_pdf_reports_pdf_error() {
        let extractor = TextExtractor::new("/nonexistent/essay.pdf");
        assert!(extractor.page_count().is_err());
    }
}
