//! Document and pipeline configuration.
//!
//! The default configuration describes the one essay this pipeline was
//! written for. Everything the original document dictates — section markers,
//! running-header patterns, the phrase that opens the body text — lives here
//! rather than being scattered through the parsing code, and a different
//! document can be described in a JSON file loaded with
//! [`GuideConfig::from_file`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which shape of analysis file a section's commentary comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    /// A multi-section comprehension file; the section's block must be
    /// sliced out before looking for subsections.
    Main,
    /// A standalone per-section file.
    Standalone,
}

/// One section of the essay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Section number, 1-based.
    pub num: u32,
    /// Display title.
    pub title: String,
    /// Output filename for the cleaned markdown.
    pub filename: String,
    /// Heading text as it appears in extracted page text. `None` for the
    /// first section, which starts at the body probe instead.
    pub start_marker: Option<String>,
    /// Heading of the following section (or the terminal notes marker).
    pub end_marker: String,
    /// Filename of the pre-written analysis markdown.
    pub analysis: String,
    /// How to slice the analysis file.
    pub analysis_kind: AnalysisKind,
}

/// Full pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideConfig {
    /// Source PDF.
    pub pdf: PathBuf,
    /// Directory holding the analysis markdown files.
    pub analyses_dir: PathBuf,
    /// Directory for cleaned per-section markdown output.
    pub sources_dir: PathBuf,
    /// Directory for the HTML guide and split PDFs.
    pub output_dir: PathBuf,
    /// Document title (HTML header).
    pub title: String,
    /// Subtitle line under the title.
    pub subtitle: String,
    /// A phrase from the first body paragraph, used to find where section 1
    /// starts (it has no heading of its own).
    pub body_probe: String,
    /// The marker that ends the essay proper.
    pub notes_marker: String,
    /// Substrings identifying front-matter lines that are not part of the
    /// epigraph (author byline and the like).
    pub epigraph_skip: Vec<String>,
    /// Substring of the epigraph's attribution line, which closes it.
    pub epigraph_end: Option<String>,
    /// Minimum indent for a front-matter line to count as epigraph verse.
    pub epigraph_min_indent: usize,
    /// Regex patterns matching running headers, footers, and page numbers.
    pub artifact_patterns: Vec<String>,
    /// The sections, in reading order.
    pub sections: Vec<SectionConfig>,
}

impl GuideConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: GuideConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the source PDF path.
    pub fn with_pdf(mut self, pdf: impl Into<PathBuf>) -> Self {
        self.pdf = pdf.into();
        self
    }

    /// Override the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// The directory that receives split per-section PDFs.
    pub fn sections_dir(&self) -> PathBuf {
        self.output_dir.join("sections")
    }

    /// Path of the analysis file for a section.
    pub fn analysis_path(&self, section: &SectionConfig) -> PathBuf {
        self.analyses_dir.join(&section.analysis)
    }

    /// The exact top-level headings that duplicate our own markdown titles
    /// and must be dropped from section bodies.
    pub fn main_headings(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter_map(|s| s.start_marker.as_deref())
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(Error::Config("no sections defined".to_string()));
        }
        for window in self.sections.windows(2) {
            if window[1].num != window[0].num + 1 {
                return Err(Error::Config(format!(
                    "section numbers must be consecutive, got {} then {}",
                    window[0].num, window[1].num
                )));
            }
        }
        if self.sections[0].start_marker.is_some() {
            return Err(Error::Config(
                "first section must start at the body probe, not a marker".to_string(),
            ));
        }
        if let Some(bad) = self.sections[1..]
            .iter()
            .find(|s| s.start_marker.is_none())
        {
            return Err(Error::Config(format!(
                "section {} needs a start marker",
                bad.num
            )));
        }
        Ok(())
    }
}

impl Default for GuideConfig {
    fn default() -> Self {
        let section = |num: u32,
                       title: &str,
                       filename: &str,
                       start: Option<&str>,
                       end: &str,
                       analysis: &str,
                       kind: AnalysisKind| SectionConfig {
            num,
            title: title.to_string(),
            filename: filename.to_string(),
            start_marker: start.map(str::to_string),
            end_marker: end.to_string(),
            analysis: analysis.to_string(),
            analysis_kind: kind,
        };

        let locke = "JOHN Locke: THE AMERICAN COMPROMISE";
        let schmitt = "CARL SCHMITT: THE PERSISTENCE OF THE POLITICAL";
        let strauss = "LEO STRAUSS: PROCEED WITH CAUTION";
        let girard = "RENE GIRARD: THE END OF THE CITY OF MAN";

        Self {
            pdf: PathBuf::from("2007-thiel.pdf"),
            analyses_dir: PathBuf::from("analyses/straussian-moment"),
            sources_dir: PathBuf::from("analyses/straussian-moment/source-sections"),
            output_dir: PathBuf::from("output"),
            title: "The Straussian Moment".to_string(),
            subtitle: "Peter Thiel (2007) — Study Guide".to_string(),
            body_probe: "twenty-first century started".to_string(),
            notes_marker: "NOTES".to_string(),
            epigraph_skip: vec![
                "Peter Thiel".to_string(),
                "President, Clarium".to_string(),
            ],
            epigraph_end: Some("Locksley Hall".to_string()),
            epigraph_min_indent: 8,
            artifact_patterns: vec![
                r"^The Straussian Moment\s+\.?\s*\d+$".to_string(),
                r"^\d+\s+Peter Thiel$".to_string(),
                r"^\d{3}$".to_string(),
            ],
            sections: vec![
                section(
                    1,
                    "Introduction / The Question of Human Nature",
                    "section-1-human-nature.md",
                    None,
                    locke,
                    "pass-1-comprehension.md",
                    AnalysisKind::Main,
                ),
                section(
                    2,
                    "John Locke: The American Compromise",
                    "section-2-locke.md",
                    Some(locke),
                    schmitt,
                    "section-2-comprehension.md",
                    AnalysisKind::Standalone,
                ),
                section(
                    3,
                    "Carl Schmitt: The Persistence of the Political",
                    "section-3-schmitt.md",
                    Some(schmitt),
                    strauss,
                    "section-3-comprehension.md",
                    AnalysisKind::Standalone,
                ),
                section(
                    4,
                    "Leo Strauss: Proceed with Caution",
                    "section-4-strauss.md",
                    Some(strauss),
                    girard,
                    "section-4-comprehension.md",
                    AnalysisKind::Standalone,
                ),
                section(
                    5,
                    "Rene Girard: The End of the City of Man",
                    "section-5-girard.md",
                    Some(girard),
                    "NOTES",
                    "section-5-comprehension.md",
                    AnalysisKind::Standalone,
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GuideConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sections.len(), 5);
        assert!(config.sections[0].start_marker.is_none());
        assert_eq!(config.sections[4].end_marker, "NOTES");
    }

    #[test]
    fn test_main_headings_skip_first_section() {
        let config = GuideConfig::default();
        let headings = config.main_headings();
        assert_eq!(headings.len(), 4);
        assert!(headings[0].contains("JOHN Locke"));
    }

    #[test]
    fn test_validate_rejects_gap_in_numbering() {
        let mut config = GuideConfig::default();
        config.sections[2].num = 7;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_missing_marker() {
        let mut config = GuideConfig::default();
        config.sections[3].start_marker = None;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = GuideConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: GuideConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sections.len(), config.sections.len());
        assert_eq!(back.body_probe, config.body_probe);
    }

    #[test]
    fn test_sections_dir_is_under_output() {
        let config = GuideConfig::default().with_output_dir("out");
        assert_eq!(config.sections_dir(), PathBuf::from("out/sections"));
    }
}
