//! Split the source PDF into one file per section.
//!
//! Pages are carried over as-is — no re-rendering — so the embedded viewers
//! in the study guide show the original typeset pages.

use std::collections::BTreeMap;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::debug;
use lopdf::Document;

use crate::error::{Error, Result};
use crate::locate::PageRange;

/// Write one PDF per section into `out_dir`, named `section-N.pdf`.
///
/// Returns the written paths in section order.
pub fn split_sections(
    pdf: &Path,
    ranges: &BTreeMap<u32, PageRange>,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let source = Document::load(pdf)?;
    let total = source.get_pages().len() as u32;

    let mut written = Vec::with_capacity(ranges.len());
    for (&num, range) in ranges {
        if range.end > total {
            return Err(Error::InvalidPageRange(format!(
                "section {num}: page {} past document end ({total} pages)",
                range.end
            )));
        }

        let out_path = out_dir.join(format!("section-{num}.pdf"));
        write_range(&source, range, &out_path)?;
        debug!(
            "section {num}: pages {}-{} -> {}",
            range.start,
            range.end,
            out_path.display()
        );
        written.push(out_path);
    }

    Ok(written)
}

/// Copy one inclusive page range into a new document at `out_path`.
fn write_range(source: &Document, range: &PageRange, out_path: &Path) -> Result<()> {
    let mut doc = source.clone();

    let delete: Vec<u32> = (1..=source.get_pages().len() as u32)
        .filter(|p| *p < range.start || *p > range.end)
        .collect();
    doc.delete_pages(&delete);
    doc.prune_objects();
    doc.renumber_objects();

    let file = fs::File::create(out_path)?;
    let mut writer = BufWriter::new(file);
    doc.save_to(&mut writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use lopdf::dictionary;

    use super::*;

    #[test]
    fn test_range_past_document_end_is_rejected() {
        // A one-page minimal PDF, enough for lopdf to load.
        let pdf = minimal_pdf();
        let dir = tempfile::tempdir().unwrap();
        let pdf_path = dir.path().join("tiny.pdf");
        fs::write(&pdf_path, pdf).unwrap();

        let mut ranges = BTreeMap::new();
        ranges.insert(1, PageRange { start: 1, end: 9 });

        let err = split_sections(&pdf_path, &ranges, dir.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidPageRange(_)));
    }

    #[test]
    fn test_single_page_round_trip() {
        let pdf = minimal_pdf();
        let dir = tempfile::tempdir().unwrap();
        let pdf_path = dir.path().join("tiny.pdf");
        fs::write(&pdf_path, pdf).unwrap();

        let mut ranges = BTreeMap::new();
        ranges.insert(1, PageRange { start: 1, end: 1 });

        let written = split_sections(&pdf_path, &ranges, dir.path()).unwrap();
        assert_eq!(written.len(), 1);
        let out = Document::load(&written[0]).unwrap();
        assert_eq!(out.get_pages().len(), 1);
    }

    /// Smallest well-formed single-page PDF lopdf will load.
    fn minimal_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(lopdf::Stream::new(
            dictionary! {},
            b"BT ET".to_vec(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(pages_id, lopdf::Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }
}
