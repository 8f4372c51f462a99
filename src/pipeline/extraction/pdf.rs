use std::path::Path;

use super::sanitize::sanitize_document_text;
use super::ExtractionError;

/// Source of raw document text.
///
/// `extract_text` never fails: problems are logged and yield an empty string,
/// which callers treat as "nothing to process".
pub trait TextSource {
    fn try_extract_text(&self, path: &Path) -> Result<String, ExtractionError>;

    fn extract_text(&self, path: &Path) -> String {
        match self.try_extract_text(path) {
            Ok(text) => sanitize_document_text(&text),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Text extraction failed");
                String::new()
            }
        }
    }
}

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers.
pub struct PdfTextSource;

impl PdfTextSource {
    /// Text of each page, in order.
    pub fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))
    }
}

impl TextSource for PdfTextSource {
    fn try_extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(path)?;
        let pages = self.extract_pages(&bytes)?;
        tracing::debug!(pages = pages.len(), "PDF text extracted");

        let mut text = String::new();
        for page in pages {
            text.push_str(&page);
            text.push('\n');
        }
        Ok(text)
    }
}

/// Reads UTF-8 text files as-is.
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn try_extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Pick a text source from the file extension.
pub fn source_for_path(path: &Path) -> Box<dyn TextSource> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        Box::new(PdfTextSource)
    } else {
        Box::new(PlainTextSource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Generate a valid PDF with text using lopdf (the library that pdf-extract uses internally).
    fn make_test_pdf(text: &str) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let resources = dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        });

        if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
            dict.set("Parent", pages_id);
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn extracts_text_from_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.pdf");
        std::fs::write(&path, make_test_pdf("Colonoscopy CPT 45378")).unwrap();

        let text = PdfTextSource.extract_text(&path);
        assert!(
            text.contains("Colonoscopy") || text.contains("45378"),
            "Expected extracted text, got: {text}"
        );
    }

    #[test]
    fn pdf_pages_are_returned_in_order() {
        let pages = PdfTextSource.extract_pages(&make_test_pdf("Page text")).unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn invalid_pdf_returns_error() {
        assert!(matches!(
            PdfTextSource.extract_pages(b"not a pdf"),
            Err(ExtractionError::PdfParsing(_))
        ));
    }

    #[test]
    fn unreadable_pdf_yields_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();
        assert_eq!(PdfTextSource.extract_text(&path), "");
    }

    #[test]
    fn missing_file_yields_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(PlainTextSource.extract_text(&dir.path().join("absent.txt")), "");
        assert!(matches!(
            PlainTextSource.try_extract_text(&dir.path().join("absent.txt")),
            Err(ExtractionError::Io(_))
        ));
    }

    #[test]
    fn plain_text_is_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.txt");
        std::fs::write(&path, "Report 1\r\nDIAGNOSIS: polyp\x00s\r\n").unwrap();
        assert_eq!(PlainTextSource.extract_text(&path), "Report 1\nDIAGNOSIS: polyps");
    }

    #[test]
    fn source_chosen_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("notes.TXT");
        std::fs::write(&txt, "plain body").unwrap();
        assert_eq!(source_for_path(&txt).extract_text(&txt), "plain body");

        // A .PDF extension routes to the PDF reader, which rejects plain text.
        let pdf = dir.path().join("notes.PDF");
        std::fs::write(&pdf, "plain body").unwrap();
        assert_eq!(source_for_path(&pdf).extract_text(&pdf), "");
    }
}
