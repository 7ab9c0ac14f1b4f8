use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use super::docx::DocxTextExtractor;
use super::normalize::normalize_bytes;
use super::ocr::default_ocr_engine;
use super::pdf::PdfTextExtractor;
use super::spreadsheet::CalamineSpreadsheetExtractor;
use super::types::{
    DocxExtractor, ExtractedText, OcrEngine, PdfExtractor, SpreadsheetExtractor, TextExtractor,
};
use super::ExtractionError;
use crate::config::Config;
use crate::pipeline::import::{display_name, FileKind};

/// Concrete implementation of the text extractor.
/// Uses trait objects for every engine, enabling dependency injection.
pub struct DocumentExtractor {
    pdf_extractor: Box<dyn PdfExtractor + Send + Sync>,
    docx_extractor: Box<dyn DocxExtractor + Send + Sync>,
    spreadsheet_extractor: Box<dyn SpreadsheetExtractor + Send + Sync>,
    ocr_engine: Box<dyn OcrEngine + Send + Sync>,
    ocr_language: String,
}

impl DocumentExtractor {
    pub fn new(
        pdf_extractor: Box<dyn PdfExtractor + Send + Sync>,
        docx_extractor: Box<dyn DocxExtractor + Send + Sync>,
        spreadsheet_extractor: Box<dyn SpreadsheetExtractor + Send + Sync>,
        ocr_engine: Box<dyn OcrEngine + Send + Sync>,
        ocr_language: impl Into<String>,
    ) -> Self {
        Self {
            pdf_extractor,
            docx_extractor,
            spreadsheet_extractor,
            ocr_engine,
            ocr_language: ocr_language.into(),
        }
    }

    /// Production engines: pdf-extract, docx-rs, calamine, Tesseract.
    pub fn with_defaults(config: &Config) -> Self {
        Self::new(
            Box::new(PdfTextExtractor),
            Box::new(DocxTextExtractor),
            Box::new(CalamineSpreadsheetExtractor),
            default_ocr_engine(config),
            config.ocr_language.clone(),
        )
    }

    fn extract_text(&self, path: &Path, kind: FileKind) -> Result<String, ExtractionError> {
        match kind {
            FileKind::Pdf => {
                let bytes = std::fs::read(path)?;
                let pages = self.pdf_extractor.extract_pages(&bytes)?;
                Ok(pages.concat())
            }
            FileKind::Docx => {
                let bytes = std::fs::read(path)?;
                let paragraphs = self.docx_extractor.extract_paragraphs(&bytes)?;
                Ok(paragraphs.join("\n"))
            }
            FileKind::Image => {
                let raw = self.ocr_engine.ocr_image(path, &self.ocr_language)?;
                Ok(normalize_bytes(&raw))
            }
            FileKind::Spreadsheet => {
                let rows = self.spreadsheet_extractor.extract_rows(path)?;
                Ok(rows
                    .iter()
                    .map(|row| row.join("\t"))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
    }
}

impl TextExtractor for DocumentExtractor {
    fn extract(&self, path: &Path, kind: FileKind) -> ExtractedText {
        let name = display_name(path);

        // Parsing libraries can panic on malformed input; keep that inside this boundary.
        let result = catch_unwind(AssertUnwindSafe(|| self.extract_text(path, kind)))
            .unwrap_or_else(|payload| Err(ExtractionError::Panicked(panic_message(payload))));

        match result {
            Ok(text) => {
                tracing::debug!(
                    file = %name,
                    kind = kind.as_str(),
                    text_length = text.len(),
                    "Text extraction complete"
                );
                ExtractedText::ok(kind, text)
            }
            Err(e) => {
                tracing::error!(
                    file = %name,
                    kind = kind.as_str(),
                    error = %e,
                    "Text extraction failed"
                );
                ExtractedText::failed(kind, e.to_string())
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
