use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ExtractionError;
use crate::pipeline::import::FileKind;

/// Text pulled out of one source file.
///
/// Extraction never fails outright: a library error leaves `text` empty and
/// records the reason in `failure`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedText {
    pub kind: FileKind,
    pub text: String,
    pub failure: Option<String>,
}

impl ExtractedText {
    pub fn ok(kind: FileKind, text: String) -> Self {
        Self {
            kind,
            text,
            failure: None,
        }
    }

    pub fn failed(kind: FileKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            text: String::new(),
            failure: Some(reason.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// PDF text extraction abstraction. One string per page, in page order.
pub trait PdfExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// OCR engine abstraction (allows mocking for tests).
/// Returns the raw recognised bytes; decoding is left to the caller.
pub trait OcrEngine {
    fn ocr_image(&self, image_path: &Path, lang: &str) -> Result<Vec<u8>, ExtractionError>;
}

/// Word-processor extraction: paragraph texts in document order.
pub trait DocxExtractor {
    fn extract_paragraphs(&self, docx_bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// Workbook extraction: every row of every worksheet, cells rendered as text.
pub trait SpreadsheetExtractor {
    fn extract_rows(&self, path: &Path) -> Result<Vec<Vec<String>>, ExtractionError>;
}

/// Main extraction trait used by the ingestion driver.
pub trait TextExtractor {
    fn extract(&self, path: &Path, kind: FileKind) -> ExtractedText;
}
