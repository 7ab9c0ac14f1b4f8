pub mod types;
pub mod normalize;
pub mod pdf;
pub mod docx;
pub mod spreadsheet;
pub mod ocr;
pub mod orchestrator;

pub use types::*;
pub use normalize::*;
pub use pdf::*;
pub use docx::*;
pub use spreadsheet::*;
pub use ocr::*;
pub use orchestrator::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("DOCX parsing failed: {0}")]
    DocxParsing(String),

    #[error("Spreadsheet parsing failed: {0}")]
    SpreadsheetParsing(String),

    #[error("Tesseract data directory not found: {0}")]
    TessdataNotFound(std::path::PathBuf),

    #[error("OCR initialization failed: {0}")]
    OcrInit(String),

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    #[error("Extraction library panicked: {0}")]
    Panicked(String),
}
