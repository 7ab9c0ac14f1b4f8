use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::DocumentClass;

/// Metadata record built from one source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub number: String,
    pub year: i32,
    pub publication_date: NaiveDate,
    pub summary: String,
    pub full_text: String,
    /// Title keyword, when one was found.
    pub class: Option<DocumentClass>,
    /// File name the record was extracted from.
    pub source_file: Option<String>,
    /// Base64 SHA-256 of the source file bytes.
    pub content_hash: Option<String>,
}

/// Row of the document listing, with lookup names joined in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListing {
    pub id: i64,
    pub title: String,
    pub doc_type: Option<String>,
    pub organ: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// A ranked full-text search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub number: String,
    pub year: i32,
    pub publication_date: NaiveDate,
    pub doc_type: String,
    pub organ: String,
    /// Summary with matched terms wrapped in `<mark>` tags.
    pub highlighted_summary: String,
    /// Higher is more relevant.
    pub relevance: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub id: i64,
    pub name: String,
}

/// Values for building filter controls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    pub types: Vec<LookupEntry>,
    pub organs: Vec<LookupEntry>,
    pub years: Vec<i32>,
}
