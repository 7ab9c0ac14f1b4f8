//! Regex metadata extraction.
//!
//! Every field is parsed independently from the whole text, first match
//! wins, and each falls back to a fixed default. `extract_metadata` is
//! total: any input produces a complete `Document`.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::enums::DocumentClass;
use crate::models::Document;

pub const DEFAULT_TITLE: &str = "Documento sem título";
pub const DEFAULT_NUMBER: &str = "0000";
pub const DEFAULT_YEAR: i32 = 2025;
pub const SUMMARY_CHARS: usize = 300;

// Singular and plural keyword forms; a keyword embedded in a longer word
// ("Leilão") does not open a title.
static RE_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(Portarias?|Decretos?|Leis?|Instruç(?:ão|ões) Normativas?|",
        r"Resoluç(?:ão|ões)|Manua(?:l|is))\b[^\n]{0,100}",
    ))
    .unwrap()
});
// ASCII digits only.
static RE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"n[ºo°]?\s*([0-9]{3,6})").unwrap());
static RE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(20[0-9]{2}|19[0-9]{2})\b").unwrap());
static RE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{2})/([0-9]{2})/([0-9]{4})\b").unwrap());
static RE_LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\r\n]+").unwrap());

pub fn default_publication_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(DEFAULT_YEAR, 1, 1).unwrap_or_default()
}

/// Build a document record from normalized text.
pub fn extract_metadata(text: &str) -> Document {
    let (title, class) = match RE_TITLE.captures(text) {
        Some(caps) => (
            caps[0].trim_end().to_string(),
            keyword_class(&caps[1]),
        ),
        None => (DEFAULT_TITLE.to_string(), None),
    };

    let number = RE_NUMBER
        .captures(text)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| DEFAULT_NUMBER.to_string());

    let year = RE_YEAR
        .captures(text)
        .and_then(|caps| caps[1].parse::<i32>().ok())
        .unwrap_or(DEFAULT_YEAR);

    let publication_date = RE_DATE
        .captures(text)
        .and_then(|caps| {
            let day = caps[1].parse::<u32>().ok()?;
            let month = caps[2].parse::<u32>().ok()?;
            let year = caps[3].parse::<i32>().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        })
        .unwrap_or_else(default_publication_date);

    Document {
        title,
        number,
        year,
        publication_date,
        summary: summarize(text),
        full_text: text.to_string(),
        class,
        source_file: None,
        content_hash: None,
    }
}

/// Class for a matched title keyword, singular or plural.
fn keyword_class(keyword: &str) -> Option<DocumentClass> {
    let class = match keyword {
        k if k.starts_with("Portaria") => DocumentClass::Portaria,
        k if k.starts_with("Decreto") => DocumentClass::Decreto,
        k if k.starts_with("Lei") => DocumentClass::Lei,
        k if k.starts_with("Instru") => DocumentClass::InstrucaoNormativa,
        k if k.starts_with("Resolu") => DocumentClass::Resolucao,
        k if k.starts_with("Manua") => DocumentClass::Manual,
        _ => return None,
    };
    Some(class)
}

/// Leading characters of the text, trimmed, with line breaks flattened.
pub fn summarize(text: &str) -> String {
    let head: String = text.chars().take(SUMMARY_CHARS).collect();
    RE_LINE_BREAKS.replace_all(head.trim(), " ").into_owned()
}
