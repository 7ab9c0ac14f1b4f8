/// Decode raw bytes permissively. Invalid UTF-8 sequences are dropped,
/// never replaced with a marker, and the result is then normalized.
pub fn normalize_bytes(raw: &[u8]) -> String {
    let mut decoded = String::with_capacity(raw.len());
    for chunk in raw.utf8_chunks() {
        decoded.push_str(chunk.valid());
    }
    normalize(&decoded)
}

/// Strip characters that break storage or full-text indexing: NUL, the
/// U+FFFD replacement marker, and control characters other than line
/// breaks and tabs. Total and idempotent.
pub fn normalize(text: &str) -> String {
    text.chars().filter(|c| keep(*c)).collect()
}

fn keep(c: char) -> bool {
    match c {
        '\n' | '\r' | '\t' => true,
        '\u{FFFD}' => false,
        c => !c.is_control(),
    }
}
