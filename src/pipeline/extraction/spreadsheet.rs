use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use super::types::SpreadsheetExtractor;
use super::ExtractionError;

/// Workbook extractor using calamine. Visits every worksheet in workbook order.
pub struct CalamineSpreadsheetExtractor;

impl SpreadsheetExtractor for CalamineSpreadsheetExtractor {
    fn extract_rows(&self, path: &Path) -> Result<Vec<Vec<String>>, ExtractionError> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| ExtractionError::SpreadsheetParsing(e.to_string()))?;

        let mut rows = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| ExtractionError::SpreadsheetParsing(format!("{name}: {e}")))?;
            rows.extend(range_rows(&range));
        }
        Ok(rows)
    }
}

/// Render each row of a sheet as cell strings. Empty cells become empty strings.
pub fn range_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}
