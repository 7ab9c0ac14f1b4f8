use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use super::types::DocxExtractor;
use super::ExtractionError;

/// Word-processor extractor using docx-rs.
/// Reads top-level body paragraphs only; tables and headers are not visited.
pub struct DocxTextExtractor;

impl DocxExtractor for DocxTextExtractor {
    fn extract_paragraphs(&self, docx_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        let docx = docx_rs::read_docx(docx_bytes)
            .map_err(|e| ExtractionError::DocxParsing(e.to_string()))?;

        let paragraphs = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(paragraph_text(&para.children)),
                _ => None,
            })
            .collect();

        Ok(paragraphs)
    }
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    children
        .iter()
        .filter_map(|pc| match pc {
            ParagraphChild::Run(run) => Some(
                run.children
                    .iter()
                    .filter_map(|rc| match rc {
                        RunChild::Text(t) => Some(t.text.as_str()),
                        _ => None,
                    })
                    .collect::<String>(),
            ),
            _ => None,
        })
        .collect()
}

/// Build a DOCX package in memory with docx-rs's own writer.
#[cfg(test)]
pub(crate) fn make_test_docx(paragraphs: &[&str]) -> Vec<u8> {
    use docx_rs::{Docx, Paragraph, Run};

    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
    });

    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_in_document_order() {
        let bytes = make_test_docx(&[
            "Resolução nº 12 de 01/02/2022",
            "Dispõe sobre o regimento.",
        ]);
        let paragraphs = DocxTextExtractor.extract_paragraphs(&bytes).unwrap();
        assert_eq!(
            paragraphs,
            vec!["Resolução nº 12 de 01/02/2022", "Dispõe sobre o regimento."]
        );
    }

    #[test]
    fn runs_in_a_paragraph_are_joined() {
        use docx_rs::{Docx, Paragraph, Run};

        let docx = Docx::new().add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Instrução"))
                .add_run(Run::new().add_text("Normativa")),
        );
        let mut cursor = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();

        let paragraphs = DocxTextExtractor.extract_paragraphs(&cursor.into_inner()).unwrap();
        assert_eq!(paragraphs, vec!["InstruçãoNormativa"]);
    }

    #[test]
    fn garbage_bytes_return_error() {
        let result = DocxTextExtractor.extract_paragraphs(b"PK\x03\x04 broken");
        assert!(matches!(result, Err(ExtractionError::DocxParsing(_))));
    }
}
