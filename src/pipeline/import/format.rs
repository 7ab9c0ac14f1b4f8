use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ImportError;

/// File kinds the extractor can read, chosen by extension.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    Image,
    Spreadsheet,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Image => "image",
            Self::Spreadsheet => "spreadsheet",
        }
    }

    /// Dispatch on the file extension, case-insensitive.
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "jpg" | "jpeg" | "png" => Ok(Self::Image),
            "xlsx" => Ok(Self::Spreadsheet),
            _ => Err(ImportError::UnsupportedFormat(if ext.is_empty() {
                "(no extension)".into()
            } else {
                format!(".{ext}")
            })),
        }
    }

    fn accepts(&self, signature: Signature) -> bool {
        matches!(
            (self, signature),
            (Self::Pdf, Signature::Pdf)
                | (Self::Docx, Signature::Zip)
                | (Self::Spreadsheet, Signature::Zip)
                | (Self::Image, Signature::Jpeg)
                | (Self::Image, Signature::Png)
        )
    }
}

/// Container signature read from the first bytes of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    Pdf,
    /// OOXML packages (docx, xlsx) are zip archives.
    Zip,
    Jpeg,
    Png,
    Unknown,
}

/// Detect the container signature from magic bytes.
pub fn sniff_signature(path: &Path) -> Result<Signature, ImportError> {
    let mut file = std::fs::File::open(path)?;
    let mut header = [0u8; 8];
    let bytes_read = file.read(&mut header)?;

    let signature = match &header[..bytes_read] {
        // PDF: starts with %PDF
        [0x25, 0x50, 0x44, 0x46, ..] => Signature::Pdf,
        // Zip local file header: PK\x03\x04
        [0x50, 0x4B, 0x03, 0x04, ..] => Signature::Zip,
        [0xFF, 0xD8, 0xFF, ..] => Signature::Jpeg,
        [0x89, 0x50, 0x4E, 0x47, ..] => Signature::Png,
        _ => Signature::Unknown,
    };
    Ok(signature)
}

/// Whether the file's content matches what its extension promises.
/// Dispatch still follows the extension; a mismatch is only worth a warning.
pub fn content_matches_kind(path: &Path, kind: FileKind) -> Result<bool, ImportError> {
    Ok(kind.accepts(sniff_signature(path)?))
}

/// Bare file name for logs and the `arquivo_origem` column.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn dispatch_by_extension() {
        assert_eq!(FileKind::from_path(Path::new("a/lei.pdf")).unwrap(), FileKind::Pdf);
        assert_eq!(FileKind::from_path(Path::new("ata.docx")).unwrap(), FileKind::Docx);
        assert_eq!(FileKind::from_path(Path::new("foto.jpg")).unwrap(), FileKind::Image);
        assert_eq!(FileKind::from_path(Path::new("foto.jpeg")).unwrap(), FileKind::Image);
        assert_eq!(FileKind::from_path(Path::new("scan.png")).unwrap(), FileKind::Image);
        assert_eq!(FileKind::from_path(Path::new("plan.xlsx")).unwrap(), FileKind::Spreadsheet);
    }

    #[test]
    fn extension_match_ignores_case() {
        assert_eq!(FileKind::from_path(Path::new("DECRETO.PDF")).unwrap(), FileKind::Pdf);
        assert_eq!(FileKind::from_path(Path::new("Foto.JpG")).unwrap(), FileKind::Image);
    }

    #[test]
    fn unknown_extensions_are_unsupported() {
        for name in ["notas.txt", "antigo.doc", "planilha.xls", "README"] {
            let err = FileKind::from_path(&PathBuf::from(name)).unwrap_err();
            assert!(matches!(err, ImportError::UnsupportedFormat(_)), "{name}");
        }
        let err = FileKind::from_path(Path::new("README")).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file format: (no extension)");
    }

    #[test]
    fn sniff_known_signatures() {
        let dir = tempfile::tempdir().unwrap();
        let cases: [(&str, &[u8], Signature); 5] = [
            ("a.pdf", b"%PDF-1.4\n", Signature::Pdf),
            ("b.docx", &[0x50, 0x4B, 0x03, 0x04, 0x14, 0x00], Signature::Zip),
            ("c.jpg", &[0xFF, 0xD8, 0xFF, 0xE0, 0x00], Signature::Jpeg),
            ("d.png", &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A], Signature::Png),
            ("e.pdf", b"not a pdf", Signature::Unknown),
        ];
        for (name, bytes, expected) in cases {
            let path = dir.path().join(name);
            std::fs::write(&path, bytes).unwrap();
            assert_eq!(sniff_signature(&path).unwrap(), expected, "{name}");
        }
    }

    #[test]
    fn mismatched_content_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        // JPEG content with .pdf extension
        let path = dir.path().join("misleading.pdf");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0x00]).unwrap();
        assert!(!content_matches_kind(&path, FileKind::Pdf).unwrap());
        assert!(content_matches_kind(&path, FileKind::Image).unwrap());
    }

    #[test]
    fn empty_file_has_unknown_signature() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vazio.xlsx");
        std::fs::write(&path, b"").unwrap();
        assert_eq!(sniff_signature(&path).unwrap(), Signature::Unknown);
    }

    #[test]
    fn display_name_strips_directories() {
        assert_eq!(display_name(Path::new("/srv/docs/portaria.pdf")), "portaria.pdf");
    }
}
