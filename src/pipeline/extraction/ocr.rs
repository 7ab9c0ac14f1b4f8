use std::path::{Path, PathBuf};
use std::process::Command;

use super::types::OcrEngine;
use super::ExtractionError;
use crate::config::Config;

/// OCR engine for production use: in-process Tesseract, falling back to
/// the `tesseract` executable when libtesseract cannot be initialised.
#[cfg(feature = "ocr")]
pub fn default_ocr_engine(config: &Config) -> Box<dyn OcrEngine + Send + Sync> {
    match BundledTesseract::new(config.tessdata_dir.as_deref()) {
        Ok(engine) => Box::new(engine),
        Err(e) => {
            tracing::warn!(
                error = %e,
                binary = %config.tesseract_binary.display(),
                "Bundled Tesseract unavailable, falling back to the tesseract executable"
            );
            Box::new(TesseractCli::new(config.tesseract_binary.clone()))
        }
    }
}

/// OCR engine for production use: the `tesseract` executable.
#[cfg(not(feature = "ocr"))]
pub fn default_ocr_engine(config: &Config) -> Box<dyn OcrEngine + Send + Sync> {
    Box::new(TesseractCli::new(config.tesseract_binary.clone()))
}

/// In-process Tesseract through libtesseract.
/// Only available when compiled with the `ocr` feature flag.
#[cfg(feature = "ocr")]
pub struct BundledTesseract {
    /// `None` lets libtesseract use its compiled-in data path.
    tessdata_dir: Option<PathBuf>,
}

#[cfg(feature = "ocr")]
impl BundledTesseract {
    pub fn new(tessdata_dir: Option<&Path>) -> Result<Self, ExtractionError> {
        if let Some(dir) = tessdata_dir {
            if !dir.is_dir() {
                return Err(ExtractionError::TessdataNotFound(dir.to_path_buf()));
            }
        }
        Ok(Self {
            tessdata_dir: tessdata_dir.map(Path::to_path_buf),
        })
    }
}

#[cfg(feature = "ocr")]
impl OcrEngine for BundledTesseract {
    fn ocr_image(&self, image_path: &Path, lang: &str) -> Result<Vec<u8>, ExtractionError> {
        let image_bytes = std::fs::read(image_path)?;

        let datapath = match &self.tessdata_dir {
            Some(dir) => Some(
                dir.to_str()
                    .ok_or_else(|| ExtractionError::OcrInit("Invalid tessdata path".into()))?,
            ),
            None => None,
        };

        let tess = tesseract::Tesseract::new(datapath, Some(lang))
            .map_err(|e| ExtractionError::OcrInit(format!("{e:?}")))?;

        let mut tess = tess
            .set_image_from_mem(&image_bytes)
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        let text = tess
            .get_text()
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        tracing::debug!(
            image = %image_path.display(),
            lang,
            bytes = text.len(),
            "OCR complete"
        );
        Ok(text.into_bytes())
    }
}

/// Tesseract OCR through the system `tesseract` executable.
/// Runs `tesseract <image> stdout -l <lang>` and returns the raw stdout bytes.
pub struct TesseractCli {
    binary: PathBuf,
}

impl TesseractCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl OcrEngine for TesseractCli {
    fn ocr_image(&self, image_path: &Path, lang: &str) -> Result<Vec<u8>, ExtractionError> {
        let output = Command::new(&self.binary)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", lang])
            .output()
            .map_err(|e| {
                ExtractionError::OcrProcessing(format!(
                    "could not run {}: {e}",
                    self.binary.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::OcrProcessing(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        tracing::debug!(
            image = %image_path.display(),
            lang,
            bytes = output.stdout.len(),
            "OCR complete"
        );
        Ok(output.stdout)
    }
}

/// Mock OCR engine for unit testing without Tesseract.
#[cfg(test)]
pub struct MockOcrEngine {
    pub output: Vec<u8>,
    pub fail: bool,
}

#[cfg(test)]
impl MockOcrEngine {
    pub fn new(text: &str) -> Self {
        Self::with_bytes(text.as_bytes().to_vec())
    }

    pub fn with_bytes(output: Vec<u8>) -> Self {
        Self {
            output,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            output: Vec::new(),
            fail: true,
        }
    }
}

#[cfg(test)]
impl OcrEngine for MockOcrEngine {
    fn ocr_image(&self, _image_path: &Path, _lang: &str) -> Result<Vec<u8>, ExtractionError> {
        if self.fail {
            return Err(ExtractionError::OcrProcessing("mock failure".into()));
        }
        Ok(self.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_ocr_returns_configured_bytes() {
        let engine = MockOcrEngine::new("Decreto nº 9 de 02/03/2019");
        let bytes = engine.ocr_image(Path::new("scan.png"), "por").unwrap();
        assert_eq!(bytes, "Decreto nº 9 de 02/03/2019".as_bytes());
    }

    #[test]
    fn missing_binary_is_processing_error() {
        let engine = TesseractCli::new("/nonexistent/bin/tesseract-legisdoc");
        let result = engine.ocr_image(Path::new("scan.png"), "por");
        match result {
            Err(ExtractionError::OcrProcessing(msg)) => {
                assert!(msg.contains("could not run"), "got: {msg}");
            }
            other => panic!("expected OcrProcessing, got {other:?}"),
        }
    }

    fn config_with(pairs: &'static [(&'static str, &'static str)]) -> Config {
        Config::from_lookup(|var| {
            pairs
                .iter()
                .find(|(k, _)| *k == var)
                .map(|(_, v)| v.to_string())
        })
        .unwrap()
    }

    #[cfg(not(feature = "ocr"))]
    #[test]
    fn default_engine_runs_configured_executable() {
        let config = config_with(&[
            (crate::config::ENV_DATABASE, "/tmp/legisdoc-test.db"),
            (crate::config::ENV_TESSERACT, "/nonexistent/bin/tesseract-legisdoc"),
        ]);
        let engine = default_ocr_engine(&config);
        let err = engine.ocr_image(Path::new("scan.png"), "por").unwrap_err();
        assert!(err.to_string().contains("tesseract-legisdoc"), "got: {err}");
    }

    #[cfg(feature = "ocr")]
    #[test]
    fn bundled_tesseract_rejects_missing_tessdata() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("tessdata");
        let result = BundledTesseract::new(Some(missing.as_path()));
        assert!(matches!(result, Err(ExtractionError::TessdataNotFound(p)) if p == missing));
    }

    #[cfg(feature = "ocr")]
    #[test]
    fn bundled_tesseract_reports_unreadable_image() {
        let engine = BundledTesseract::new(None).unwrap();
        let result = engine.ocr_image(Path::new("/nonexistent/scan.png"), "por");
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }

    #[cfg(feature = "ocr")]
    #[test]
    fn missing_tessdata_falls_back_to_executable() {
        let config = config_with(&[
            (crate::config::ENV_DATABASE, "/tmp/legisdoc-test.db"),
            (crate::config::ENV_TESSDATA, "/nonexistent/tessdata"),
            (crate::config::ENV_TESSERACT, "/nonexistent/bin/tesseract-legisdoc"),
        ]);
        let engine = default_ocr_engine(&config);
        let err = engine.ocr_image(Path::new("scan.png"), "por").unwrap_err();
        assert!(err.to_string().contains("tesseract-legisdoc"), "got: {err}");
    }

    #[test]
    fn default_binary_is_found_on_path() {
        assert_eq!(TesseractCli::default().binary(), Path::new("tesseract"));
    }
}
