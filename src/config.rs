use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Legisdoc";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_DATABASE: &str = "LEGISDOC_DATABASE";
pub const ENV_INPUT_DIR: &str = "LEGISDOC_INPUT_DIR";
pub const ENV_OCR_LANG: &str = "LEGISDOC_OCR_LANG";
pub const ENV_TESSERACT: &str = "LEGISDOC_TESSERACT";
pub const ENV_TESSDATA: &str = "LEGISDOC_TESSDATA";
pub const ENV_DEFAULT_TYPE: &str = "LEGISDOC_DEFAULT_TYPE";
pub const ENV_DEFAULT_ORGAN: &str = "LEGISDOC_DEFAULT_ORGAN";
pub const ENV_SKIP_DUPLICATES: &str = "LEGISDOC_SKIP_DUPLICATES";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot determine home directory; set LEGISDOC_DATABASE")]
    NoHomeDirectory,

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "legisdoc=info,legisdoc_lib=info"
}

/// Get the application data directory (~/Legisdoc/)
pub fn app_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(APP_NAME))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Runtime configuration, loaded once at process start and handed to the
/// repository and the ingestion driver.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Directory swept by `ingest` when no directory is given.
    pub input_dir: PathBuf,
    /// Tesseract language pack used for images.
    pub ocr_language: String,
    /// Tesseract executable (name on PATH or absolute path).
    pub tesseract_binary: PathBuf,
    /// Traineddata directory for in-process OCR (`ocr` feature).
    pub tessdata_dir: Option<PathBuf>,
    /// Document type name used when no title keyword identifies the class.
    pub default_type: String,
    /// Organ name stored for every ingested document.
    pub default_organ: String,
    /// Skip files whose content hash is already stored.
    pub skip_duplicates: bool,
}

impl Config {
    /// Load `.env` (if present) and build the configuration from the
    /// environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
        }
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match lookup(ENV_DATABASE) {
            Some(path) => PathBuf::from(path),
            None => app_data_dir()?.join("legisdoc.db"),
        };

        let skip_duplicates = match lookup(ENV_SKIP_DUPLICATES) {
            Some(value) => parse_bool(ENV_SKIP_DUPLICATES, &value)?,
            None => false,
        };

        Ok(Self {
            database_path,
            input_dir: lookup(ENV_INPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("documentos")),
            ocr_language: lookup(ENV_OCR_LANG).unwrap_or_else(|| "por".into()),
            tesseract_binary: lookup(ENV_TESSERACT)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("tesseract")),
            tessdata_dir: lookup(ENV_TESSDATA).map(PathBuf::from),
            default_type: lookup(ENV_DEFAULT_TYPE).unwrap_or_else(|| "Outros".into()),
            default_organ: lookup(ENV_DEFAULT_ORGAN).unwrap_or_else(|| "Não informado".into()),
            skip_duplicates,
        })
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        }),
    }
}
