//! Ingestion driver.
//!
//! Sweeps one directory and drives each file through
//! dispatch → extract → normalize → metadata → persist.
//! Every file ends in a logged `FileOutcome`; only an unreadable input
//! directory stops the sweep.
//!
//! Uses trait-based DI for the extractor so the driver stays testable
//! with mock implementations.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::config::Config;
use crate::db::repository::DocumentRepository;
use crate::models::{Document, LookupNames};
use crate::pipeline::extraction::normalize::normalize;
use crate::pipeline::extraction::orchestrator::DocumentExtractor;
use crate::pipeline::extraction::types::TextExtractor;
use crate::pipeline::import::{
    compute_content_hash, content_matches_kind, display_name, FileKind, ImportError,
};
use crate::pipeline::metadata::extract_metadata;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that abort a sweep. Per-file problems never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Cannot read input directory {path}: {source}")]
    InputDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why a file was left out of the archive on purpose.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("unsupported format {0}")]
    Unsupported(String),

    #[error("content already stored")]
    Duplicate,
}

/// Why a supported file could not be stored.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    #[error("could not read file: {0}")]
    Read(String),

    #[error("text extraction failed: {0}")]
    Extraction(String),

    #[error("no text extracted")]
    EmptyText,

    #[error("duplicate check failed: {0}")]
    Database(String),

    #[error("insert failed: {0}")]
    Insert(String),
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Terminal state of one file in a sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Inserted {
        file: String,
        id: i64,
        title: String,
    },
    /// Dry run: parsed but not persisted.
    Extracted {
        file: String,
        document: Box<Document>,
    },
    Skipped {
        file: String,
        reason: SkipReason,
    },
    Failed {
        file: String,
        reason: FailureReason,
    },
}

impl FileOutcome {
    pub fn file(&self) -> &str {
        match self {
            Self::Inserted { file, .. }
            | Self::Extracted { file, .. }
            | Self::Skipped { file, .. }
            | Self::Failed { file, .. } => file,
        }
    }
}

/// Everything one sweep did, in directory-enumeration order.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub run_id: Uuid,
    pub directory: PathBuf,
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<FileOutcome>,
}

impl SweepReport {
    pub fn inserted(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Inserted { .. }))
    }

    pub fn extracted(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Extracted { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// Parse files but never insert.
    pub dry_run: bool,
    /// Skip files whose content hash is already stored.
    pub skip_duplicates: bool,
    /// Type lookup name for documents without a title keyword.
    pub default_type: String,
    pub organ: String,
}

impl DriverOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            dry_run: false,
            skip_duplicates: config.skip_duplicates,
            default_type: config.default_type.clone(),
            organ: config.default_organ.clone(),
        }
    }
}

pub struct IngestionDriver {
    extractor: Box<dyn TextExtractor + Send + Sync>,
    repository: DocumentRepository,
    options: DriverOptions,
}

impl IngestionDriver {
    pub fn new(
        extractor: Box<dyn TextExtractor + Send + Sync>,
        repository: DocumentRepository,
        options: DriverOptions,
    ) -> Self {
        Self {
            extractor,
            repository,
            options,
        }
    }

    /// Production driver: default engines, repository at the configured path.
    pub fn with_defaults(config: &Config) -> Self {
        Self::new(
            Box::new(DocumentExtractor::with_defaults(config)),
            DocumentRepository::new(&config.database_path),
            DriverOptions::from_config(config),
        )
    }

    pub fn with_options(mut self, options: DriverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    /// Process every file directly inside `dir`. Sub-directories are ignored.
    pub fn run(&self, dir: &Path) -> Result<SweepReport, ProcessingError> {
        let input_error = |source| ProcessingError::InputDirectory {
            path: dir.display().to_string(),
            source,
        };
        let entries = std::fs::read_dir(dir).map_err(input_error)?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        tracing::info!(
            run_id = %run_id,
            directory = %dir.display(),
            dry_run = self.options.dry_run,
            "Starting ingestion sweep"
        );

        let mut outcomes = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(
                        run_id = %run_id,
                        error = %e,
                        "Skipping unreadable directory entry"
                    );
                    continue;
                }
            };
            let path = entry.path();
            if path.is_dir() {
                tracing::debug!(path = %path.display(), "Ignoring sub-directory");
                continue;
            }
            outcomes.push(self.process_file(&path));
        }

        let report = SweepReport {
            run_id,
            directory: dir.to_path_buf(),
            started_at,
            outcomes,
        };
        tracing::info!(
            run_id = %run_id,
            inserted = report.inserted(),
            extracted = report.extracted(),
            skipped = report.skipped(),
            failed = report.failed(),
            "Ingestion sweep complete"
        );
        Ok(report)
    }

    /// Run one file through the pipeline and log its outcome.
    pub fn process_file(&self, path: &Path) -> FileOutcome {
        let file = display_name(path);
        let outcome = match self.prepare(path, &file) {
            Ok(Prepared::Skip(reason)) => FileOutcome::Skipped { file, reason },
            Ok(Prepared::Ready(document)) => self.persist(file, document),
            Err(reason) => FileOutcome::Failed { file, reason },
        };
        log_outcome(&outcome);
        outcome
    }

    /// Dispatch, dedup check, extract, normalize, parse.
    fn prepare(&self, path: &Path, file: &str) -> Result<Prepared, FailureReason> {
        let kind = match FileKind::from_path(path) {
            Ok(kind) => kind,
            Err(ImportError::UnsupportedFormat(ext)) => {
                return Ok(Prepared::Skip(SkipReason::Unsupported(ext)))
            }
            Err(e) => return Err(FailureReason::Read(e.to_string())),
        };

        let hash = compute_content_hash(path).map_err(|e| FailureReason::Read(e.to_string()))?;

        if self.options.skip_duplicates
            && self
                .repository
                .exists_with_hash(&hash)
                .map_err(|e| FailureReason::Database(e.to_string()))?
        {
            return Ok(Prepared::Skip(SkipReason::Duplicate));
        }

        if let Ok(false) = content_matches_kind(path, kind) {
            tracing::warn!(
                file = %file,
                kind = kind.as_str(),
                "File content does not match its extension"
            );
        }

        let extracted = self.extractor.extract(path, kind);
        if let Some(error) = extracted.failure {
            return Err(FailureReason::Extraction(error));
        }

        let text = normalize(&extracted.text);
        if text.trim().is_empty() {
            return Err(FailureReason::EmptyText);
        }

        let mut document = extract_metadata(&text);
        document.source_file = Some(file.to_string());
        document.content_hash = Some(hash);
        Ok(Prepared::Ready(Box::new(document)))
    }

    fn persist(&self, file: String, document: Box<Document>) -> FileOutcome {
        if self.options.dry_run {
            return FileOutcome::Extracted { file, document };
        }

        let names = self.lookup_names(&document);
        match self.repository.insert(&document, &names) {
            Ok(id) => FileOutcome::Inserted {
                file,
                id,
                title: document.title,
            },
            Err(e) => FileOutcome::Failed {
                file,
                reason: FailureReason::Insert(e.to_string()),
            },
        }
    }

    fn lookup_names(&self, document: &Document) -> LookupNames {
        let type_name = document
            .class
            .map(|class| class.as_str().to_string())
            .unwrap_or_else(|| self.options.default_type.clone());
        LookupNames::new(type_name, self.options.organ.clone())
    }
}

enum Prepared {
    Ready(Box<Document>),
    Skip(SkipReason),
}

fn log_outcome(outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Inserted { file, id, title } => {
            tracing::info!(file = %file, id, title = %title, "Document stored");
        }
        FileOutcome::Extracted { file, document } => {
            tracing::info!(
                file = %file,
                title = %document.title,
                number = %document.number,
                year = document.year,
                "Document parsed (dry run)"
            );
        }
        FileOutcome::Skipped { file, reason } => {
            tracing::warn!(file = %file, reason = %reason, "File skipped");
        }
        FileOutcome::Failed { file, reason } => {
            tracing::error!(file = %file, reason = %reason, "File failed");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
