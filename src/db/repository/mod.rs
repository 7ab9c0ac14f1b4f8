//! Repository layer: document archive queries.
//!
//! Free functions take a `&Connection` so tests can run against an
//! in-memory database. `DocumentRepository` wraps them for callers that
//! only hold the database path: every call opens its own connection and
//! closes it before returning.

mod aggregates;
mod document;
mod document_search;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use thiserror::Error;

use super::sqlite::{open_connection, open_database};
use super::DatabaseError;
use crate::models::enums::Dimension;
use crate::models::*;

pub use aggregates::*;
pub use document::*;
pub use document_search::*;

/// Maximum number of rows returned by a search.
pub const SEARCH_LIMIT: usize = 50;

#[derive(Error, Debug)]
pub enum InsertError {
    /// NOT NULL / foreign key rejection, usually a type or organ name
    /// that matches no lookup row.
    #[error("Insert rejected by schema constraint: {0}")]
    Rejected(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<rusqlite::Error> for InsertError {
    fn from(e: rusqlite::Error) -> Self {
        if e.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation) {
            InsertError::Rejected(e.to_string())
        } else {
            InsertError::Database(DatabaseError::Sqlite(e))
        }
    }
}

/// Path-holding handle over the archive database.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    db_path: PathBuf,
}

impl DocumentRepository {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Create the database file if needed and apply pending migrations.
    pub fn initialize(&self) -> Result<(), DatabaseError> {
        let conn = open_database(&self.db_path)?;
        drop(conn);
        tracing::debug!(path = %self.db_path.display(), "Database ready");
        Ok(())
    }

    fn connect(&self) -> Result<Connection, DatabaseError> {
        open_connection(&self.db_path)
    }

    /// Insert one document, resolving lookup names to ids. Returns the new row id.
    pub fn insert(&self, doc: &Document, names: &LookupNames) -> Result<i64, InsertError> {
        let conn = self.connect()?;
        insert_document(&conn, doc, names)
    }

    pub fn get(&self, id: i64) -> Result<Option<Document>, DatabaseError> {
        let conn = self.connect()?;
        get_document(&conn, id)
    }

    pub fn list(&self) -> Result<Vec<DocumentListing>, DatabaseError> {
        let conn = self.connect()?;
        list_documents(&conn)
    }

    pub fn count(&self) -> Result<i64, DatabaseError> {
        let conn = self.connect()?;
        count_documents(&conn)
    }

    /// Ranked full-text search, capped at `SEARCH_LIMIT` rows.
    pub fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<SearchHit>, DatabaseError> {
        let conn = self.connect()?;
        search_documents(&conn, query, filters, SEARCH_LIMIT)
    }

    pub fn list_filters(&self) -> Result<FilterOptions, DatabaseError> {
        let conn = self.connect()?;
        list_filter_options(&conn)
    }

    pub fn count_by(&self, dimension: Dimension) -> Result<BTreeMap<String, i64>, DatabaseError> {
        let conn = self.connect()?;
        count_documents_by(&conn, dimension)
    }

    pub fn exists_with_hash(&self, hash: &str) -> Result<bool, DatabaseError> {
        let conn = self.connect()?;
        document_hash_exists(&conn, hash)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample(title: &str, text: &str) -> Document {
        Document {
            title: title.into(),
            number: "123".into(),
            year: 2021,
            publication_date: NaiveDate::from_ymd_opt(2021, 4, 5).unwrap(),
            summary: text.chars().take(300).collect(),
            full_text: text.into(),
            class: None,
            source_file: Some("portaria.pdf".into()),
            content_hash: Some("aGFzaA==".into()),
        }
    }

    #[test]
    fn each_call_uses_a_fresh_connection_on_the_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = DocumentRepository::new(dir.path().join("acervo.db"));
        repo.initialize().unwrap();

        let id = repo
            .insert(
                &sample("Portaria n° 123", "Portaria n° 123 dispõe sobre a lei de acesso"),
                &LookupNames::new("Portaria", "Não informado"),
            )
            .unwrap();

        let stored = repo.get(id).unwrap().unwrap();
        assert_eq!(stored.title, "Portaria n° 123");
        assert_eq!(repo.list().unwrap().len(), 1);
        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.exists_with_hash("aGFzaA==").unwrap());
        assert_eq!(repo.search("acesso", &SearchFilters::default()).unwrap().len(), 1);
        assert_eq!(repo.count_by(Dimension::Year).unwrap().get("2021"), Some(&1));
        assert_eq!(repo.list_filters().unwrap().years, vec![2021]);
    }

    #[test]
    fn unknown_type_name_surfaces_as_rejected_insert() {
        let dir = tempfile::tempdir().unwrap();
        let repo = DocumentRepository::new(dir.path().join("acervo.db"));
        repo.initialize().unwrap();

        let err = repo
            .insert(
                &sample("Lei", "Lei municipal"),
                &LookupNames::new("Tipo Inexistente", "Não informado"),
            )
            .unwrap_err();
        assert!(matches!(err, InsertError::Rejected(_)), "got {err:?}");
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn uninitialised_database_reports_error_instead_of_panicking() {
        let dir = tempfile::tempdir().unwrap();
        let repo = DocumentRepository::new(dir.path().join("missing.db"));
        assert!(repo.list().is_err());
    }
}
