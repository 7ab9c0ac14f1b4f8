//! Read-side commands: ranked search and filter values.

use crate::config::Config;
use crate::models::{FilterOptions, SearchFilters, SearchHit};

/// Ranked full-text search, capped at 50 hits.
pub fn search_documents(
    config: &Config,
    query: &str,
    filters: &SearchFilters,
) -> Result<Vec<SearchHit>, String> {
    let repository = super::open_repository(config)?;
    let hits = repository
        .search(query, filters)
        .map_err(|e| format!("Search failed: {e}"))?;

    tracing::debug!(query, hits = hits.len(), "Search complete");
    Ok(hits)
}

/// Lookup values for building filter controls.
pub fn list_filters(config: &Config) -> Result<FilterOptions, String> {
    let repository = super::open_repository(config)?;
    repository
        .list_filters()
        .map_err(|e| format!("Failed to list filters: {e}"))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::commands::tests::test_config;
    use crate::db::repository::DocumentRepository;
    use crate::models::{Document, LookupNames};

    fn seed(config: &Config, text: &str, year: i32) {
        let repository = DocumentRepository::new(&config.database_path);
        repository.initialize().unwrap();
        let doc = Document {
            title: "Lei".into(),
            number: "0000".into(),
            year,
            publication_date: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
            summary: text.into(),
            full_text: text.into(),
            class: None,
            source_file: None,
            content_hash: None,
        };
        repository
            .insert(&doc, &LookupNames::new("Lei", "Não informado"))
            .unwrap();
    }

    #[test]
    fn search_on_fresh_database_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let hits = search_documents(&config, "lei", &SearchFilters::default()).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn search_applies_year_filter() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        seed(&config, "lei de diretrizes orçamentárias", 2022);
        seed(&config, "lei de diretrizes orçamentárias", 2023);

        let all = search_documents(&config, "diretrizes", &SearchFilters::default()).unwrap();
        assert_eq!(all.len(), 2);

        let filtered = search_documents(
            &config,
            "diretrizes",
            &SearchFilters {
                year: Some(2023),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].year, 2023);
    }

    #[test]
    fn filters_include_seeded_lookups() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        seed(&config, "texto", 2020);

        let options = list_filters(&config).unwrap();
        assert!(options.types.iter().any(|t| t.name == "Instrução Normativa"));
        assert_eq!(options.organs[0].name, "Não informado");
        assert_eq!(options.years, vec![2020]);
    }
}
