//! Archive reports: aggregate counts and the document listing.

use std::collections::BTreeMap;

use crate::config::Config;
use crate::models::enums::Dimension;
use crate::models::DocumentListing;

/// Counts keyed by dimension name, then by dimension value.
pub type CountReport = BTreeMap<String, BTreeMap<String, i64>>;

/// Aggregate counts for one dimension, or all of them when `None`.
pub fn document_counts(
    config: &Config,
    dimension: Option<Dimension>,
) -> Result<CountReport, String> {
    let repository = super::open_repository(config)?;
    let dimensions: Vec<Dimension> = match dimension {
        Some(d) => vec![d],
        None => Dimension::all().to_vec(),
    };

    let mut report = CountReport::new();
    for d in dimensions {
        let counts = repository
            .count_by(d)
            .map_err(|e| format!("Failed to count by {d}: {e}"))?;
        report.insert(d.as_str().to_string(), counts);
    }
    Ok(report)
}

/// Every stored document with its lookup names.
pub fn list_documents(config: &Config) -> Result<Vec<DocumentListing>, String> {
    let repository = super::open_repository(config)?;
    repository
        .list()
        .map_err(|e| format!("Failed to list documents: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_config;

    #[test]
    fn all_dimensions_reported_when_none_given() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let report = document_counts(&config, None).unwrap();
        assert_eq!(
            report.keys().cloned().collect::<Vec<_>>(),
            vec!["organ".to_string(), "type".into(), "year".into()]
        );
        assert!(report.values().all(|counts| counts.is_empty()));
    }

    #[test]
    fn single_dimension_report() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let report = document_counts(&config, Some(Dimension::Year)).unwrap();
        assert_eq!(report.len(), 1);
        assert!(report.contains_key("year"));
    }

    #[test]
    fn listing_fresh_database_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        assert!(list_documents(&config).unwrap().is_empty());
    }
}
