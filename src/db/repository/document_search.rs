use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::*;

/// Search documents using FTS5 full-text search.
///
/// Results are ranked by BM25 over the full text, most relevant first,
/// newest publication date breaking ties. Absent filters do not constrain.
pub fn search_documents(
    conn: &Connection,
    query: &str,
    filters: &SearchFilters,
    limit: usize,
) -> Result<Vec<SearchHit>, DatabaseError> {
    let sanitized = sanitize_fts_query(query);
    if sanitized.is_empty() {
        return Ok(Vec::new());
    }

    let mut stmt = conn.prepare(
        "SELECT d.id, d.titulo, d.ementa, d.numero, d.ano, d.data_publicacao,
                td.nome, o.nome,
                highlight(documents_fts, 0, '<mark>', '</mark>'),
                -bm25(documents_fts, 0.0, 1.0) AS relevance
         FROM documents_fts
         JOIN documents d ON d.id = documents_fts.rowid
         JOIN tipos_documento td ON d.tipo_documento_id = td.id
         JOIN orgaos o ON d.orgao_id = o.id
         WHERE documents_fts MATCH ?1
           AND (?2 IS NULL OR d.tipo_documento_id = ?2)
           AND (?3 IS NULL OR d.orgao_id = ?3)
           AND (?4 IS NULL OR d.ano = ?4)
         ORDER BY relevance DESC, d.data_publicacao DESC
         LIMIT ?5"
    )?;

    let rows = stmt.query_map(
        params![
            sanitized,
            filters.type_id,
            filters.organ_id,
            filters.year,
            limit as i64,
        ],
        row_to_search_hit,
    )?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Type and organ lookups sorted by name, plus distinct stored years, newest first.
pub fn list_filter_options(conn: &Connection) -> Result<FilterOptions, DatabaseError> {
    let types = lookup_entries(conn, "SELECT id, nome FROM tipos_documento ORDER BY nome")?;
    let organs = lookup_entries(conn, "SELECT id, nome FROM orgaos ORDER BY nome")?;

    let mut stmt = conn.prepare("SELECT DISTINCT ano FROM documents ORDER BY ano DESC")?;
    let years = stmt
        .query_map([], |row| row.get::<_, i32>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FilterOptions {
        types,
        organs,
        years,
    })
}

fn lookup_entries(conn: &Connection, sql: &str) -> Result<Vec<LookupEntry>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(LookupEntry {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Sanitize a search query for FTS5.
/// Strips operator characters and wraps each term for prefix matching,
/// so user input can never produce an FTS5 syntax error.
pub fn sanitize_fts_query(query: &str) -> String {
    let cleaned: String = query
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '\'')
        .collect();

    cleaned
        .split_whitespace()
        .map(|w| format!("\"{w}\"*"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn row_to_search_hit(row: &rusqlite::Row) -> Result<SearchHit, rusqlite::Error> {
    Ok(SearchHit {
        id: row.get(0)?,
        title: row.get(1)?,
        summary: row.get(2)?,
        number: row.get(3)?,
        year: row.get(4)?,
        publication_date: row.get(5)?,
        doc_type: row.get(6)?,
        organ: row.get(7)?,
        highlighted_summary: row.get(8)?,
        relevance: row.get(9)?,
    })
}
