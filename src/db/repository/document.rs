use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use super::InsertError;
use crate::db::DatabaseError;
use crate::models::enums::DocumentClass;
use crate::models::*;

/// Insert a document. Lookup names are resolved by sub-query; a type or
/// organ name without a match leaves a NULL foreign key, which the schema
/// rejects. Status and priority are optional and stay NULL when unresolved.
pub fn insert_document(
    conn: &Connection,
    doc: &Document,
    names: &LookupNames,
) -> Result<i64, InsertError> {
    conn.execute(
        "INSERT INTO documents (titulo, ementa, numero, ano, data_publicacao,
         tipo_documento_id, orgao_id, status_id, prioridade_id, conteudo_texto,
         arquivo_origem, hash_conteudo)
         VALUES (?1, ?2, ?3, ?4, ?5,
                 (SELECT id FROM tipos_documento WHERE nome = ?6),
                 (SELECT id FROM orgaos WHERE nome = ?7),
                 (SELECT id FROM status WHERE nome = ?8),
                 (SELECT id FROM prioridade WHERE nome = ?9),
                 ?10, ?11, ?12)",
        params![
            doc.title,
            doc.summary,
            doc.number,
            doc.year,
            doc.publication_date,
            names.type_name,
            names.organ_name,
            names.status_name,
            names.priority_name,
            doc.full_text,
            doc.source_file,
            doc.content_hash,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_document(conn: &Connection, id: i64) -> Result<Option<Document>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT d.titulo, d.numero, d.ano, d.data_publicacao, d.ementa, d.conteudo_texto,
         td.nome, d.arquivo_origem, d.hash_conteudo
         FROM documents d
         LEFT JOIN tipos_documento td ON d.tipo_documento_id = td.id
         WHERE d.id = ?1"
    )?;

    let result = stmt.query_row(params![id], |row| {
        Ok(DocumentRow {
            title: row.get(0)?,
            number: row.get(1)?,
            year: row.get(2)?,
            publication_date: row.get(3)?,
            summary: row.get(4)?,
            full_text: row.get(5)?,
            type_name: row.get(6)?,
            source_file: row.get(7)?,
            content_hash: row.get(8)?,
        })
    });

    match result {
        Ok(row) => Ok(Some(document_from_row(row))),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All documents with their lookup names, oldest first.
pub fn list_documents(conn: &Connection) -> Result<Vec<DocumentListing>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT d.id, d.titulo, td.nome, o.nome, s.nome, p.nome
         FROM documents d
         LEFT JOIN tipos_documento td ON d.tipo_documento_id = td.id
         LEFT JOIN orgaos o ON d.orgao_id = o.id
         LEFT JOIN status s ON d.status_id = s.id
         LEFT JOIN prioridade p ON d.prioridade_id = p.id
         ORDER BY d.id"
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(DocumentListing {
            id: row.get(0)?,
            title: row.get(1)?,
            doc_type: row.get(2)?,
            organ: row.get(3)?,
            status: row.get(4)?,
            priority: row.get(5)?,
        })
    })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

pub fn document_hash_exists(conn: &Connection, hash: &str) -> Result<bool, DatabaseError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM documents WHERE hash_conteudo = ?1)",
        params![hash],
        |row| row.get(0),
    )?;
    Ok(exists)
}

pub fn count_documents(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
    Ok(count)
}

// Internal row type for Document mapping
struct DocumentRow {
    title: String,
    number: String,
    year: i32,
    publication_date: NaiveDate,
    summary: String,
    full_text: String,
    type_name: Option<String>,
    source_file: Option<String>,
    content_hash: Option<String>,
}

fn document_from_row(row: DocumentRow) -> Document {
    Document {
        title: row.title,
        number: row.number,
        year: row.year,
        publication_date: row.publication_date,
        summary: row.summary,
        full_text: row.full_text,
        class: row
            .type_name
            .as_deref()
            .and_then(|name| DocumentClass::from_str(name).ok()),
        source_file: row.source_file,
        content_hash: row.content_hash,
    }
}
