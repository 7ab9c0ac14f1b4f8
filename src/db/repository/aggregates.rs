use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::db::DatabaseError;
use crate::models::enums::Dimension;

/// Document count per dimension value. Type and organ are keyed by lookup
/// name, year by its decimal string. Values without documents are absent.
pub fn count_documents_by(
    conn: &Connection,
    dimension: Dimension,
) -> Result<BTreeMap<String, i64>, DatabaseError> {
    let sql = match dimension {
        Dimension::Type => {
            "SELECT td.nome, COUNT(*) FROM documents d
             JOIN tipos_documento td ON d.tipo_documento_id = td.id
             GROUP BY td.nome"
        }
        Dimension::Organ => {
            "SELECT o.nome, COUNT(*) FROM documents d
             JOIN orgaos o ON d.orgao_id = o.id
             GROUP BY o.nome"
        }
        Dimension::Year => {
            "SELECT CAST(ano AS TEXT), COUNT(*) FROM documents GROUP BY ano"
        }
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    rows.collect::<Result<BTreeMap<_, _>, _>>()
        .map_err(DatabaseError::from)
}
