use crate::error::StoreError;
use crate::record::Record;
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredRecord {
    pub id: String,
    #[serde(flatten)]
    pub record: Record,
}

/// Read side of the record store, as seen by the dataset loader.
pub trait RecordStore {
    fn fetch_all(&self) -> Result<Vec<StoredRecord>, StoreError>;
}

/// Records kept as JSON documents in the workspace database.
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Appends records after the current tail in one transaction. Returns
    /// the new ids in input order.
    pub fn insert_many(&self, records: &[Record]) -> Result<Vec<String>, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let start: i64 = tx.query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM records",
            [],
            |r| r.get(0),
        )?;
        let now = chrono::Utc::now().to_rfc3339();
        let mut ids = Vec::with_capacity(records.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO records(id, position, doc, created_at) VALUES(?, ?, ?, ?)",
            )?;
            for (i, record) in records.iter().enumerate() {
                let id = Uuid::new_v4().to_string();
                let doc = serde_json::to_string(record).map_err(|e| StoreError::Corrupt {
                    id: id.clone(),
                    source: e,
                })?;
                stmt.execute((&id, start + i as i64, &doc, &now))?;
                ids.push(id);
            }
        }
        tx.commit()?;
        Ok(ids)
    }

    /// Replaces a record document. `false` when the id is unknown.
    pub fn update(&self, id: &str, record: &Record) -> Result<bool, StoreError> {
        let doc = serde_json::to_string(record).map_err(|e| StoreError::Corrupt {
            id: id.to_string(),
            source: e,
        })?;
        let now = chrono::Utc::now().to_rfc3339();
        let n = self.conn.execute(
            "UPDATE records SET doc = ?, updated_at = ? WHERE id = ?",
            (&doc, &now, id),
        )?;
        Ok(n > 0)
    }

    /// `false` when the id is unknown.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let n = self.conn.execute("DELETE FROM records WHERE id = ?", [id])?;
        Ok(n > 0)
    }

    pub fn get(&self, id: &str) -> Result<Option<StoredRecord>, StoreError> {
        let row: Option<String> = self
            .conn
            .query_row("SELECT doc FROM records WHERE id = ?", [id], |r| r.get(0))
            .optional()?;
        row.map(|doc| decode(id.to_string(), &doc)).transpose()
    }
}

fn decode(id: String, doc: &str) -> Result<StoredRecord, StoreError> {
    match serde_json::from_str::<Record>(doc) {
        Ok(record) => Ok(StoredRecord { id, record }),
        Err(e) => Err(StoreError::Corrupt { id, source: e }),
    }
}

impl RecordStore for SqliteStore<'_> {
    fn fetch_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, doc FROM records ORDER BY position, id")?;
        let rows = stmt
            .query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(|(id, doc)| decode(id, &doc)).collect()
    }
}
