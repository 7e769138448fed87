use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::schema::SCHEMA;
use super::{FormDocument, FormRecord, Store, new_native_id};
use crate::error::{Error, Result};
use crate::types::{Field, StatusCheck};

const FORM_COLUMNS: &str = "_id, id, name, fields, created_at, updated_at";

pub struct SqliteStore {
    conn: Mutex<Option<Connection>>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    /// Opens a private in-memory database. Useful for tests and tooling.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let guard = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        let conn = guard.as_ref().ok_or(Error::StoreClosed)?;
        f(conn)
    }

    fn find_form_where(&self, column: &str, value: &str) -> Result<Option<FormRecord>> {
        self.with_conn(|conn| {
            let raw = conn
                .query_row(
                    &format!("SELECT {FORM_COLUMNS} FROM forms WHERE {column} = ?1"),
                    params![value],
                    RawForm::from_row,
                )
                .optional()?;
            raw.map(RawForm::into_record).transpose()
        })
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Row as read from the `forms` table, before the fields JSON is decoded.
struct RawForm {
    native_id: String,
    id: Option<String>,
    name: String,
    fields: String,
    created_at: String,
    updated_at: String,
}

impl RawForm {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            native_id: row.get(0)?,
            id: row.get(1)?,
            name: row.get(2)?,
            fields: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn into_record(self) -> Result<FormRecord> {
        Ok(FormRecord {
            fields: serde_json::from_str(&self.fields)?,
            native_id: self.native_id,
            id: self.id,
            name: self.name,
            created_at: parse_datetime(&self.created_at),
            updated_at: parse_datetime(&self.updated_at),
        })
    }
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
    }

    // Form collection

    fn insert_form(&self, doc: &FormDocument) -> Result<FormRecord> {
        let native_id = doc.native_id.clone().unwrap_or_else(new_native_id);
        let fields = serde_json::to_string(&doc.fields)?;

        let result = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO forms (_id, id, name, fields, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    native_id,
                    doc.id,
                    doc.name,
                    fields,
                    format_datetime(&doc.created_at),
                    format_datetime(&doc.updated_at),
                ],
            )
            .map_err(Error::from)
        });

        match result {
            Ok(_) => Ok(FormRecord {
                native_id,
                id: doc.id.clone(),
                name: doc.name.clone(),
                fields: doc.fields.clone(),
                created_at: doc.created_at,
                updated_at: doc.updated_at,
            }),
            Err(Error::Database(rusqlite::Error::SqliteFailure(err, _)))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::AlreadyExists)
            }
            Err(e) => Err(e),
        }
    }

    fn find_form_by_id(&self, id: &str) -> Result<Option<FormRecord>> {
        self.find_form_where("id", id)
    }

    fn find_form_by_native_id(&self, native_id: &str) -> Result<Option<FormRecord>> {
        self.find_form_where("_id", native_id)
    }

    fn list_forms(&self, limit: usize) -> Result<Vec<FormRecord>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {FORM_COLUMNS} FROM forms ORDER BY rowid LIMIT ?1"
            ))?;

            let rows = stmt.query_map(params![limit], RawForm::from_row)?;

            rows.map(|row| row.map_err(Error::from).and_then(RawForm::into_record))
                .collect()
        })
    }

    fn count_forms(&self) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM forms", [], |row| row.get(0))?;
            Ok(count)
        })
    }

    fn update_form(
        &self,
        native_id: &str,
        name: &str,
        fields: &[Field],
        updated_at: &DateTime<Utc>,
    ) -> Result<bool> {
        let fields = serde_json::to_string(fields)?;
        self.with_conn(|conn| {
            let rows = conn.execute(
                "UPDATE forms SET name = ?1, fields = ?2, updated_at = ?3 WHERE _id = ?4",
                params![name, fields, format_datetime(updated_at), native_id],
            )?;
            Ok(rows > 0)
        })
    }

    fn delete_form(&self, native_id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let rows = conn.execute("DELETE FROM forms WHERE _id = ?1", params![native_id])?;
            Ok(rows > 0)
        })
    }

    // Status check collection

    fn insert_status_check(&self, check: &StatusCheck) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO status_checks (id, client_name, timestamp) VALUES (?1, ?2, ?3)",
                params![
                    check.id,
                    check.client_name,
                    format_datetime(&check.timestamp)
                ],
            )?;
            Ok(())
        })
    }

    fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, client_name, timestamp FROM status_checks ORDER BY rowid LIMIT ?1",
            )?;

            let rows = stmt.query_map(params![limit], |row| {
                Ok(StatusCheck {
                    id: row.get(0)?,
                    client_name: row.get(1)?,
                    timestamp: parse_datetime(&row.get::<_, String>(2)?),
                })
            })?;

            rows.collect::<std::result::Result<Vec<_>, _>>()
                .map_err(Error::from)
        })
    }

    fn close(&self) -> Result<()> {
        let mut guard = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        match guard.take() {
            Some(conn) => conn.close().map_err(|(_, e)| Error::from(e)),
            None => Ok(()),
        }
    }
}
