// SQLite implementation of the EntryStore port.
//
// Each entry is kept as a JSON document next to the columns used for lookup
// and ordering, so documents written by older schema versions read back with
// whatever fields they had.

use crate::modules::run_entries::core::entry::TimeEntry;
use crate::modules::run_entries::core::ports::{EntryStore, SortOrder, StoreError};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Arc, Mutex};

const SCHEMA_TIME_ENTRIES: &str = "CREATE TABLE IF NOT EXISTS time_entries (
    id TEXT PRIMARY KEY,
    date TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    document TEXT NOT NULL
);";
const SELECT_ALL_ASC: &str =
    "SELECT document FROM time_entries ORDER BY date ASC, created_at ASC";
const SELECT_ALL_DESC: &str =
    "SELECT document FROM time_entries ORDER BY date DESC, created_at DESC";
const SELECT_BY_ID: &str = "SELECT document FROM time_entries WHERE id = ?1";
const INSERT_ENTRY: &str =
    "INSERT INTO time_entries (id, date, created_at, document) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_ENTRY: &str = "UPDATE time_entries SET date = ?2, document = ?3 WHERE id = ?1";
const DELETE_ENTRY: &str = "DELETE FROM time_entries WHERE id = ?1";

pub struct SqliteEntryStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteEntryStore {
    /// Opens (or creates) the database file and makes sure the table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(SCHEMA_TIME_ENTRIES, [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `job` against the connection on the blocking pool.
    async fn run<T, F>(&self, job: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| StoreError::Backend("sqlite connection lock poisoned".into()))?;
            job(&conn)
        })
        .await
        .map_err(|e| StoreError::Backend(format!("sqlite task failed: {e}")))?
    }
}

#[async_trait::async_trait]
impl EntryStore for SqliteEntryStore {
    async fn find_all(&self, order: SortOrder) -> Result<Vec<TimeEntry>, StoreError> {
        let sql = match order {
            SortOrder::Ascending => SELECT_ALL_ASC,
            SortOrder::Descending => SELECT_ALL_DESC,
        };
        self.run(move |conn| {
            let mut stmt = conn.prepare(sql)?;
            let documents = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let mut entries: Vec<TimeEntry> = Vec::new();
            for document in documents {
                entries.push(serde_json::from_str(&document?)?);
            }
            Ok(entries)
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TimeEntry>, StoreError> {
        let id = id.to_string();
        self.run(move |conn| {
            let document = conn
                .query_row(SELECT_BY_ID, [id.as_str()], |row| row.get::<_, String>(0))
                .optional()?;
            match document {
                Some(document) => Ok(Some(serde_json::from_str(&document)?)),
                None => Ok(None),
            }
        })
        .await
    }

    async fn insert(&self, entry: TimeEntry) -> Result<(), StoreError> {
        let document = serde_json::to_string(&entry)?;
        self.run(move |conn| {
            conn.execute(
                INSERT_ENTRY,
                params![entry.id, entry.date, entry.created_at, document],
            )?;
            Ok(())
        })
        .await
    }

    async fn replace(&self, entry: TimeEntry) -> Result<bool, StoreError> {
        let document = serde_json::to_string(&entry)?;
        self.run(move |conn| {
            let changed = conn.execute(UPDATE_ENTRY, params![entry.id, entry.date, document])?;
            Ok(changed > 0)
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let id = id.to_string();
        self.run(move |conn| Ok(conn.execute(DELETE_ENTRY, [id.as_str()])? > 0))
            .await
    }
}
