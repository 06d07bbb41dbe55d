//! SQLite-backed gateway over the `kv_records` table.
//!
//! # Invariants
//! - One row per `StorageKey`; writes replace the whole value.
//! - `save_all` commits inside a single transaction.

use super::{PersistenceGateway, PersistenceResult, StorageKey};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};

const UPSERT_SQL: &str = "INSERT INTO kv_records (key, value, updated_at)
    VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
    ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at;";

/// Gateway borrowing a migrated connection (see `db::open_db`).
#[derive(Clone, Copy)]
pub struct SqliteGateway<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGateway<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PersistenceGateway for SqliteGateway<'_> {
    fn load(&self, key: StorageKey) -> PersistenceResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_records WHERE key = ?1;",
                [key.as_str()],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: StorageKey, bytes: &[u8]) -> PersistenceResult<()> {
        match upsert(self.conn, key, bytes) {
            Ok(()) => {
                debug!(
                    "event=record_save module=persistence status=ok key={} bytes={}",
                    key,
                    bytes.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=record_save module=persistence status=error key={} error={}",
                    key, err
                );
                Err(err.into())
            }
        }
    }

    fn remove(&self, key: StorageKey) -> PersistenceResult<()> {
        self.conn
            .execute("DELETE FROM kv_records WHERE key = ?1;", [key.as_str()])?;
        Ok(())
    }

    fn save_all(&self, entries: &[(StorageKey, Vec<u8>)]) -> PersistenceResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, bytes) in entries {
            upsert(&tx, *key, bytes)?;
        }
        tx.commit()?;
        debug!(
            "event=record_save_all module=persistence status=ok records={}",
            entries.len()
        );
        Ok(())
    }
}

fn upsert(conn: &Connection, key: StorageKey, bytes: &[u8]) -> rusqlite::Result<()> {
    conn.execute(UPSERT_SQL, params![key.as_str(), bytes])?;
    Ok(())
}
