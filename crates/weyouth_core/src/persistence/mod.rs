//! Durable key/value persistence for store collections.
//!
//! # Responsibility
//! - Define the gateway contract the entity store and session manager write to.
//! - Encode/decode collection records as JSON.
//!
//! # Invariants
//! - An absent key means "first run"; it is never an error.
//! - A present key that fails to decode is reported as `Corrupt`, never masked.
//! - `save_all` is all-or-nothing from a reader's point of view.

mod memory_gateway;
mod sqlite_gateway;

pub use memory_gateway::MemoryGateway;
pub use sqlite_gateway::SqliteGateway;

use crate::db::DbError;
use log::error;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Stable logical record names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StorageKey {
    Notices,
    Posts,
    Schedule,
    WorshipInfo,
    Session,
    Attendance,
}

impl StorageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notices => "notices",
            Self::Posts => "posts",
            Self::Schedule => "schedule",
            Self::WorshipInfo => "worship_info",
            Self::Session => "session",
            Self::Attendance => "attendance",
        }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub enum PersistenceError {
    Db(DbError),
    /// Stored bytes exist but do not decode into the expected record.
    Corrupt {
        key: StorageKey,
        source: serde_json::Error,
    },
    Encode {
        key: StorageKey,
        source: serde_json::Error,
    },
    /// Backend refused the operation.
    Unavailable { key: StorageKey, reason: String },
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Corrupt { key, source } => {
                write!(f, "stored record `{key}` is malformed: {source}")
            }
            Self::Encode { key, source } => {
                write!(f, "failed to encode record `{key}`: {source}")
            }
            Self::Unavailable { key, reason } => {
                write!(f, "storage unavailable for `{key}`: {reason}")
            }
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Corrupt { source, .. } | Self::Encode { source, .. } => Some(source),
            Self::Unavailable { .. } => None,
        }
    }
}

impl From<DbError> for PersistenceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Byte-level storage keyed by logical record name.
pub trait PersistenceGateway {
    fn load(&self, key: StorageKey) -> PersistenceResult<Option<Vec<u8>>>;
    fn save(&self, key: StorageKey, bytes: &[u8]) -> PersistenceResult<()>;
    fn remove(&self, key: StorageKey) -> PersistenceResult<()>;

    /// Writes several records as one unit of work.
    ///
    /// The default implementation writes in order and, when a write fails,
    /// restores every record already written to its prior value before
    /// returning the failure.
    ///
    /// If a restore write fails too, storage keeps part of the batch. That
    /// case is logged at `error` and the original write failure is still
    /// returned. Backends with real transactions should override this.
    fn save_all(&self, entries: &[(StorageKey, Vec<u8>)]) -> PersistenceResult<()> {
        let mut previous = Vec::with_capacity(entries.len());
        for (key, _) in entries {
            previous.push((*key, self.load(*key)?));
        }

        for (index, (key, bytes)) in entries.iter().enumerate() {
            if let Err(err) = self.save(*key, bytes) {
                for (prior_key, prior_value) in previous[..index].iter().rev() {
                    let restored = match prior_value {
                        Some(value) => self.save(*prior_key, value),
                        None => self.remove(*prior_key),
                    };
                    if let Err(restore_err) = restored {
                        error!(
                            "event=save_all_restore module=persistence status=error partial=true key={} error={}",
                            prior_key, restore_err
                        );
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for &G {
    fn load(&self, key: StorageKey) -> PersistenceResult<Option<Vec<u8>>> {
        (**self).load(key)
    }

    fn save(&self, key: StorageKey, bytes: &[u8]) -> PersistenceResult<()> {
        (**self).save(key, bytes)
    }

    fn remove(&self, key: StorageKey) -> PersistenceResult<()> {
        (**self).remove(key)
    }

    fn save_all(&self, entries: &[(StorageKey, Vec<u8>)]) -> PersistenceResult<()> {
        (**self).save_all(entries)
    }
}

/// Encodes one record value as JSON bytes.
pub fn encode_record<T: Serialize + ?Sized>(
    key: StorageKey,
    value: &T,
) -> PersistenceResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|source| PersistenceError::Encode { key, source })
}

/// Loads and decodes one record; `Ok(None)` when the key was never written.
pub fn load_record<T, G>(gateway: &G, key: StorageKey) -> PersistenceResult<Option<T>>
where
    T: DeserializeOwned,
    G: PersistenceGateway + ?Sized,
{
    match gateway.load(key)? {
        Some(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| PersistenceError::Corrupt { key, source }),
        None => Ok(None),
    }
}

/// Encodes and writes one record.
pub fn save_record<T, G>(gateway: &G, key: StorageKey, value: &T) -> PersistenceResult<()>
where
    T: Serialize + ?Sized,
    G: PersistenceGateway + ?Sized,
{
    let bytes = encode_record(key, value)?;
    gateway.save(key, &bytes)
}

#[cfg(test)]
mod tests {
    use super::{
        load_record, save_record, MemoryGateway, PersistenceError, PersistenceGateway,
        PersistenceResult, StorageKey,
    };
    use std::cell::Cell;

    #[test]
    fn absent_key_loads_as_none() {
        let gateway = MemoryGateway::new();
        let loaded: Option<Vec<String>> =
            load_record(&gateway, StorageKey::Notices).expect("absent key is not an error");
        assert!(loaded.is_none());
    }

    #[test]
    fn malformed_record_is_reported_as_corrupt() {
        let gateway = MemoryGateway::new();
        gateway
            .save(StorageKey::Posts, b"{not json")
            .expect("raw save");
        let err = load_record::<Vec<String>, _>(&gateway, StorageKey::Posts)
            .expect_err("malformed record must fail");
        assert!(matches!(
            err,
            PersistenceError::Corrupt {
                key: StorageKey::Posts,
                ..
            }
        ));
    }

    #[test]
    fn default_save_all_restores_prior_values_on_failure() {
        let gateway = MemoryGateway::new();
        save_record(&gateway, StorageKey::Schedule, &vec!["old".to_string()]).expect("seed");
        gateway.fail_saves_for(StorageKey::WorshipInfo);

        let err = gateway
            .save_all(&[
                (StorageKey::Schedule, b"[\"new\"]".to_vec()),
                (StorageKey::WorshipInfo, b"{}".to_vec()),
            ])
            .expect_err("second write fails");
        assert!(matches!(err, PersistenceError::Unavailable { .. }));

        let schedule: Option<Vec<String>> =
            load_record(&gateway, StorageKey::Schedule).expect("load");
        assert_eq!(schedule, Some(vec!["old".to_string()]));
        assert!(gateway.load(StorageKey::WorshipInfo).expect("load").is_none());
    }

    /// Accepts `budget` writes, then rejects every later one.
    struct ExhaustingGateway {
        inner: MemoryGateway,
        budget: Cell<usize>,
    }

    impl PersistenceGateway for ExhaustingGateway {
        fn load(&self, key: StorageKey) -> PersistenceResult<Option<Vec<u8>>> {
            self.inner.load(key)
        }

        fn save(&self, key: StorageKey, bytes: &[u8]) -> PersistenceResult<()> {
            if self.budget.get() == 0 {
                return Err(PersistenceError::Unavailable {
                    key,
                    reason: "write budget exhausted".to_string(),
                });
            }
            self.budget.set(self.budget.get() - 1);
            self.inner.save(key, bytes)
        }

        fn remove(&self, key: StorageKey) -> PersistenceResult<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_restore_still_reports_the_original_write_failure() {
        let gateway = ExhaustingGateway {
            inner: MemoryGateway::new(),
            budget: Cell::new(2),
        };
        save_record(&gateway, StorageKey::Schedule, &vec!["old".to_string()]).expect("seed");

        let err = gateway
            .save_all(&[
                (StorageKey::Schedule, b"[\"new\"]".to_vec()),
                (StorageKey::WorshipInfo, b"{}".to_vec()),
            ])
            .expect_err("second write fails");
        assert!(matches!(
            err,
            PersistenceError::Unavailable {
                key: StorageKey::WorshipInfo,
                ..
            }
        ));

        let schedule: Option<Vec<String>> =
            load_record(&gateway, StorageKey::Schedule).expect("load");
        assert_eq!(schedule, Some(vec!["new".to_string()]));
    }

    #[test]
    fn storage_keys_have_stable_names() {
        assert_eq!(StorageKey::Notices.as_str(), "notices");
        assert_eq!(StorageKey::WorshipInfo.to_string(), "worship_info");
    }
}
