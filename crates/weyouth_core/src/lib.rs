//! Core domain logic for the WE Youth community app.
//! This crate is the single source of truth for store, session and
//! authorization invariants; UI layers only call into it.

pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod reflection;
pub mod session;
pub mod store;

pub use auth::capability::{authorize, AccessDenied, Capability};
pub use auth::resolver::{AuthError, IdentityResolver};
pub use clock::{Clock, FixedClock, IdGenerator, SystemClock};
pub use config::{AuthPolicy, CoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_from, logging_status};
pub use model::attendance::{AttendanceRecord, AttendanceStatus};
pub use model::notice::{Notice, NoticeCategory, NoticeDraft, NoticePatch};
pub use model::post::{Comment, Post, PostCategory, PostDraft, PostFilter};
pub use model::schedule::{ScheduleEntry, ScheduleField, WorshipField, WorshipInfo};
pub use model::session::{Role, RoleChoice, Session};
pub use model::ValidationError;
pub use persistence::{
    MemoryGateway, PersistenceError, PersistenceGateway, PersistenceResult, SqliteGateway,
    StorageKey,
};
pub use reflection::verses::{daily_verses, verse_for_date, BibleVerse};
pub use reflection::{
    GenerationError, GenerationRequest, ReflectionGateway, ReflectionService, TextGenerator,
};
pub use session::{SessionError, SessionManager};
pub use store::{DashboardSummary, DraftSession, EntityKind, EntityStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
