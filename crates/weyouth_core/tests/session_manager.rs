use chrono::{TimeZone, Utc};
use weyouth_core::db::open_db_in_memory;
use weyouth_core::{
    AuthError, AuthPolicy, FixedClock, IdentityResolver, MemoryGateway, PersistenceError,
    PersistenceGateway, Role, RoleChoice, SessionError, SessionManager, SqliteGateway, StorageKey,
};

fn resolver() -> IdentityResolver<FixedClock> {
    IdentityResolver::new(
        AuthPolicy::default(),
        FixedClock::new(Utc.with_ymd_and_hms(2024, 7, 28, 1, 0, 0).unwrap()),
    )
}

#[test]
fn first_run_has_no_session() {
    let gateway = MemoryGateway::new();
    let manager = SessionManager::open(&gateway, resolver()).unwrap();
    assert!(manager.current_session().is_none());
}

#[test]
fn login_persists_and_restores_across_reopen() {
    let conn = open_db_in_memory().unwrap();
    let session = {
        let mut manager = SessionManager::open(SqliteGateway::new(&conn), resolver()).unwrap();
        manager
            .login("학생1", "12345678", RoleChoice::Student)
            .unwrap()
    };

    let restored = SessionManager::open(SqliteGateway::new(&conn), resolver()).unwrap();
    assert_eq!(restored.current_session(), Some(&session));
    assert_eq!(session.grade, Some(10));
}

#[test]
fn rejected_login_keeps_previous_session() {
    let gateway = MemoryGateway::new();
    let mut manager = SessionManager::open(&gateway, resolver()).unwrap();
    manager.login("오환희", "", RoleChoice::Student).unwrap();

    let err = manager
        .login("학생1", "wrong", RoleChoice::Student)
        .unwrap_err();
    assert!(matches!(err, SessionError::Auth(AuthError::WrongPassword)));
    assert_eq!(manager.current_session().unwrap().role, Role::Teacher);
}

#[test]
fn logout_clears_memory_and_storage() {
    let gateway = MemoryGateway::new();
    let mut manager = SessionManager::open(&gateway, resolver()).unwrap();
    manager.login("강은택", "", RoleChoice::Teacher).unwrap();
    assert!(gateway.load(StorageKey::Session).unwrap().is_some());

    manager.logout().unwrap();
    assert!(manager.current_session().is_none());
    assert!(gateway.load(StorageKey::Session).unwrap().is_none());

    manager.logout().expect("logout without a session is harmless");
}

#[test]
fn failed_session_write_is_reported() {
    let gateway = MemoryGateway::new();
    gateway.fail_saves_for(StorageKey::Session);
    let mut manager = SessionManager::open(&gateway, resolver()).unwrap();

    let err = manager
        .login("학생1", "12345678", RoleChoice::Student)
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Persistence(PersistenceError::Unavailable { .. })
    ));
    assert!(manager.current_session().is_none());
}

#[test]
fn malformed_stored_session_is_an_error() {
    let gateway = MemoryGateway::new();
    gateway
        .save(StorageKey::Session, br#"{"id":"x","name":"y","role":"pastor"}"#)
        .unwrap();
    let err = SessionManager::open(&gateway, resolver())
        .err()
        .expect("unknown role must fail");
    assert!(matches!(
        err,
        SessionError::Persistence(PersistenceError::Corrupt { .. })
    ));
}
