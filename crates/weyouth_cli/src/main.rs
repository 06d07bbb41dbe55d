//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `weyouth_core` wiring end to end: logging, database, session,
//!   store.
//! - Print the home view for a login given on the command line.
//!
//! Usage: `weyouth_cli <name> [password] [student|teacher]`
//! Data lives under `$WEYOUTH_DATA_DIR` (default: system temp dir).

use std::path::PathBuf;
use std::process::ExitCode;
use weyouth_core::db::open_db;
use weyouth_core::{
    authorize, core_version, init_logging_from, verse_for_date, Capability, Clock, CoreConfig,
    EntityStore, IdentityResolver, RoleChoice, SessionError, SessionManager, SqliteGateway,
    SystemClock,
};

const HOME_NOTICE_COUNT: usize = 2;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("weyouth_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_default();
    let password = args.next().unwrap_or_default();
    let role_choice = match args.next().as_deref() {
        None | Some("student") => RoleChoice::Student,
        Some("teacher") => RoleChoice::Teacher,
        Some(other) => return Err(format!("unknown role `{other}`; expected student|teacher")),
    };

    let config = match std::env::var("WEYOUTH_DATA_DIR") {
        Ok(raw) if !raw.trim().is_empty() => CoreConfig::with_data_dir(PathBuf::from(raw.trim())),
        _ => CoreConfig::default(),
    };
    init_logging_from(&config)?;
    log::info!("event=cli_start module=cli status=ok version={}", core_version());

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| err.to_string())?;
    }
    let conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
    let gateway = SqliteGateway::new(&conn);

    let mut sessions = SessionManager::open(
        gateway,
        IdentityResolver::new(config.auth.clone(), SystemClock),
    )
    .map_err(|err| err.to_string())?;
    let restored = sessions.current_session().cloned();
    let session = match restored {
        Some(session) if name.trim().is_empty() => session,
        _ => sessions
            .login(&name, &password, role_choice)
            .map_err(|err| match err {
                SessionError::Auth(auth) => auth.field_message().to_string(),
                other => other.to_string(),
            })?,
    };
    authorize(&session, Capability::ReadContent).map_err(|err| err.to_string())?;

    let store = EntityStore::open(gateway, SystemClock).map_err(|err| err.to_string())?;
    let verse = verse_for_date(SystemClock.today());

    println!("weyouth_core version={}", core_version());
    println!("{} ({})", session.name, session.role.display_label());
    println!(
        "worship: {} @ {}",
        store.worship_info().time,
        store.worship_info().location
    );
    for notice in store.latest_notices(HOME_NOTICE_COUNT) {
        println!("notice [{}] {} - {}", notice.date, notice.title, notice.author);
    }
    for entry in store.schedule() {
        let marker = if entry.is_main == Some(true) { "*" } else { " " };
        println!("{marker} {} {} {}", entry.day, entry.time, entry.title);
    }
    println!("verse: {} ({})", verse.text, verse.reference);
    Ok(())
}
