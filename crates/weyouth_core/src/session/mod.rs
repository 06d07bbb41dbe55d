//! Current-session lifecycle: restore, login, logout.
//!
//! # Responsibility
//! - Expose the session boundary used by the UI (`current_session`, `login`,
//!   `logout`).
//! - Keep the persisted `session` record in step with the in-memory value.
//!
//! # Invariants
//! - A session is replaced only by a successful login, never mutated.
//! - A failed write leaves the previous session (or none) in place.

use crate::auth::resolver::{AuthError, IdentityResolver};
use crate::clock::Clock;
use crate::model::session::{RoleChoice, Session};
use crate::persistence::{
    load_record, save_record, PersistenceError, PersistenceGateway, StorageKey,
};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum SessionError {
    Auth(AuthError),
    Persistence(PersistenceError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Auth(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<AuthError> for SessionError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<PersistenceError> for SessionError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

/// Owns the resolved session for the process.
pub struct SessionManager<G: PersistenceGateway, C: Clock> {
    gateway: G,
    resolver: IdentityResolver<C>,
    current: Option<Session>,
}

impl<G: PersistenceGateway, C: Clock> SessionManager<G, C> {
    /// Restores a previously persisted session, if any.
    ///
    /// # Errors
    /// - `Persistence` when the stored session record is unreadable.
    pub fn open(gateway: G, resolver: IdentityResolver<C>) -> Result<Self, SessionError> {
        let current: Option<Session> = load_record(&gateway, StorageKey::Session)?;
        info!(
            "event=session_restore module=session status=ok restored={}",
            current.is_some()
        );
        Ok(Self {
            gateway,
            resolver,
            current,
        })
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Resolves and persists a new session, replacing any current one.
    pub fn login(
        &mut self,
        name: &str,
        password: &str,
        role_choice: RoleChoice,
    ) -> Result<Session, SessionError> {
        let session = match self.resolver.resolve(name, password, role_choice) {
            Ok(session) => session,
            Err(err) => {
                info!("event=login module=session status=rejected reason={err}");
                return Err(err.into());
            }
        };

        save_record(&self.gateway, StorageKey::Session, &session)?;
        info!(
            "event=login module=session status=ok role={}",
            session.role.as_str()
        );
        self.current = Some(session.clone());
        Ok(session)
    }

    /// Drops the current session and its persisted record.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        if let Err(err) = self.gateway.remove(StorageKey::Session) {
            warn!("event=logout module=session status=error error={err}");
            return Err(err.into());
        }
        if self.current.take().is_some() {
            info!("event=logout module=session status=ok");
        }
        Ok(())
    }
}
