//! Authentication - login, logout, sessions
//!
//! The auth layer owns login state. The domain Customer contributes
//! only an identifier and an opaque credential; the Session carries
//! the logged-in flag.

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use chrono::{DateTime, Utc};
use minibank_persistence::{AdminRecord, AuditKind};

/// Manager credentials. The stock deployment seeds `admin`/`admin`.
#[derive(Debug, Clone)]
pub struct ManagerCredentials {
    pub username: String,
    pub password: String,
}

impl Default for ManagerCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

/// Authenticated role
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Manager,
    Customer(String),
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Customer(_) => "customer",
        }
    }
}

/// Login session
#[derive(Debug, Clone)]
pub struct Session {
    role: Role,
    started_at: DateTime<Utc>,
    logged_in: bool,
}

impl Session {
    fn new(role: Role) -> Self {
        Self {
            role,
            started_at: Utc::now(),
            logged_in: true,
        }
    }

    /// Role of the authenticated user
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Login status
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Session start time
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

/// Auth Service - authenticates credentials against the manager
/// configuration and the ledger
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
    manager: ManagerCredentials,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext, manager: ManagerCredentials) -> Self {
        Self { ctx, manager }
    }

    /// Authenticate a username/password pair.
    ///
    /// Unknown users and wrong passwords both answer
    /// `InvalidCredentials` - no username probing.
    pub fn login(&self, username: &str, password: &str) -> BusinessResult<Session> {
        if username == self.manager.username {
            if password == self.manager.password {
                // The manager's own record is (re)written on login
                self.ctx
                    .store()
                    .persist_admin(&AdminRecord::new(username, password))?;
                self.ctx.record_audit(AuditKind::Login, username, None, None)?;
                tracing::info!(username, "manager logged in");
                return Ok(Session::new(Role::Manager));
            }
            return Err(BusinessError::InvalidCredentials.into());
        }

        match self.ctx.ledger().find(username) {
            Some(customer) if customer.verify_password(password) => {
                self.ctx.record_audit(AuditKind::Login, username, None, None)?;
                tracing::info!(username, "customer logged in");
                Ok(Session::new(Role::Customer(username.to_string())))
            }
            _ => Err(BusinessError::InvalidCredentials.into()),
        }
    }

    /// End a session
    pub fn logout(&self, session: &mut Session) -> BusinessResult<()> {
        session.logged_in = false;
        let actor = match session.role() {
            Role::Manager => self.manager.username.clone(),
            Role::Customer(username) => username.clone(),
        };
        self.ctx.record_audit(AuditKind::Logout, &actor, None, None)?;
        tracing::info!(%actor, "logged out");
        Ok(())
    }
}
