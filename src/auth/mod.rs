//! Authenticated sessions and the role gate.
//!
//! A `Session` is created by sign-in and passed explicitly to every workflow
//! that needs it. Nothing reads session state from a global.

mod forms;
mod service;

pub use forms::{LoginForm, RegistrationForm};
pub use service::{AuthService, SignIn};

use chrono::{DateTime, Duration, Utc};

use crate::errors::AppError;
use crate::models::UserAccount;

/// Lifetime granted to a token at sign-in.
pub const SESSION_TTL_MINUTES: i64 = 131_400;

pub const TOKEN_TYPE: &str = "Bearer";

/// Roles allowed to author posts.
pub const POST_EDITOR_ROLES: &[&str] = &["admin", "super-admin"];

/// A signed-in user and the token that authenticates their API calls.
#[derive(Clone)]
pub struct Session {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserAccount,
    roles: Vec<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user.email)
            .field("roles", &self.roles)
            .field("expires_at", &self.expires_at)
            .field("token", &"<present>")
            .finish()
    }
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserAccount, issued_at: DateTime<Utc>) -> Self {
        let roles = user.role_names();
        Self {
            token: token.into(),
            token_type: TOKEN_TYPE.to_string(),
            expires_at: issued_at + Duration::minutes(SESSION_TTL_MINUTES),
            user,
            roles,
        }
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn has_any_role(&self, allowed: &[&str]) -> bool {
        self.roles.iter().any(|r| allowed.contains(&r.as_str()))
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Access-control gate. Not retryable: callers redirect away on failure.
pub fn authorize(session: &Session, allowed: &[&str], now: DateTime<Utc>) -> Result<(), AppError> {
    if session.is_expired_at(now) {
        return Err(AppError::Authorization("Session has expired".to_string()));
    }
    if !session.has_any_role(allowed) {
        return Err(AppError::Authorization(format!(
            "Requires one of the roles: {}",
            allowed.join(", ")
        )));
    }
    Ok(())
}
