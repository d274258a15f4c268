//! Sign-in and registration flows.

use std::sync::Arc;

use chrono::Utc;

use super::{LoginForm, RegistrationForm, Session};
use crate::api::CmsApi;
use crate::errors::AppError;
use crate::models::{AuthPayload, Route};
use crate::notify::Notifier;

/// Result of a successful sign-in: the new session and where to go next.
#[derive(Debug, Clone)]
pub struct SignIn {
    pub session: Session,
    pub redirect: Route,
}

pub struct AuthService<A> {
    api: Arc<A>,
    notifier: Arc<dyn Notifier>,
}

impl<A: CmsApi> AuthService<A> {
    pub fn new(api: Arc<A>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    /// Users who have not finished onboarding are sent there first.
    pub async fn login(&self, form: &LoginForm) -> Result<SignIn, AppError> {
        form.validate()?;

        let reply = self
            .api
            .login(&form.to_request())
            .await
            .map_err(|e| self.rejected(e))?;

        let session = self.open_session(reply.data);
        let redirect = if session.user.onboarding_complete() {
            Route::Home
        } else {
            Route::Onboarding
        };

        Ok(SignIn { session, redirect })
    }

    pub async fn register(&self, form: &RegistrationForm) -> Result<SignIn, AppError> {
        form.validate()?;

        let reply = self
            .api
            .register(&form.to_request())
            .await
            .map_err(|e| self.rejected(e))?;

        Ok(SignIn {
            session: self.open_session(reply.data),
            redirect: Route::Onboarding,
        })
    }

    fn open_session(&self, payload: AuthPayload) -> Session {
        let session = Session::new(payload.token, payload.user, Utc::now());
        tracing::info!(
            user = %session.user.email,
            roles = ?session.roles(),
            "Signed in"
        );
        session
    }

    fn rejected(&self, err: crate::errors::ApiError) -> AppError {
        let err = AppError::submission(err);
        self.notifier.error(&err.message());
        err
    }
}
