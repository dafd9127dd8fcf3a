//! Session context: who is signed in, shared explicitly with every page.
//!
//! The context starts in [`SessionState::Loading`] until [`SessionContext::restore`]
//! has looked for a persisted session. Subscribers receive every transition
//! through a `tokio::sync::watch` channel.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::auth::{
    validate_credentials, AuthBackend, AuthFailure, AuthSession, AuthUser, SignUpOutcome,
};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Anonymous,
    Authenticated(AuthUser),
}

impl SessionState {
    pub const fn user(&self) -> Option<&AuthUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Loading | Self::Anonymous => None,
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

pub struct SessionContext<A: AuthBackend> {
    backend: A,
    state: watch::Sender<SessionState>,
    session: Mutex<Option<AuthSession>>,
}

impl<A: AuthBackend> SessionContext<A> {
    pub fn new(backend: A) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self {
            backend,
            state,
            session: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.state.borrow().user().cloned()
    }

    /// Bearer token for data calls made on behalf of the current user.
    pub fn access_token(&self) -> Option<String> {
        self.lock_session()
            .as_ref()
            .map(|session| session.access_token.clone())
    }

    /// The signed-in user, or [`Error::NotSignedIn`] for gated pages.
    pub fn require_user(&self) -> Result<AuthUser> {
        self.current_user().ok_or(Error::NotSignedIn)
    }

    /// Resolve the initial state from any persisted session.
    ///
    /// Never fails: a broken or expired session degrades to anonymous.
    pub async fn restore(&self) -> SessionState {
        match self.backend.restore_session().await {
            Ok(Some(session)) => {
                tracing::info!(user_id = %session.user.id, "Restored session");
                self.establish(session);
            }
            Ok(None) => {
                tracing::debug!("No persisted session");
                self.publish(SessionState::Anonymous);
            }
            Err(error) => {
                tracing::warn!("Failed to restore session: {}", error);
                self.publish(SessionState::Anonymous);
            }
        }
        self.state()
    }

    /// Credentials are validated locally before the backend is called.
    pub async fn sign_in(&self, email: &str, password: &str) -> std::result::Result<AuthUser, AuthFailure> {
        validate_credentials(email, password)?;
        match self.backend.sign_in(email, password).await {
            Ok(session) => {
                let user = session.user.clone();
                self.establish(session);
                Ok(user)
            }
            Err(error) => {
                tracing::warn!("Sign in failed: {}", error);
                Err(AuthFailure::from_sign_in(&error))
            }
        }
    }

    /// Create an account. A service that answers without a session (email
    /// confirmation pending) leaves the context anonymous.
    pub async fn sign_up(&self, email: &str, password: &str) -> std::result::Result<AuthUser, AuthFailure> {
        validate_credentials(email, password)?;
        match self.backend.sign_up(email, password).await {
            Ok(SignUpOutcome::SignedIn(session)) => {
                let user = session.user.clone();
                self.establish(session);
                Ok(user)
            }
            Ok(SignUpOutcome::ConfirmationRequired) => {
                tracing::info!("Sign up requires email confirmation");
                Err(AuthFailure::EmailNotConfirmed)
            }
            Err(error) => {
                tracing::warn!("Sign up failed: {}", error);
                Err(AuthFailure::from_sign_up(&error))
            }
        }
    }

    /// Drop the identity first, then tell the service.
    pub async fn sign_out(&self) {
        let session = self.lock_session().take();
        self.publish(SessionState::Anonymous);
        tracing::info!("Signed out");

        let Some(session) = session else {
            return;
        };
        if let Err(error) = self.backend.sign_out(&session.access_token).await {
            tracing::warn!("Remote sign out failed: {}", error);
            if let Err(error) = self.backend.discard_session() {
                tracing::warn!("Failed to clear persisted session: {}", error);
            }
        }
    }

    fn establish(&self, session: AuthSession) {
        let user = session.user.clone();
        *self.lock_session() = Some(session);
        tracing::info!(user_id = %user.id, "Session established");
        self.publish(SessionState::Authenticated(user));
    }

    fn publish(&self, state: SessionState) {
        self.state.send_replace(state);
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<AuthSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ValidationError;
    use crate::testing::FakeAuthBackend;

    const EMAIL: &str = "student@example.com";
    const PASSWORD: &str = "secret1";

    #[tokio::test]
    async fn starts_loading_then_anonymous_without_persisted_session() {
        let context = SessionContext::new(FakeAuthBackend::default());
        assert!(context.state().is_loading());

        assert_eq!(context.restore().await, SessionState::Anonymous);
        assert!(matches!(context.require_user(), Err(Error::NotSignedIn)));
    }

    #[tokio::test]
    async fn restore_picks_up_persisted_session() {
        let backend = FakeAuthBackend::with_account(EMAIL, PASSWORD);
        let context = SessionContext::new(backend.clone());
        context.sign_in(EMAIL, PASSWORD).await.unwrap();

        let restored = SessionContext::new(backend);
        let state = restored.restore().await;
        assert_eq!(
            state.user().and_then(|user| user.email.as_deref()),
            Some(EMAIL)
        );
        assert!(restored.access_token().is_some());
    }

    #[tokio::test]
    async fn sign_in_notifies_subscribers() {
        let context = SessionContext::new(FakeAuthBackend::with_account(EMAIL, PASSWORD));
        context.restore().await;
        let mut updates = context.subscribe();

        let user = context.sign_in(EMAIL, PASSWORD).await.unwrap();
        assert!(updates.has_changed().unwrap());
        assert_eq!(
            *updates.borrow_and_update(),
            SessionState::Authenticated(user.clone())
        );
        assert_eq!(context.require_user().unwrap(), user);
    }

    #[tokio::test]
    async fn sign_in_with_wrong_password_is_classified() {
        let context = SessionContext::new(FakeAuthBackend::with_account(EMAIL, PASSWORD));
        context.restore().await;

        let failure = context.sign_in(EMAIL, "wrong-password").await.unwrap_err();
        assert_eq!(failure, AuthFailure::InvalidCredentials);
        assert_eq!(context.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_service() {
        let backend = FakeAuthBackend::default();
        let context = SessionContext::new(backend.clone());

        let failure = context.sign_in("not-an-email", PASSWORD).await.unwrap_err();
        assert_eq!(failure, AuthFailure::Validation(ValidationError::InvalidEmail));
        let failure = context.sign_up(EMAIL, "12345").await.unwrap_err();
        assert_eq!(
            failure,
            AuthFailure::Validation(ValidationError::PasswordTooShort(6))
        );
        assert_eq!(backend.remote_calls(), 0);
    }

    #[tokio::test]
    async fn offline_service_reports_connection_failure() {
        let backend = FakeAuthBackend::with_account(EMAIL, PASSWORD);
        backend.set_offline(true);
        let context = SessionContext::new(backend);

        assert_eq!(
            context.sign_in(EMAIL, PASSWORD).await.unwrap_err(),
            AuthFailure::Connection
        );
    }

    #[tokio::test]
    async fn sign_up_signs_in_immediately() {
        let context = SessionContext::new(FakeAuthBackend::default());
        context.restore().await;

        let user = context.sign_up(EMAIL, PASSWORD).await.unwrap();
        assert_eq!(user.email.as_deref(), Some(EMAIL));
        assert_eq!(context.state(), SessionState::Authenticated(user));
    }

    #[tokio::test]
    async fn duplicate_sign_up_is_already_registered() {
        let context = SessionContext::new(FakeAuthBackend::with_account(EMAIL, PASSWORD));

        assert_eq!(
            context.sign_up(EMAIL, PASSWORD).await.unwrap_err(),
            AuthFailure::AlreadyRegistered
        );
    }

    #[tokio::test]
    async fn sign_up_awaiting_confirmation_stays_anonymous() {
        let backend = FakeAuthBackend::default();
        backend.set_require_confirmation(true);
        let context = SessionContext::new(backend);
        context.restore().await;

        assert_eq!(
            context.sign_up(EMAIL, PASSWORD).await.unwrap_err(),
            AuthFailure::EmailNotConfirmed
        );
        assert_eq!(context.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn sign_out_clears_identity_even_when_remote_fails() {
        let backend = FakeAuthBackend::with_account(EMAIL, PASSWORD);
        backend.set_fail_sign_out(true);
        let context = SessionContext::new(backend.clone());
        context.sign_in(EMAIL, PASSWORD).await.unwrap();
        assert!(backend.persisted().is_some());

        context.sign_out().await;

        assert_eq!(context.state(), SessionState::Anonymous);
        assert!(context.access_token().is_none());
        assert!(backend.persisted().is_none());
    }

    #[tokio::test]
    async fn sign_out_while_anonymous_skips_the_service() {
        let backend = FakeAuthBackend::default();
        let context = SessionContext::new(backend.clone());
        context.restore().await;

        context.sign_out().await;
        assert_eq!(context.state(), SessionState::Anonymous);
        assert_eq!(backend.remote_calls(), 0);
    }
}
