//! User-facing classification of sign-in and sign-up failures.
//!
//! The service reports most failures as free text, so classification matches
//! on the lower-cased message the same way for every front end.

use thiserror::Error;

use super::AuthError;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Unable to connect to the server. Please check your internet connection and try again.")]
    Connection,
    #[error("Invalid email or password. Please check your credentials or sign up for a new account.")]
    InvalidCredentials,
    #[error("Please confirm your email before signing in.")]
    EmailNotConfirmed,
    #[error("This email is already registered. Please sign in instead.")]
    AlreadyRegistered,
    #[error("Password must be at least 6 characters long.")]
    WeakPassword,
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    SignIn,
    SignUp,
}

impl AuthFailure {
    pub fn from_sign_in(error: &AuthError) -> Self {
        classify(error, Flow::SignIn)
    }

    pub fn from_sign_up(error: &AuthError) -> Self {
        classify(error, Flow::SignUp)
    }
}

fn classify(error: &AuthError, flow: Flow) -> AuthFailure {
    let message = match error {
        AuthError::Validation(validation) => return AuthFailure::Validation(validation.clone()),
        AuthError::Http(http) if http.is_connect() || http.is_timeout() || http.is_request() => {
            return AuthFailure::Connection;
        }
        AuthError::Api { message, .. } => message.clone(),
        other => other.to_string(),
    };
    let lowered = message.to_lowercase();

    if ["connection", "network", "fetch"]
        .iter()
        .any(|needle| lowered.contains(needle))
    {
        return AuthFailure::Connection;
    }

    match flow {
        Flow::SignIn => {
            if lowered.contains("invalid login credentials")
                || lowered.contains("invalid email or password")
            {
                AuthFailure::InvalidCredentials
            } else if lowered.contains("email not confirmed") {
                AuthFailure::EmailNotConfirmed
            } else {
                AuthFailure::Other(fallback_message(&message, "An error occurred during sign in."))
            }
        }
        Flow::SignUp => {
            if lowered.contains("already registered") || lowered.contains("already been registered")
            {
                AuthFailure::AlreadyRegistered
            } else if lowered.contains("password") {
                AuthFailure::WeakPassword
            } else {
                AuthFailure::Other(fallback_message(&message, "An error occurred during sign up."))
            }
        }
    }
}

fn fallback_message(message: &str, default: &str) -> String {
    if message.trim().is_empty() {
        default.to_string()
    } else {
        message.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(message: &str) -> AuthError {
        AuthError::Api {
            status: 400,
            message: message.to_string(),
        }
    }

    #[test]
    fn sign_in_failures_are_classified() {
        assert_eq!(
            AuthFailure::from_sign_in(&api("Invalid login credentials")),
            AuthFailure::InvalidCredentials
        );
        assert_eq!(
            AuthFailure::from_sign_in(&api("Email not confirmed")),
            AuthFailure::EmailNotConfirmed
        );
        assert_eq!(
            AuthFailure::from_sign_in(&api("TypeError: Failed to fetch")),
            AuthFailure::Connection
        );
        assert_eq!(
            AuthFailure::from_sign_in(&api("Too many requests")),
            AuthFailure::Other("Too many requests".to_string())
        );
    }

    #[test]
    fn sign_up_failures_are_classified() {
        assert_eq!(
            AuthFailure::from_sign_up(&api("User already registered")),
            AuthFailure::AlreadyRegistered
        );
        assert_eq!(
            AuthFailure::from_sign_up(&api("A user with this email address has already been registered")),
            AuthFailure::AlreadyRegistered
        );
        assert_eq!(
            AuthFailure::from_sign_up(&api("Password should be at least 6 characters")),
            AuthFailure::WeakPassword
        );
    }

    #[test]
    fn password_wording_only_matters_for_sign_up() {
        assert!(matches!(
            AuthFailure::from_sign_in(&api("Password is too weak")),
            AuthFailure::Other(_)
        ));
    }

    #[test]
    fn validation_errors_pass_through() {
        let error = AuthError::Validation(ValidationError::InvalidEmail);
        assert_eq!(
            AuthFailure::from_sign_in(&error),
            AuthFailure::Validation(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn each_class_has_a_distinct_message() {
        let messages = [
            AuthFailure::Connection,
            AuthFailure::InvalidCredentials,
            AuthFailure::EmailNotConfirmed,
            AuthFailure::AlreadyRegistered,
            AuthFailure::WeakPassword,
        ]
        .iter()
        .map(ToString::to_string)
        .collect::<std::collections::HashSet<_>>();
        assert_eq!(messages.len(), 5);
    }
}
