//! Test doubles shared by unit tests across modules.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::oneshot;

use crate::auth::{
    AuthBackend, AuthError, AuthResult, AuthSession, AuthUser, SessionPersistence, SignUpOutcome,
};

/// Serve exactly one canned response; the raw request is sent back through
/// the returned receiver.
pub async fn spawn_one_shot_server(
    status_line: &str,
    body: &str,
) -> (String, oneshot::Receiver<String>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let address = listener.local_addr().expect("local address");
    let response = format!(
        "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let (request_tx, request_rx) = oneshot::channel();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let request = read_request(&mut socket).await;
            let _ = request_tx.send(request);
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    (format!("http://{address}"), request_rx)
}

/// Read headers plus `content-length` bytes of body.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut raw = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        let read = socket.read(&mut chunk).await.unwrap_or(0);
        if read == 0 {
            break;
        }
        raw.extend_from_slice(&chunk[..read]);
        let text = String::from_utf8_lossy(&raw).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if raw.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&raw).to_string()
}

#[derive(Clone, Default)]
pub struct MemorySessionStore {
    session: Arc<Mutex<Option<String>>>,
}

impl MemorySessionStore {
    pub fn stored(&self) -> Option<AuthSession> {
        self.load_session().ok().flatten()
    }
}

impl SessionPersistence for MemorySessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        let guard = self
            .session
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        guard
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(Into::into)
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let raw = serde_json::to_string(session)?;
        *self
            .session
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))? = Some(raw);
        Ok(())
    }

    fn clear_session(&self) -> AuthResult<()> {
        *self
            .session
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))? = None;
        Ok(())
    }
}

/// Auth service double that answers with the same messages Supabase uses.
#[derive(Clone, Default)]
pub struct FakeAuthBackend {
    accounts: Arc<Mutex<HashMap<String, (String, AuthUser)>>>,
    persisted: MemorySessionStore,
    offline: Arc<AtomicBool>,
    require_confirmation: Arc<AtomicBool>,
    fail_sign_out: Arc<AtomicBool>,
    remote_calls: Arc<AtomicUsize>,
}

impl FakeAuthBackend {
    pub fn with_account(email: &str, password: &str) -> Self {
        let backend = Self::default();
        backend.register(email, password);
        backend
    }

    pub fn register(&self, email: &str, password: &str) -> AuthUser {
        let mut accounts = self.accounts.lock().expect("accounts lock");
        let user = AuthUser {
            id: format!("user-{}", accounts.len() + 1),
            email: Some(email.to_string()),
            created_at: Some(Utc::now()),
        };
        accounts.insert(email.to_string(), (password.to_string(), user.clone()));
        user
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_require_confirmation(&self, required: bool) {
        self.require_confirmation.store(required, Ordering::SeqCst);
    }

    pub fn set_fail_sign_out(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    pub fn persisted(&self) -> Option<AuthSession> {
        self.persisted.stored()
    }

    pub fn remote_calls(&self) -> usize {
        self.remote_calls.load(Ordering::SeqCst)
    }

    fn begin_remote_call(&self) -> AuthResult<()> {
        self.remote_calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(AuthError::Api {
                status: 503,
                message: "Failed to fetch".to_string(),
            });
        }
        Ok(())
    }

    fn session_for(user: AuthUser) -> AuthSession {
        AuthSession {
            access_token: format!("access-{}", user.id),
            refresh_token: format!("refresh-{}", user.id),
            expires_at: Utc::now().timestamp() + 3600,
            user,
        }
    }
}

impl AuthBackend for FakeAuthBackend {
    async fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        self.persisted.load_session()
    }

    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignUpOutcome> {
        self.begin_remote_call()?;
        if self.accounts.lock().expect("accounts lock").contains_key(email) {
            return Err(AuthError::Api {
                status: 422,
                message: "User already registered".to_string(),
            });
        }
        let user = self.register(email, password);
        if self.require_confirmation.load(Ordering::SeqCst) {
            return Ok(SignUpOutcome::ConfirmationRequired);
        }
        let session = Self::session_for(user);
        self.persisted.save_session(&session)?;
        Ok(SignUpOutcome::SignedIn(session))
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        self.begin_remote_call()?;
        let accounts = self.accounts.lock().expect("accounts lock").clone();
        match accounts.get(email) {
            Some((expected, user)) if expected == password => {
                let session = Self::session_for(user.clone());
                self.persisted.save_session(&session)?;
                Ok(session)
            }
            _ => Err(AuthError::Api {
                status: 400,
                message: "Invalid login credentials".to_string(),
            }),
        }
    }

    async fn sign_out(&self, _access_token: &str) -> AuthResult<()> {
        self.begin_remote_call()?;
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(AuthError::Api {
                status: 500,
                message: "logout failed".to_string(),
            });
        }
        self.persisted.clear_session()
    }

    fn discard_session(&self) -> AuthResult<()> {
        self.persisted.clear_session()
    }
}
