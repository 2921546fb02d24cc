//! Email/password accounts and session tokens.
//!
//! Passwords are kept as Argon2 PHC strings. Sessions are opaque random
//! tokens with a fixed lifetime; expired ones are swept whenever a new
//! session is issued.

mod error;

pub use error::AuthError;

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use gymkit_types::{SessionResponse, SignInRequest, SignUpRequest, User};

pub const MIN_PASSWORD_LENGTH: usize = 8;
const DEFAULT_SESSION_DAYS: i64 = 7;

struct StoredUser {
    user: User,
    /// Argon2 PHC string, salt included.
    password_hash: String,
}

#[derive(Clone)]
struct Session {
    email: String,
    expires_at: DateTime<Utc>,
}

pub struct AuthService {
    /// Keyed by lowercase email.
    users: DashMap<String, StoredUser>,
    /// Keyed by session token.
    sessions: DashMap<String, Session>,
    session_ttl: Duration,
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new(Duration::days(DEFAULT_SESSION_DAYS))
    }
}

impl AuthService {
    pub fn new(session_ttl: Duration) -> Self {
        Self {
            users: DashMap::new(),
            sessions: DashMap::new(),
            session_ttl,
        }
    }

    pub fn sign_up(&self, request: SignUpRequest) -> Result<SessionResponse, AuthError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AuthError::Validation("name is required".to_string()));
        }
        let email = normalize_email(&request.email)?;
        if request.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        if self.users.contains_key(&email) {
            return Err(AuthError::UserAlreadyExists);
        }
        let password_hash = hash_password(&request.password)?;

        let user = match self.users.entry(email.clone()) {
            Entry::Occupied(_) => return Err(AuthError::UserAlreadyExists),
            Entry::Vacant(slot) => {
                let user = User {
                    id: uuid::Uuid::new_v4().to_string(),
                    name: name.to_string(),
                    email,
                    created_at: Utc::now(),
                };
                slot.insert(StoredUser {
                    user: user.clone(),
                    password_hash,
                });
                user
            }
        };

        tracing::info!("Registered user {}", user.id);
        Ok(self.issue_session(user))
    }

    pub fn sign_in(&self, request: SignInRequest) -> Result<SessionResponse, AuthError> {
        let email = request.email.trim().to_ascii_lowercase();

        let (user, password_hash) = self
            .users
            .get(&email)
            .map(|stored| (stored.user.clone(), stored.password_hash.clone()))
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&request.password, &password_hash)? {
            tracing::debug!("Rejected sign-in for {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        Ok(self.issue_session(user))
    }

    /// Resolve a token to its live session. Expired tokens are dropped.
    pub fn session(&self, token: &str) -> Option<SessionResponse> {
        let session = self.sessions.get(token).map(|s| s.clone())?;

        if session.expires_at <= Utc::now() {
            self.sessions.remove(token);
            return None;
        }

        let user = self.users.get(&session.email).map(|u| u.user.clone())?;
        Some(SessionResponse {
            token: token.to_string(),
            user,
            expires_at: session.expires_at,
            url: None,
        })
    }

    /// Returns whether a session was removed.
    pub fn sign_out(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Number of stored sessions, live or not yet swept.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop every expired session. Returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let before = self.sessions.len();
        let now = Utc::now();
        self.sessions.retain(|_, session| session.expires_at > now);
        before.saturating_sub(self.sessions.len())
    }

    fn issue_session(&self, user: User) -> SessionResponse {
        let swept = self.sweep_expired();
        if swept > 0 {
            tracing::debug!("Swept {} expired sessions", swept);
        }

        let token = uuid::Uuid::new_v4().simple().to_string();
        let expires_at = Utc::now() + self.session_ttl;
        self.sessions.insert(
            token.clone(),
            Session {
                email: user.email.clone(),
                expires_at,
            },
        );
        SessionResponse {
            token,
            user,
            expires_at,
            url: None,
        }
    }
}

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_ascii_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AuthError::Validation("a valid email is required".to_string())),
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Crypto(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("Failed to parse password hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(format!("Password verification failed: {}", e))),
    }
}
