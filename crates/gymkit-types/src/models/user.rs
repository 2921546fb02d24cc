//! Account payloads for the auth API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cookie carrying the session token. Browsers on HTTPS may see it with a
/// `__Secure-` prefix.
pub const SESSION_COOKIE_NAME: &str = "better-auth.session_token";

/// Public view of a registered member. Never carries credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Where the frontend should land afterwards, relative to its origin.
    #[serde(default, rename = "callbackURL", skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    #[serde(default, rename = "callbackURL", skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// Returned by sign-in, sign-up and `get-session`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
    /// Resolved `callbackURL`, present only when the request carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
