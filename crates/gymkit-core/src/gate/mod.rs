//! Access gate.
//!
//! Decides per navigation whether a request proceeds or is sent to the
//! sign-in page. This is a presence check on the session cookie and a UX
//! redirect only: it never validates the token. Every API handler behind the
//! gate must still authorize the request against the session store.

mod middleware;

pub use middleware::{access_gate_middleware, has_session_cookie, session_cookie_value};

use gymkit_types::SESSION_COOKIE_NAME;
use regex::Regex;
use std::sync::OnceLock;

static STATIC_FILE_REGEX: OnceLock<Regex> = OnceLock::new();

pub const DEFAULT_SIGN_IN_PATH: &str = "/auth";
pub const DEFAULT_AUTH_API_PREFIX: &str = "/api/auth";
pub const DEFAULT_ASSET_PREFIX: &str = "/_next";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Continue,
    RedirectTo(String),
}

#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Public sign-in page; everything nested under it is public too.
    pub sign_in_path: String,
    /// Auth endpoints, reachable without a session.
    pub auth_api_prefix: String,
    /// Framework asset prefix.
    pub asset_prefix: String,
    pub session_cookie_name: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            sign_in_path: DEFAULT_SIGN_IN_PATH.to_string(),
            auth_api_prefix: DEFAULT_AUTH_API_PREFIX.to_string(),
            asset_prefix: DEFAULT_ASSET_PREFIX.to_string(),
            session_cookie_name: SESSION_COOKIE_NAME.to_string(),
        }
    }
}

impl GateConfig {
    /// First matching rule wins.
    pub fn decide(&self, pathname: &str, has_session_cookie: bool) -> GateDecision {
        if self.is_asset(pathname)
            || is_static_file(pathname)
            || self.is_auth_api(pathname)
            || self.is_public(pathname)
        {
            return GateDecision::Continue;
        }

        if has_session_cookie {
            GateDecision::Continue
        } else {
            GateDecision::RedirectTo(self.sign_in_path.clone())
        }
    }

    fn is_asset(&self, pathname: &str) -> bool {
        pathname.starts_with(&self.asset_prefix)
    }

    fn is_auth_api(&self, pathname: &str) -> bool {
        pathname.starts_with(&self.auth_api_prefix)
    }

    fn is_public(&self, pathname: &str) -> bool {
        pathname == self.sign_in_path
            || pathname
                .strip_prefix(&self.sign_in_path)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

fn static_file_regex() -> &'static Regex {
    STATIC_FILE_REGEX
        .get_or_init(|| Regex::new(r"\.[A-Za-z0-9]+$").expect("Static file regex is valid"))
}

/// Trailing `.` followed by one or more ASCII alphanumerics.
fn is_static_file(pathname: &str) -> bool {
    static_file_regex().is_match(pathname)
}
