//! Post-authentication callback URLs.

use url::Url;

fn is_absolute_http_url(path: &str) -> bool {
    let lower = path.get(..8).unwrap_or(path).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolve a callback path against the frontend origin.
///
/// Absolute http(s) URLs, or a missing origin (no browser context), leave
/// the path unchanged.
pub fn build_frontend_callback_url(path: &str, origin: Option<&Url>) -> String {
    if is_absolute_http_url(path) {
        return path.to_string();
    }

    match origin {
        Some(origin) => origin
            .join(path)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| path.to_string()),
        None => path.to_string(),
    }
}
