use serde::{Deserialize, Serialize};

/// One browser cookie, persisted in the session file.
///
/// The JSON keys match what the portal's browser session produces
/// (`httpOnly`, `sameSite`), so a saved file can be injected back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    /// Unix timestamp in seconds; negative for session-only cookies.
    pub expires: f64,
    #[serde(rename = "httpOnly")]
    pub http_only: bool,
    pub secure: bool,
    #[serde(rename = "sameSite", skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
}

impl CookieRecord {
    /// True for cookies that live only as long as the browser session.
    pub fn is_session_cookie(&self) -> bool {
        self.expires < 0.0
    }
}
