use crate::selector::Target;
use crate::Result;
use async_trait::async_trait;
use sipd_core::session::CookieRecord;
use std::path::PathBuf;
use std::time::Duration;

/// A file the browser finished downloading into the staging directory.
///
/// The workflow owns it from here: move it to its deterministic output
/// path, after which the staged copy is gone.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub path: PathBuf,
    /// Name the portal suggested; kept for logging, not for naming.
    pub suggested_name: String,
}

/// Everything a workflow is allowed to do to the portal page.
///
/// One implementation drives Chrome over CDP; tests substitute a scripted
/// fake. All waits are bounded by the caller-supplied timeout and fail
/// with `Error::Timeout` when it expires.
#[async_trait]
pub trait PortalDriver: Send + Sync {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<()>;

    async fn current_url(&self) -> Result<String>;

    async fn reload(&self) -> Result<()>;

    /// Raise the browser window so the operator can see the page.
    async fn bring_to_front(&self) -> Result<()>;

    /// Wait until the target is rendered on the page.
    async fn wait_visible(&self, target: &Target, timeout: Duration) -> Result<()>;

    /// Whether the target is attached to the DOM within the timeout.
    /// Absence is an answer here, not an error.
    async fn is_attached(&self, target: &Target, timeout: Duration) -> bool;

    async fn click(&self, target: &Target, timeout: Duration) -> Result<()>;

    async fn type_text(&self, target: &Target, text: &str, timeout: Duration) -> Result<()>;

    /// Empty an input that already holds text (retyping a flaky
    /// autocomplete requires a clean field).
    async fn clear_input(&self, target: &Target, timeout: Duration) -> Result<()>;

    async fn press_key(&self, target: &Target, key: &str, timeout: Duration) -> Result<()>;

    /// How many elements currently match, without waiting.
    async fn count(&self, target: &Target) -> Result<usize>;

    async fn scroll_into_view(&self, target: &Target, timeout: Duration) -> Result<()>;

    /// Wait until the page URL contains the fragment (route changes in the
    /// portal's SPA never reload the page).
    async fn wait_for_url_contains(&self, fragment: &str, timeout: Duration) -> Result<()>;

    /// Click the target and wait for the download it starts to finish.
    async fn download_via(&self, target: &Target, timeout: Duration) -> Result<DownloadedFile>;

    async fn cookies(&self) -> Result<Vec<CookieRecord>>;

    async fn set_cookies(&self, cookies: &[CookieRecord]) -> Result<()>;
}
