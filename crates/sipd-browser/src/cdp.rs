use crate::download;
use crate::driver::{DownloadedFile, PortalDriver};
use crate::selector::Target;
use crate::{Error, Result};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::network::{
    Cookie, CookieParam, CookieSameSite, TimeSinceEpoch,
};
use chromiumoxide::{Element, Page};
use sipd_core::session::CookieRecord;
use std::path::PathBuf;
use std::time::Duration;

/// How often bounded waits re-query the DOM.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Wait budget for elements the workflow expects to already be on screen.
const INTERACT_WAIT: Duration = Duration::from_secs(10);

/// CDP-backed [`PortalDriver`].
///
/// Holds a clone of the session's page, so workflow futures stay
/// independent of the session that owns the browser process.
#[derive(Clone)]
pub struct CdpDriver {
    page: Page,
    staging: PathBuf,
}

impl CdpDriver {
    pub(crate) fn new(page: Page, staging: PathBuf) -> Self {
        Self { page, staging }
    }

    /// Single DOM query for the target, no waiting.
    async fn resolve(&self, target: &Target) -> Result<Element> {
        let candidates = self.page.find_elements(target.css.as_ref()).await?;

        let container = match &target.text {
            Some(text) => {
                // Earliest rendered matches win; stop once we have enough
                // to satisfy the index.
                let mut matched = Vec::new();
                for el in candidates {
                    if let Ok(Some(rendered)) = el.inner_text().await {
                        if rendered.contains(text.as_ref()) {
                            matched.push(el);
                            if matched.len() > target.index {
                                break;
                            }
                        }
                    }
                }
                matched.into_iter().nth(target.index)
            }
            None => candidates.into_iter().nth(target.index),
        };
        let container = container.ok_or_else(|| Error::NotFound(target.to_string()))?;

        match &target.child {
            Some(child) => {
                let children = container
                    .find_elements(child.as_ref())
                    .await
                    .map_err(|_| Error::NotFound(target.to_string()))?;
                children
                    .into_iter()
                    .nth(target.child_index)
                    .ok_or_else(|| Error::NotFound(target.to_string()))
            }
            None => Ok(container),
        }
    }

    /// Poll for the target until it resolves or the timeout expires.
    async fn wait_for(&self, target: &Target, timeout: Duration) -> Result<Element> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            match self.resolve(target).await {
                Ok(el) => return Ok(el),
                Err(_) if tokio::time::Instant::now() < deadline => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
                Err(_) => {
                    return Err(Error::Timeout(format!(
                        "after {}s waiting for {}",
                        timeout.as_secs(),
                        target
                    )));
                }
            }
        }
    }
}

#[async_trait]
impl PortalDriver for CdpDriver {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        tokio::time::timeout(timeout, async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<(), Error>(())
        })
        .await
        .map_err(|_| Error::Timeout(format!("after {}s loading {}", timeout.as_secs(), url)))?
    }

    async fn current_url(&self) -> Result<String> {
        self.page
            .url()
            .await?
            .ok_or_else(|| Error::Cdp("page has no URL".to_string()))
    }

    async fn reload(&self) -> Result<()> {
        tracing::debug!("Reloading page");
        self.page.reload().await?;
        Ok(())
    }

    async fn bring_to_front(&self) -> Result<()> {
        self.page.bring_to_front().await?;
        Ok(())
    }

    async fn wait_visible(&self, target: &Target, timeout: Duration) -> Result<()> {
        self.wait_for(target, timeout).await.map(|_| ())
    }

    async fn is_attached(&self, target: &Target, timeout: Duration) -> bool {
        self.wait_for(target, timeout).await.is_ok()
    }

    async fn click(&self, target: &Target, timeout: Duration) -> Result<()> {
        let el = self.wait_for(target, timeout).await?;
        el.click().await?;
        Ok(())
    }

    async fn type_text(&self, target: &Target, text: &str, timeout: Duration) -> Result<()> {
        let el = self.wait_for(target, timeout).await?;
        el.click().await?;
        el.type_str(text).await?;
        Ok(())
    }

    async fn clear_input(&self, target: &Target, timeout: Duration) -> Result<()> {
        let el = self.wait_for(target, timeout).await?;
        el.click().await?;
        // Clear through the DOM so the portal's framework sees an input
        // event, the same as select-all-and-delete would produce.
        self.page
            .evaluate(
                "(() => { const el = document.activeElement; \
                 if (el && 'value' in el) { el.value = ''; \
                 el.dispatchEvent(new Event('input', { bubbles: true })); } })()",
            )
            .await?;
        Ok(())
    }

    async fn press_key(&self, target: &Target, key: &str, timeout: Duration) -> Result<()> {
        let el = self.wait_for(target, timeout).await?;
        el.press_key(key).await?;
        Ok(())
    }

    async fn count(&self, target: &Target) -> Result<usize> {
        let candidates = self.page.find_elements(target.css.as_ref()).await?;
        match &target.text {
            Some(text) => {
                let mut matching = 0;
                for el in candidates {
                    if let Ok(Some(rendered)) = el.inner_text().await {
                        if rendered.contains(text.as_ref()) {
                            matching += 1;
                        }
                    }
                }
                Ok(matching)
            }
            None => Ok(candidates.len()),
        }
    }

    async fn scroll_into_view(&self, target: &Target, timeout: Duration) -> Result<()> {
        let el = self.wait_for(target, timeout).await?;
        el.scroll_into_view().await?;
        Ok(())
    }

    async fn wait_for_url_contains(&self, fragment: &str, timeout: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if let Ok(Some(url)) = self.page.url().await {
                if url.contains(fragment) {
                    return Ok(());
                }
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(Error::Timeout(format!(
                    "after {}s waiting for URL containing {:?}",
                    timeout.as_secs(),
                    fragment
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn download_via(&self, target: &Target, timeout: Duration) -> Result<DownloadedFile> {
        download::next_download(&self.page, &self.staging, timeout, || async {
            self.click(target, INTERACT_WAIT).await
        })
        .await
    }

    async fn cookies(&self) -> Result<Vec<CookieRecord>> {
        let cookies = self.page.get_cookies().await?;
        Ok(cookies.into_iter().map(from_cdp_cookie).collect())
    }

    async fn set_cookies(&self, cookies: &[CookieRecord]) -> Result<()> {
        let params = cookies
            .iter()
            .map(to_cookie_param)
            .collect::<Result<Vec<_>>>()?;
        self.page.set_cookies(params).await?;

        tracing::debug!("Injected {} cookies", cookies.len());
        Ok(())
    }
}

fn from_cdp_cookie(cookie: Cookie) -> CookieRecord {
    CookieRecord {
        name: cookie.name,
        value: cookie.value,
        domain: cookie.domain,
        path: cookie.path,
        expires: cookie.expires,
        http_only: cookie.http_only,
        secure: cookie.secure,
        same_site: cookie.same_site.map(|s| same_site_name(&s).to_string()),
    }
}

fn same_site_name(same_site: &CookieSameSite) -> &'static str {
    match same_site {
        CookieSameSite::Strict => "Strict",
        CookieSameSite::Lax => "Lax",
        CookieSameSite::None => "None",
    }
}

fn parse_same_site(name: &str) -> Option<CookieSameSite> {
    match name.to_ascii_lowercase().as_str() {
        "strict" => Some(CookieSameSite::Strict),
        "lax" => Some(CookieSameSite::Lax),
        "none" => Some(CookieSameSite::None),
        _ => None,
    }
}

fn to_cookie_param(rec: &CookieRecord) -> Result<CookieParam> {
    let mut builder = CookieParam::builder()
        .name(rec.name.clone())
        .value(rec.value.clone())
        .domain(rec.domain.clone())
        .path(rec.path.clone())
        .secure(rec.secure)
        .http_only(rec.http_only);

    // Session cookies carry a negative expiry the protocol rejects.
    if rec.expires >= 0.0 {
        builder = builder.expires(TimeSinceEpoch::new(rec.expires));
    }
    if let Some(same_site) = rec.same_site.as_deref().and_then(parse_same_site) {
        builder = builder.same_site(same_site);
    }

    builder.build().map_err(Error::Cdp)
}
