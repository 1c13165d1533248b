//! Reload-and-retry navigation for an SPA that intermittently serves
//! its 404 page for routes that do exist.

use crate::portal;
use crate::{Error, Result};
use sipd_browser::{PortalDriver, Target};
use std::time::Duration;

/// Element waits get this many attempts before giving up.
pub const DEFAULT_RETRIES: u32 = 3;
/// Pause before each reload, giving the portal room to settle.
pub const RETRY_DELAY: Duration = Duration::from_secs(2);
/// Navigation attempts per module before the run is declared dead.
const MODULE_ATTEMPTS: u32 = 3;

/// Wraps a driver with the retry discipline every portal visit needs.
pub struct NavigationGuard<'a, D: PortalDriver + ?Sized> {
    driver: &'a D,
}

impl<'a, D: PortalDriver + ?Sized> NavigationGuard<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    /// Wait for `target`, reloading the page between attempts.
    ///
    /// Returns whether the element showed up; callers decide how bad
    /// that is. No reload happens after the final attempt.
    pub async fn ensure_visible(&self, target: &Target, retries: u32, delay: Duration) -> bool {
        for attempt in 1..=retries {
            if self
                .driver
                .wait_visible(target, portal::GUARD_WAIT)
                .await
                .is_ok()
            {
                return true;
            }
            if attempt < retries {
                tracing::debug!("Attempt {}/{}: {} not visible, reloading", attempt, retries, target);
                tokio::time::sleep(delay).await;
                if let Err(err) = self.driver.reload().await {
                    tracing::warn!("Reload while waiting for {} failed: {}", target, err);
                }
            }
        }
        false
    }

    /// Whether the portal is showing its 404 page.
    ///
    /// All three indicators must be attached; any one alone also appears
    /// in legitimate content, so a partial match means the page is fine.
    pub async fn is_not_found_page(&self) -> bool {
        for indicator in [
            &portal::NOT_FOUND_HEADING,
            &portal::NOT_FOUND_MESSAGE,
            &portal::NOT_FOUND_HOME_LINK,
        ] {
            if !self
                .driver
                .is_attached(indicator, portal::INDICATOR_WAIT)
                .await
            {
                return false;
            }
        }
        true
    }

    /// Navigate to a module page, retrying through 404 responses.
    ///
    /// The accounting menu must be visible first; a session whose menu is
    /// gone has expired and no amount of navigation will fix it. After the
    /// bounded re-navigation attempts the error is fatal to the whole run.
    pub async fn goto_module(&self, name: &str, url: &str) -> Result<()> {
        if !self
            .ensure_visible(&portal::MENU_ACCOUNTING, DEFAULT_RETRIES, RETRY_DELAY)
            .await
        {
            return Err(Error::NavigationFailed {
                module: name.to_string(),
                attempts: 0,
            });
        }

        self.driver.goto(url, portal::PAGE_LOAD).await?;

        for attempt in 1..=MODULE_ATTEMPTS {
            if !self.is_not_found_page().await {
                tracing::debug!("Module {} loaded", name);
                return Ok(());
            }
            tracing::warn!(
                "Module {} served a 404 (attempt {}/{}), navigating again",
                name,
                attempt,
                MODULE_ATTEMPTS
            );
            self.driver.goto(url, portal::PAGE_LOAD).await?;
        }

        Err(Error::NavigationFailed {
            module: name.to_string(),
            attempts: MODULE_ATTEMPTS,
        })
    }

    /// Best-effort reset after a workflow step failed mid-page.
    ///
    /// Reloads once, then keeps reloading while the 404 page is up, bounded
    /// so a dead portal cannot wedge the batch. Returns whether the page
    /// came back.
    pub async fn recover(&self) -> bool {
        if let Err(err) = self.driver.reload().await {
            tracing::warn!("Recovery reload failed: {}", err);
            return false;
        }
        for _ in 0..DEFAULT_RETRIES {
            if !self.is_not_found_page().await {
                return true;
            }
            tokio::time::sleep(RETRY_DELAY).await;
            if let Err(err) = self.driver.reload().await {
                tracing::warn!("Recovery reload failed: {}", err);
                return false;
            }
        }
        !self.is_not_found_page().await
    }
}
