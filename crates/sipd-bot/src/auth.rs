//! Login flows: cookie restore with a one-shot interactive fallback,
//! and the dev-mode credential login.

use crate::portal;
use crate::prompt::OperatorPrompt;
use crate::{Error, Result};
use sipd_browser::PortalDriver;
use sipd_core::session::SessionStore;

/// Environment variable holding the dev-mode username.
pub const USERNAME_VAR: &str = "SIPD_USERNAME";
/// Environment variable holding the dev-mode password.
pub const PASSWORD_VAR: &str = "SIPD_PASSWORD";

/// Portal credentials for the dev-mode login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Read credentials from the environment, if both are set and non-empty.
    pub fn from_env() -> Option<Self> {
        let username = std::env::var(USERNAME_VAR).ok()?;
        let password = std::env::var(PASSWORD_VAR).ok()?;
        if username.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self { username, password })
    }
}

/// Establishes an authenticated portal session.
///
/// Holds the driver, the cookie store, and the prompt used to hand the
/// CAPTCHA to the operator. Every successful fresh login ends with the
/// session saved, so the next run can skip the operator entirely.
pub struct Authenticator<'a, D: PortalDriver + ?Sized, P: OperatorPrompt + ?Sized> {
    driver: &'a D,
    store: &'a SessionStore,
    prompt: &'a P,
}

impl<'a, D: PortalDriver + ?Sized, P: OperatorPrompt + ?Sized> Authenticator<'a, D, P> {
    pub fn new(driver: &'a D, store: &'a SessionStore, prompt: &'a P) -> Self {
        Self {
            driver,
            store,
            prompt,
        }
    }

    /// Log in, preferring the stored session.
    ///
    /// A stored session that fails for any reason (unreadable file, corrupt
    /// JSON, cookies the portal no longer accepts) is discarded and the flow
    /// falls back to one interactive login. Errors from that fallback are
    /// final; there is no second fallback to loop on.
    pub async fn login(&self) -> Result<()> {
        if self.store.exists() {
            tracing::info!("Cookie file found, logging in with stored session");
            match self.restore_session().await {
                Ok(()) => return Ok(()),
                Err(err) => {
                    tracing::warn!("Stored session rejected ({}), falling back to manual login", err);
                    self.store.clear()?;
                }
            }
        } else {
            tracing::info!("Cookie file not found, performing manual login");
        }
        self.interactive_login().await
    }

    /// Drop the stored session and log in from scratch.
    pub async fn reset_session(&self) -> Result<()> {
        self.store.clear()?;
        tracing::info!("Cleared session at {}", self.store.path().display());
        self.interactive_login().await
    }

    /// Dev-mode login: fill the form, pick the treasury account, then hand
    /// the CAPTCHA to the operator. Saves the session like the manual flow.
    pub async fn login_with_credentials(&self, credentials: &Credentials) -> Result<()> {
        self.driver.goto(portal::LOGIN_URL, portal::PAGE_LOAD).await?;
        self.driver
            .type_text(
                &portal::USERNAME_INPUT,
                &credentials.username,
                portal::CONTROL_WAIT,
            )
            .await?;
        self.driver
            .type_text(
                &portal::PASSWORD_INPUT,
                &credentials.password,
                portal::CONTROL_WAIT,
            )
            .await?;
        self.driver
            .press_key(&portal::PASSWORD_INPUT, "Enter", portal::CONTROL_WAIT)
            .await?;

        // The account cards only render once the portal accepts the password.
        self.driver
            .click(&portal::ACCOUNT_CARD, portal::LOGIN_WAIT)
            .await?;

        self.driver.bring_to_front().await?;
        self.prompt
            .pause("Solve the CAPTCHA in the browser, then press Enter after successful login...")
            .await?;

        self.verify_and_save().await
    }

    async fn restore_session(&self) -> Result<()> {
        let cookies = self.store.load()?;
        self.driver.set_cookies(&cookies).await?;
        self.driver.goto(portal::LOGIN_URL, portal::PAGE_LOAD).await?;
        self.driver.bring_to_front().await?;
        self.driver
            .wait_for_url_contains(portal::DASHBOARD_ROUTE, portal::LOGIN_WAIT)
            .await?;
        tracing::info!("Logged in using stored session");
        Ok(())
    }

    async fn interactive_login(&self) -> Result<()> {
        self.driver.goto(portal::LOGIN_URL, portal::PAGE_LOAD).await?;
        self.driver.bring_to_front().await?;
        self.prompt
            .pause("Please fill the login and CAPTCHA form in the browser, then press Enter...")
            .await?;
        self.verify_and_save().await
    }

    /// Confirm the session is live, then persist it.
    ///
    /// The dashboard route proves authentication; the accounting menu proves
    /// the role can reach the workflows. Cookies are written exactly once,
    /// after both checks pass.
    async fn verify_and_save(&self) -> Result<()> {
        self.driver
            .wait_for_url_contains(portal::DASHBOARD_ROUTE, portal::LOGIN_WAIT)
            .await
            .map_err(|err| Error::LoginFailed(format!("dashboard never appeared: {err}")))?;
        self.driver
            .wait_visible(&portal::MENU_ACCOUNTING, portal::PAGE_LOAD)
            .await
            .map_err(|err| Error::LoginFailed(format!("accounting menu missing: {err}")))?;

        let cookies = self.driver.cookies().await?;
        self.store.save(&cookies)?;
        tracing::info!("Login successful, session saved to {}", self.store.path().display());
        Ok(())
    }
}
