//! Menu commands. Each owns one complete browser run: launch Chrome, log
//! in, drive the workflow, close the browser on every path, and print the
//! batch outcome.

pub mod jurnal;
pub mod lampiran;
pub mod posting;
pub mod realisasi;
pub mod session;

use crate::prompt::TermPrompt;
use anyhow::Result;
use indicatif::ProgressBar;
use sipd_bot::auth::{Authenticator, Credentials};
use sipd_browser::{BrowserSession, CdpDriver, LaunchOptions};
use sipd_core::session::SessionStore;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

/// Settings shared by every command, parsed once from the command line.
pub struct RunContext {
    pub dev: bool,
    pub headless: bool,
    pub chrome: Option<PathBuf>,
    pub session: PathBuf,
    pub output: PathBuf,
}

impl RunContext {
    fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            headless: self.headless,
            chrome: self.chrome.clone(),
            ..LaunchOptions::default()
        }
    }
}

/// Run one browser-bound task: build a runtime, launch Chrome, hand the
/// driver to `task`, and close the browser whether the task finished,
/// failed, or the operator pressed Ctrl+C.
pub(crate) fn with_browser<F, Fut>(ctx: &RunContext, task: F) -> Result<()>
where
    F: FnOnce(CdpDriver) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        println!("🚀 Launching Chrome...");
        let session = BrowserSession::launch(&ctx.launch_options()).await?;

        let outcome = tokio::select! {
            res = task(session.driver()) => res,
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("🛑 Interrupted, closing the browser...");
                Err(anyhow::anyhow!("interrupted by operator"))
            }
        };

        if let Err(e) = session.close().await {
            tracing::warn!("Browser close failed: {}", e);
        }
        outcome
    });

    // Do not hang on an abandoned operator prompt read.
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

/// Log in, preferring the stored session. In dev mode with credentials in
/// the environment the login form is filled automatically; the CAPTCHA
/// still belongs to the operator.
pub(crate) async fn login(
    ctx: &RunContext,
    driver: &CdpDriver,
    store: &SessionStore,
) -> Result<()> {
    println!("🔐 Logging in to SIPD-RI...");
    let prompt = TermPrompt;
    let auth = Authenticator::new(driver, store, &prompt);

    if ctx.dev {
        if let Some(credentials) = Credentials::from_env() {
            println!("🔑 Using credentials from the environment");
            auth.login_with_credentials(&credentials).await?;
            return Ok(());
        }
    }
    auth.login().await?;
    Ok(())
}

/// Spinner shown while a batch grinds through its items. Hidden in dev
/// mode, where console log lines carry the progress instead.
pub(crate) fn batch_spinner(ctx: &RunContext, message: String) -> ProgressBar {
    if ctx.dev {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
