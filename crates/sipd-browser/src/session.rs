use crate::cdp::CdpDriver;
use crate::{download, Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig, HeadlessMode};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// How a [`BrowserSession`] launches Chrome.
pub struct LaunchOptions {
    /// Headed by default: login needs an operator watching the CAPTCHA.
    pub headless: bool,
    /// Explicit Chrome binary; auto-detected when absent.
    pub chrome: Option<PathBuf>,
    pub window: (u32, u32),
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: false,
            chrome: None,
            window: (1366, 900),
        }
    }
}

/// Owns the Chrome process, its CDP handler task, the single portal page,
/// and the throwaway profile and download-staging directories.
///
/// Workflows take a [`CdpDriver`] from `driver()` and never borrow the
/// session itself, so `close()` can run on every exit path of a command.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
    profile_dir: TempDir,
    staging_dir: TempDir,
}

impl BrowserSession {
    pub async fn launch(opts: &LaunchOptions) -> Result<Self> {
        let profile_dir = TempDir::new()?;
        let staging_dir = TempDir::new()?;

        let mut builder = BrowserConfig::builder()
            .user_data_dir(profile_dir.path())
            .window_size(opts.window.0, opts.window.1)
            .arg("--disable-blink-features=AutomationControlled");
        builder = if opts.headless {
            builder.headless_mode(HeadlessMode::New)
        } else {
            builder.with_head()
        };
        if let Some(chrome) = &opts.chrome {
            builder = builder.chrome_executable(chrome);
        }
        let config = builder.build().map_err(Error::Browser)?;

        tracing::info!("Launching Chrome (headless: {})", opts.headless);
        let (browser, mut handler) = Browser::launch(config).await?;

        // The handler must drain CDP messages for every other call to work.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        download::route_to(&page, staging_dir.path()).await?;

        Ok(Self {
            browser,
            handler_task,
            page,
            profile_dir,
            staging_dir,
        })
    }

    /// Driver handle over the session's page. Cheap to clone around.
    pub fn driver(&self) -> CdpDriver {
        CdpDriver::new(self.page.clone(), self.staging_dir.path().to_path_buf())
    }

    /// Chrome's throwaway user-data directory for this run.
    pub fn profile_dir(&self) -> &Path {
        self.profile_dir.path()
    }

    /// Where finished downloads land before a workflow moves them.
    pub fn staging_dir(&self) -> &Path {
        self.staging_dir.path()
    }

    /// Close the browser and reap the child process. Consumes the session;
    /// the profile and staging directories are removed on drop.
    pub async fn close(mut self) -> Result<()> {
        tracing::info!("Closing browser");
        let close_result = self.browser.close().await;
        if let Err(e) = self.browser.wait().await {
            tracing::warn!("Browser did not exit cleanly: {}", e);
        }
        self.handler_task.abort();
        close_result?;
        Ok(())
    }
}
