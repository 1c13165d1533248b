use crate::driver::DownloadedFile;
use crate::{Error, Result};
use chromiumoxide::cdp::browser_protocol::browser::{
    DownloadProgressState, EventDownloadProgress, EventDownloadWillBegin,
    SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;

/// Route every download on this page into the staging directory.
///
/// `AllowAndName` stores each file under its download GUID, which keeps
/// names collision-free and lets progress events be correlated to files.
pub(crate) async fn route_to(page: &Page, staging: &Path) -> Result<()> {
    let params = SetDownloadBehaviorParams::builder()
        .behavior(SetDownloadBehaviorBehavior::AllowAndName)
        .download_path(staging.display().to_string())
        .events_enabled(true)
        .build()
        .map_err(Error::Browser)?;
    page.execute(params).await?;

    tracing::debug!("Downloads staged under {}", staging.display());
    Ok(())
}

/// Run `trigger` and wait for the download it starts to finish.
///
/// Both event streams are registered before the trigger runs, so the
/// begin event can never be missed.
pub(crate) async fn next_download<F, Fut>(
    page: &Page,
    staging: &Path,
    timeout: Duration,
    trigger: F,
) -> Result<DownloadedFile>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<()>>,
{
    let mut begin = page.event_listener::<EventDownloadWillBegin>().await?;
    let mut progress = page.event_listener::<EventDownloadProgress>().await?;

    trigger().await?;

    let deadline = tokio::time::Instant::now() + timeout;

    let begin_ev = tokio::time::timeout_at(deadline, begin.next())
        .await
        .map_err(|_| {
            Error::Timeout(format!(
                "after {}s waiting for a download to start",
                timeout.as_secs()
            ))
        })?
        .ok_or_else(|| Error::Cdp("download event stream closed".to_string()))?;

    let guid = begin_ev.guid.clone();
    let suggested_name = begin_ev.suggested_filename.clone();
    tracing::info!("Download started: {}", suggested_name);

    loop {
        let ev = tokio::time::timeout_at(deadline, progress.next())
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "after {}s waiting for download {:?} to finish",
                    timeout.as_secs(),
                    suggested_name
                ))
            })?
            .ok_or_else(|| Error::Cdp("download event stream closed".to_string()))?;

        if ev.guid != guid {
            continue;
        }
        match &ev.state {
            DownloadProgressState::Completed => break,
            DownloadProgressState::Canceled => {
                return Err(Error::Browser(format!(
                    "download canceled: {}",
                    suggested_name
                )));
            }
            _ => {}
        }
    }

    let path = staging.join(&guid);
    tracing::info!("Download finished: {}", path.display());
    Ok(DownloadedFile {
        path,
        suggested_name,
    })
}
