//! Batch engine: runs one action template over a list of work items with
//! strict per-item failure isolation.

use crate::guard::NavigationGuard;
use async_trait::async_trait;
use sipd_browser::PortalDriver;
use sipd_core::work::{BatchOutcome, BatchReport, FailReason, WorkUnit};
use std::fmt;
use std::path::PathBuf;

/// How a single work item failed. Scoped to that item; the batch goes on.
#[derive(Debug)]
pub enum ActionError {
    /// A bounded wait expired. The page itself is assumed intact.
    Timeout(String),
    /// The item was deliberately left untouched on the portal.
    Skipped(String),
    /// The page is in a state the workflow does not understand.
    Failed(String),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Timeout(msg) => write!(f, "timed out: {}", msg),
            ActionError::Skipped(msg) => write!(f, "skipped: {}", msg),
            ActionError::Failed(msg) => write!(f, "failed: {}", msg),
        }
    }
}

impl From<sipd_browser::Error> for ActionError {
    fn from(err: sipd_browser::Error) -> Self {
        if err.is_timeout() {
            ActionError::Timeout(err.to_string())
        } else {
            ActionError::Failed(err.to_string())
        }
    }
}

impl From<sipd_core::Error> for ActionError {
    fn from(err: sipd_core::Error) -> Self {
        ActionError::Failed(err.to_string())
    }
}

/// What an action produces for one item: an artifact path for downloads,
/// `None` for workflows that only mutate portal state.
pub type ActionResult = std::result::Result<Option<PathBuf>, ActionError>;

/// One workflow template, invoked once per work item.
///
/// Implementations hold their own driver handle and any per-run settings;
/// the runner only sequences them.
#[async_trait]
pub trait BatchAction<I: WorkUnit>: Send + Sync {
    async fn run(&self, item: &I) -> ActionResult;
}

/// Drives a [`BatchAction`] over every item, in order, never aborting the
/// batch for a single item.
pub struct BatchRunner<'a, D: PortalDriver + ?Sized> {
    guard: NavigationGuard<'a, D>,
}

impl<'a, D: PortalDriver + ?Sized> BatchRunner<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self {
            guard: NavigationGuard::new(driver),
        }
    }

    /// Run `action` over `items` and report one outcome per item, in
    /// submission order.
    ///
    /// Invalid items fail without touching the portal. A timeout marks the
    /// item failed and moves on. An unexpected failure additionally runs
    /// page recovery, since the page may be stuck mid-workflow; recovery
    /// failing is logged but never stops the remaining items.
    pub async fn run<I, A>(&self, items: &[I], action: &A) -> BatchReport
    where
        I: WorkUnit,
        A: BatchAction<I>,
    {
        let total = items.len();
        let mut report = BatchReport::new();

        for (pos, item) in items.iter().enumerate() {
            let label = item.label();
            tracing::info!("[{}/{}] {}", pos + 1, total, label);

            if let Err(msg) = item.validate() {
                tracing::warn!("[{}/{}] {} rejected: {}", pos + 1, total, label, msg);
                report.record(label, BatchOutcome::Failed(FailReason::InvalidInput(msg)));
                continue;
            }

            let outcome = match action.run(item).await {
                Ok(artifact) => {
                    tracing::info!("[{}/{}] {} done", pos + 1, total, label);
                    BatchOutcome::Success { artifact }
                }
                Err(ActionError::Timeout(msg)) => {
                    tracing::warn!("[{}/{}] {} timed out: {}", pos + 1, total, label, msg);
                    BatchOutcome::Failed(FailReason::Timeout(msg))
                }
                Err(ActionError::Skipped(msg)) => {
                    tracing::warn!("[{}/{}] {} skipped: {}", pos + 1, total, label, msg);
                    BatchOutcome::Skipped(msg)
                }
                Err(ActionError::Failed(msg)) => {
                    tracing::warn!("[{}/{}] {} failed: {}", pos + 1, total, label, msg);
                    if !self.guard.recover().await {
                        tracing::warn!("Page did not recover after {}, continuing anyway", label);
                    }
                    BatchOutcome::Failed(FailReason::Unexpected(msg))
                }
            };
            report.record(label, outcome);
        }

        report
    }
}
