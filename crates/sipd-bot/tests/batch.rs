mod support;

use async_trait::async_trait;
use sipd_bot::actions::MonthlyReport;
use sipd_bot::batch::{ActionError, ActionResult, BatchAction, BatchRunner};
use sipd_core::work::{BatchOutcome, FailReason, ReportMonth, UnitName};
use std::collections::VecDeque;
use std::sync::Mutex;
use support::{Call, FakeDriver};
use tempfile::TempDir;

/// Action whose per-item outcomes are scripted up front.
struct ScriptedAction {
    results: Mutex<VecDeque<ActionResult>>,
}

impl ScriptedAction {
    fn new(results: Vec<ActionResult>) -> Self {
        Self {
            results: Mutex::new(VecDeque::from(results)),
        }
    }
}

#[async_trait]
impl BatchAction<UnitName> for ScriptedAction {
    async fn run(&self, _item: &UnitName) -> ActionResult {
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .expect("more items than scripted results")
    }
}

fn units(names: &[&str]) -> Vec<UnitName> {
    names.iter().map(|n| UnitName(n.to_string())).collect()
}

#[tokio::test]
async fn test_invalid_month_never_reaches_the_portal() {
    let driver = FakeDriver::new();
    let out = TempDir::new().unwrap();
    let action = MonthlyReport::new(&driver, out.path(), 2025);
    let runner = BatchRunner::new(&driver);

    let report = runner.run(&[ReportMonth(0)], &action).await;

    assert_eq!(report.len(), 1);
    assert!(matches!(
        &report.items[0].outcome,
        BatchOutcome::Failed(FailReason::InvalidInput(_))
    ));
    assert!(driver.calls().is_empty());
}

#[tokio::test]
async fn test_outcomes_keep_submission_order() {
    let driver = FakeDriver::new();
    let runner = BatchRunner::new(&driver);
    let action = ScriptedAction::new(vec![Ok(None), Ok(None)]);
    let items = vec![
        UnitName("   ".to_string()),
        UnitName("Dinas Pendidikan".to_string()),
        UnitName("Dinas Kesehatan".to_string()),
    ];

    let report = runner.run(&items, &action).await;

    assert_eq!(report.len(), 3);
    assert_eq!(report.items[0].label, "   ");
    assert!(matches!(
        &report.items[0].outcome,
        BatchOutcome::Failed(FailReason::InvalidInput(_))
    ));
    assert!(report.items[1].outcome.is_success());
    assert!(report.items[2].outcome.is_success());
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
}

#[tokio::test]
async fn test_timeout_fails_item_and_continues() {
    let driver = FakeDriver::new();
    let runner = BatchRunner::new(&driver);
    let action = ScriptedAction::new(vec![
        Ok(None),
        Err(ActionError::Timeout("download never started".to_string())),
        Ok(None),
    ]);

    let report = runner.run(&units(&["A", "B", "C"]), &action).await;

    assert!(report.items[0].outcome.is_success());
    assert!(matches!(
        &report.items[1].outcome,
        BatchOutcome::Failed(FailReason::Timeout(_))
    ));
    assert!(report.items[2].outcome.is_success());
    // Timeouts leave the page alone.
    assert_eq!(driver.count_of(|c| matches!(c, Call::Reload)), 0);
}

#[tokio::test]
async fn test_skip_records_outcome_without_recovery() {
    let driver = FakeDriver::new();
    let runner = BatchRunner::new(&driver);
    let action = ScriptedAction::new(vec![
        Err(ActionError::Skipped("no suggestion matched".to_string())),
        Ok(None),
    ]);

    let report = runner.run(&units(&["A", "B"]), &action).await;

    assert!(matches!(&report.items[0].outcome, BatchOutcome::Skipped(_)));
    assert!(report.items[1].outcome.is_success());
    assert_eq!(driver.count_of(|c| matches!(c, Call::Reload)), 0);
}

#[tokio::test]
async fn test_unexpected_failure_triggers_recovery() {
    let driver = FakeDriver::new();
    let runner = BatchRunner::new(&driver);
    let action = ScriptedAction::new(vec![
        Err(ActionError::Failed("stuck modal".to_string())),
        Ok(None),
    ]);

    let report = runner.run(&units(&["A", "B"]), &action).await;

    assert!(matches!(
        &report.items[0].outcome,
        BatchOutcome::Failed(FailReason::Unexpected(_))
    ));
    assert!(report.items[1].outcome.is_success());
    // The page was reloaded before the next item ran.
    assert!(driver.count_of(|c| matches!(c, Call::Reload)) >= 1);
}
