//! Workflow templates, one per portal task. Each implements
//! [`BatchAction`](crate::batch::BatchAction) for its work item type and
//! carries a `prepare` step that brings the portal to its starting page.

mod journal_rows;
mod monthly_report;
mod post_journal;
mod unit_report;

pub use journal_rows::JournalEntry;
pub use monthly_report::MonthlyReport;
pub use post_journal::PostJournal;
pub use unit_report::UnitReport;

use crate::batch::ActionError;
use crate::portal;
use sipd_browser::{PortalDriver, Target};

/// How often a flaky autocomplete gets retyped before its item is skipped.
pub(crate) const SUGGESTION_ATTEMPTS: u32 = 5;

/// Commit a combobox by typing the value and accepting the top suggestion.
///
/// This is the portal's cheap dropdown pattern; it works wherever the first
/// suggestion for a full value is the right one.
pub(crate) async fn select_dropdown<D: PortalDriver + ?Sized>(
    driver: &D,
    input: &Target,
    value: &str,
) -> sipd_browser::Result<()> {
    driver.click(input, portal::CONTROL_WAIT).await?;
    driver.type_text(input, value, portal::CONTROL_WAIT).await?;
    driver.press_key(input, "Enter", portal::CONTROL_WAIT).await?;
    Ok(())
}

/// Type into a combobox and click the suggestion matching `value`,
/// retyping when the portal fails to render suggestions.
///
/// The input is cleared before each retry: typing appends, so stale text
/// would corrupt the query. Exhausting the attempts skips the item rather
/// than failing it; the page is healthy, the portal just never offered
/// the match.
pub(crate) async fn pick_suggestion<D: PortalDriver + ?Sized>(
    driver: &D,
    input: &Target,
    option: &Target,
    value: &str,
) -> std::result::Result<(), ActionError> {
    for attempt in 1..=SUGGESTION_ATTEMPTS {
        driver.click(input, portal::CONTROL_WAIT).await?;
        driver.type_text(input, value, portal::CONTROL_WAIT).await?;

        match driver.click(option, portal::SUGGESTION_WAIT).await {
            Ok(()) => return Ok(()),
            Err(err) if err.is_timeout() => {
                tracing::warn!(
                    "No suggestion for {:?} (attempt {}/{}), retyping",
                    value,
                    attempt,
                    SUGGESTION_ATTEMPTS
                );
                driver.clear_input(input, portal::CONTROL_WAIT).await?;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Err(ActionError::Skipped(format!(
        "no suggestion matched {:?} after {} attempts",
        value, SUGGESTION_ATTEMPTS
    )))
}
