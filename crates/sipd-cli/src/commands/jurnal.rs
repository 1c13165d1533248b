//! Type journal rows from a CSV spreadsheet into the Jurnal Umum form.
//!
//! The operator fills the form header and presses Simpan; only the row
//! grid in between is automated.

use super::RunContext;
use crate::prompt::TermPrompt;
use anyhow::Result;
use sipd_bot::actions::JournalEntry;
use sipd_bot::batch::BatchRunner;
use sipd_core::input;
use sipd_core::session::SessionStore;
use std::path::Path;

pub fn execute(ctx: &RunContext, rows_file: &Path) -> Result<()> {
    let rows = input::read_journal_rows(rows_file)?;
    println!("📄 {} row(s) from {}", rows.len(), rows_file.display());

    super::with_browser(ctx, move |driver| async move {
        let store = SessionStore::new(&ctx.session);
        super::login(ctx, &driver, &store).await?;

        let prompt = TermPrompt;
        println!("📊 Opening the Jurnal Umum form...");
        let action = JournalEntry::new(&driver, &prompt);
        action.prepare().await?;

        let runner = BatchRunner::new(&driver);
        let spinner =
            super::batch_spinner(ctx, format!("Filling {} journal row(s)...", rows.len()));
        let report = runner.run(&rows, &action).await;
        spinner.finish_and_clear();

        // Summary first: the operator should know about skipped rows
        // before deciding to press Simpan.
        println!();
        println!("📝 Batch result:");
        println!("{}", report.summary());

        action.finish().await?;
        Ok(())
    })
}
