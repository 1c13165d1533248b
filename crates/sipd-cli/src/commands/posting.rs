//! Post every pending Belanja journal for each SKPD in a unit-list file.

use super::RunContext;
use anyhow::Result;
use sipd_bot::actions::PostJournal;
use sipd_bot::batch::BatchRunner;
use sipd_core::input;
use sipd_core::session::SessionStore;
use std::path::Path;

pub fn execute(ctx: &RunContext, units_file: &Path) -> Result<()> {
    let units = input::read_unit_list(units_file)?;
    println!("📄 {} unit(s) from {}", units.len(), units_file.display());

    super::with_browser(ctx, move |driver| async move {
        let store = SessionStore::new(&ctx.session);
        super::login(ctx, &driver, &store).await?;

        println!("📊 Opening the AKLAP module...");
        let action = PostJournal::new(&driver);
        action.prepare().await?;

        let runner = BatchRunner::new(&driver);
        let spinner = super::batch_spinner(
            ctx,
            format!("Posting journals for {} unit(s)...", units.len()),
        );
        let report = runner.run(&units, &action).await;
        spinner.finish_and_clear();

        println!();
        println!("📝 Batch result:");
        println!("{}", report.summary());
        Ok(())
    })
}
