//! Print and download the Lampiran I.1 (Perkada) PDF for every SKPD in a
//! unit-list file.

use super::RunContext;
use anyhow::Result;
use sipd_bot::actions::UnitReport;
use sipd_bot::batch::BatchRunner;
use sipd_core::input;
use sipd_core::output;
use sipd_core::session::SessionStore;
use std::path::Path;

pub fn execute(ctx: &RunContext, units_file: &Path) -> Result<()> {
    // Read the list before Chrome launches; a bad path fails cheaply.
    let units = input::read_unit_list(units_file)?;
    println!("📄 {} unit(s) from {}", units.len(), units_file.display());

    super::with_browser(ctx, move |driver| async move {
        let store = SessionStore::new(&ctx.session);
        super::login(ctx, &driver, &store).await?;

        let out_dir = output::category_dir(&ctx.output, "Lampiran I.1")?;
        println!("📁 Output directory: {}", out_dir.display());

        println!("📊 Opening the AKLAP module...");
        let action = UnitReport::new(&driver, &out_dir);
        action.prepare().await?;

        let runner = BatchRunner::new(&driver);
        let spinner =
            super::batch_spinner(ctx, format!("Printing {} Lampiran PDF(s)...", units.len()));
        let report = runner.run(&units, &action).await;
        spinner.finish_and_clear();

        println!();
        println!("📝 Batch result:");
        println!("{}", report.summary());
        Ok(())
    })
}
