//! Download the all-SKPD Laporan Realisasi workbook for a range of months.

use super::RunContext;
use anyhow::Result;
use sipd_bot::actions::MonthlyReport;
use sipd_bot::batch::BatchRunner;
use sipd_core::output;
use sipd_core::session::SessionStore;
use sipd_core::work::ReportMonth;

pub fn execute(ctx: &RunContext, year: i32, first: u32, last: u32) -> Result<()> {
    // Out-of-range months are not rejected here; each one gets its own
    // failed outcome in the batch report.
    let months: Vec<ReportMonth> = (first..=last).map(ReportMonth).collect();
    if months.is_empty() {
        anyhow::bail!("empty month range {}-{}", first, last);
    }

    super::with_browser(ctx, move |driver| async move {
        let store = SessionStore::new(&ctx.session);
        super::login(ctx, &driver, &store).await?;

        let out_dir = output::category_dir(&ctx.output, "Laporan Realisasi")?;
        println!("📁 Output directory: {}", out_dir.display());

        println!("📊 Opening the realization report page...");
        let action = MonthlyReport::new(&driver, &out_dir, year);
        action.prepare().await?;

        let runner = BatchRunner::new(&driver);
        let spinner = super::batch_spinner(
            ctx,
            format!("Downloading {} monthly report(s)...", months.len()),
        );
        let report = runner.run(&months, &action).await;
        spinner.finish_and_clear();

        println!();
        println!("📝 Batch result:");
        println!("{}", report.summary());
        Ok(())
    })
}
