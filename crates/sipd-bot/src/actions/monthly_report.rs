//! Downloads the all-SKPD Laporan Realisasi workbook, one month per item.

use crate::actions;
use crate::batch::{ActionError, ActionResult, BatchAction};
use crate::portal;
use crate::Result;
use async_trait::async_trait;
use sipd_browser::PortalDriver;
use sipd_core::output;
use sipd_core::work::ReportMonth;
use std::path::PathBuf;

pub struct MonthlyReport<'a, D: PortalDriver + ?Sized> {
    driver: &'a D,
    output_dir: PathBuf,
    year: i32,
}

impl<'a, D: PortalDriver + ?Sized> MonthlyReport<'a, D> {
    pub fn new(driver: &'a D, output_dir: impl Into<PathBuf>, year: i32) -> Self {
        Self {
            driver,
            output_dir: output_dir.into(),
            year,
        }
    }

    /// Open the realization report page and lock the unit filter to the
    /// all-SKPD bundle. Runs once; the filter survives across months.
    pub async fn prepare(&self) -> Result<()> {
        self.driver
            .goto(portal::REALISASI_URL, portal::PAGE_LOAD)
            .await?;
        self.driver
            .wait_visible(&portal::REALISASI_HEADING, portal::PAGE_LOAD)
            .await?;
        actions::select_dropdown(
            self.driver,
            &portal::REALISASI_UNIT_INPUT,
            portal::ALL_UNITS_OPTION,
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl<'a, D: PortalDriver + ?Sized> BatchAction<ReportMonth> for MonthlyReport<'a, D> {
    async fn run(&self, item: &ReportMonth) -> ActionResult {
        let Some(name) = item.name() else {
            return Err(ActionError::Failed(format!(
                "month {} is outside 1-12",
                item.0
            )));
        };

        actions::select_dropdown(self.driver, &portal::REALISASI_MONTH_INPUT, name).await?;

        let download = self
            .driver
            .download_via(&portal::REALISASI_DOWNLOAD_BUTTON, portal::REPORT_DOWNLOAD)
            .await?;

        let dest = self
            .output_dir
            .join(format!("{}-{:02}-Laporan Realisasi.xlsx", self.year, item.0));
        output::move_artifact(&download.path, &dest)?;

        Ok(Some(dest))
    }
}
