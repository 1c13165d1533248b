//! Downloads the Lampiran I.1 (Perkada) PDF, one SKPD per item, through
//! the AKLAP print modal.

use crate::actions;
use crate::batch::{ActionError, ActionResult, BatchAction};
use crate::guard::NavigationGuard;
use crate::portal;
use crate::Result;
use async_trait::async_trait;
use sipd_browser::PortalDriver;
use sipd_core::output;
use sipd_core::work::UnitName;
use std::path::PathBuf;

pub struct UnitReport<'a, D: PortalDriver + ?Sized> {
    driver: &'a D,
    output_dir: PathBuf,
}

impl<'a, D: PortalDriver + ?Sized> UnitReport<'a, D> {
    pub fn new(driver: &'a D, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            driver,
            output_dir: output_dir.into(),
        }
    }

    /// Land on the AKLAP dashboard. The print modal itself is opened lazily
    /// per item, because page recovery after a failure closes it.
    pub async fn prepare(&self) -> Result<()> {
        NavigationGuard::new(self.driver)
            .goto_module("AKLAP", portal::AKLAP_URL)
            .await
    }

    async fn open_print_modal(&self) -> sipd_browser::Result<()> {
        self.driver
            .click(&portal::LPPD_LINK, portal::CONTROL_WAIT)
            .await?;
        self.driver
            .click(&portal::LAMPIRAN_PERKADA_PRINT, portal::CONTROL_WAIT)
            .await?;
        self.driver
            .wait_visible(&portal::MODAL_BODY, portal::CONTROL_WAIT)
            .await?;
        tracing::debug!("Lampiran print modal opened");
        Ok(())
    }
}

#[async_trait]
impl<'a, D: PortalDriver + ?Sized> BatchAction<UnitName> for UnitReport<'a, D> {
    async fn run(&self, item: &UnitName) -> ActionResult {
        if !self
            .driver
            .is_attached(&portal::MODAL_BODY, portal::INDICATOR_WAIT)
            .await
        {
            self.open_print_modal().await?;
        }

        actions::select_dropdown(self.driver, &portal::modal_fieldset_input(0), &item.0).await?;
        actions::select_dropdown(
            self.driver,
            &portal::modal_fieldset_input(1),
            portal::CONSOLIDATED_OPTION,
        )
        .await?;
        self.driver
            .click(&portal::per_unit_radio(), portal::CONTROL_WAIT)
            .await?;

        self.driver
            .click(&portal::PRINT_MENU_BUTTON, portal::CONTROL_WAIT)
            .await?;

        let download = match self
            .driver
            .download_via(&portal::PDF_OPTION, portal::ATTACHMENT_DOWNLOAD)
            .await
        {
            Ok(download) => download,
            Err(err) if err.is_timeout() => {
                // Some units cannot be printed; the portal raises a popup
                // instead of starting a download.
                if self
                    .driver
                    .is_attached(&portal::FAILURE_POPUP, portal::INDICATOR_WAIT)
                    .await
                {
                    if let Err(dismiss) = self
                        .driver
                        .click(&portal::FAILURE_POPUP_OK, portal::CONTROL_WAIT)
                        .await
                    {
                        tracing::warn!("Could not dismiss Gagal Cetak popup: {}", dismiss);
                    }
                    return Err(ActionError::Failed(format!(
                        "portal reported Gagal Cetak for {}",
                        item.0
                    )));
                }
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        };

        let dest = self.output_dir.join(format!("Lampiran I.1 - {}.pdf", item.0));
        output::move_artifact(&download.path, &dest)?;

        Ok(Some(dest))
    }
}
