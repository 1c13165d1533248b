//! Posts every pending Belanja journal for one SKPD at a time, row by row
//! through the posting modal.

use crate::actions;
use crate::batch::{ActionResult, BatchAction};
use crate::guard::{NavigationGuard, DEFAULT_RETRIES, RETRY_DELAY};
use crate::portal;
use crate::Result;
use async_trait::async_trait;
use sipd_browser::PortalDriver;
use sipd_core::work::UnitName;
use std::time::Duration;

/// Pause before each row count; the table re-renders asynchronously after
/// applying the filter and after every posting.
const TABLE_SETTLE: Duration = Duration::from_secs(2);

pub struct PostJournal<'a, D: PortalDriver + ?Sized> {
    driver: &'a D,
}

impl<'a, D: PortalDriver + ?Sized> PostJournal<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    pub async fn prepare(&self) -> Result<()> {
        NavigationGuard::new(self.driver)
            .goto_module("AKLAP", portal::AKLAP_URL)
            .await
    }

    /// Post the top pending row. The portal re-sorts the table after each
    /// posting, so the first row is always the next piece of work.
    async fn post_first_row(&self) -> sipd_browser::Result<()> {
        self.driver
            .click(&portal::FIRST_ROW_ACTION, portal::CONTROL_WAIT)
            .await?;
        self.driver
            .click(&portal::ROW_POSTING_OPTION, portal::CONTROL_WAIT)
            .await?;

        self.driver
            .click(&portal::POSTING_MODAL_INPUT, portal::CONTROL_WAIT)
            .await?;
        self.driver
            .is_attached(&portal::POSTING_METHOD_LISTBOX, portal::INDICATOR_WAIT)
            .await;

        // Asset method when the row offers it, otherwise no method; a row
        // offering neither is a portal state posting cannot handle.
        let asset = portal::posting_method_option(portal::METHOD_ASSET);
        let none = portal::posting_method_option(portal::METHOD_NONE);
        if self.driver.count(&asset).await? > 0 {
            self.driver.click(&asset, portal::CONTROL_WAIT).await?;
        } else if self.driver.count(&none).await? > 0 {
            self.driver.click(&none, portal::CONTROL_WAIT).await?;
        } else {
            return Err(sipd_browser::Error::NotFound(
                "neither posting method offered".to_string(),
            ));
        }

        self.driver
            .click(&portal::MODAL_CONFIRM_BUTTON, portal::CONTROL_WAIT)
            .await?;
        self.driver
            .wait_visible(&portal::SUCCESS_POPUP, portal::CONTROL_WAIT)
            .await?;
        self.driver
            .press_key(&portal::SUCCESS_POPUP, "Escape", portal::CONTROL_WAIT)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<'a, D: PortalDriver + ?Sized> BatchAction<UnitName> for PostJournal<'a, D> {
    async fn run(&self, item: &UnitName) -> ActionResult {
        let guard = NavigationGuard::new(self.driver);
        for menu in [&portal::POSTING_MENU, &portal::BELANJA_SUBMENU] {
            if !guard.ensure_visible(menu, DEFAULT_RETRIES, RETRY_DELAY).await {
                return Err(sipd_browser::Error::NotFound(menu.to_string()).into());
            }
            self.driver.click(menu, portal::CONTROL_WAIT).await?;
        }

        actions::pick_suggestion(
            self.driver,
            &portal::filter_input(0),
            &portal::filter_option(item.0.as_str()),
            &item.0,
        )
        .await?;
        actions::select_dropdown(self.driver, &portal::filter_input(4), portal::STATUS_PENDING)
            .await?;
        self.driver
            .click(&portal::APPLY_BUTTON, portal::CONTROL_WAIT)
            .await?;

        let mut posted = 0u32;
        loop {
            tokio::time::sleep(TABLE_SETTLE).await;
            let rows = self.driver.count(&portal::TABLE_ROWS).await?;
            if rows == 0 {
                break;
            }
            tracing::debug!("{} pending row(s) left for {}", rows, item.0);
            self.post_first_row().await?;
            posted += 1;
        }

        tracing::info!("Posted {} journal(s) for {}", posted, item.0);
        Ok(None)
    }
}
