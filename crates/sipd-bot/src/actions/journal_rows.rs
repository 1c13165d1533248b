//! Types journal rows into the Jurnal Umum input form. The form header and
//! the final save stay manual; only the row grind is automated.

use crate::actions;
use crate::batch::{ActionResult, BatchAction};
use crate::guard::{NavigationGuard, DEFAULT_RETRIES, RETRY_DELAY};
use crate::portal;
use crate::prompt::OperatorPrompt;
use crate::Result;
use async_trait::async_trait;
use sipd_browser::PortalDriver;
use sipd_core::work::JournalRow;

pub struct JournalEntry<'a, D, P>
where
    D: PortalDriver + ?Sized,
    P: OperatorPrompt + ?Sized,
{
    driver: &'a D,
    prompt: &'a P,
}

impl<'a, D, P> JournalEntry<'a, D, P>
where
    D: PortalDriver + ?Sized,
    P: OperatorPrompt + ?Sized,
{
    pub fn new(driver: &'a D, prompt: &'a P) -> Self {
        Self { driver, prompt }
    }

    /// Open the input tab, then hand the form header to the operator:
    /// SKPD, dates, source document and description are manual fields.
    pub async fn prepare(&self) -> Result<()> {
        let guard = NavigationGuard::new(self.driver);
        guard.goto_module("AKLAP", portal::AKLAP_URL).await?;
        if !guard
            .ensure_visible(&portal::JURNAL_MENU, DEFAULT_RETRIES, RETRY_DELAY)
            .await
        {
            return Err(sipd_browser::Error::NotFound(portal::JURNAL_MENU.to_string()).into());
        }
        self.driver
            .click(&portal::JURNAL_MENU, portal::CONTROL_WAIT)
            .await?;
        self.driver
            .click(&portal::INPUT_TAB, portal::CONTROL_WAIT)
            .await?;

        self.prompt
            .pause("Isi form Jurnal Umum, lalu tekan Enter untuk mengisi jurnal secara otomatis...")
            .await?;
        Ok(())
    }

    /// Saving is deliberately left to the operator.
    pub async fn finish(&self) -> Result<()> {
        self.prompt
            .pause("Jangan lupa untuk tekan tombol Simpan! Tekan Enter untuk kembali...")
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<'a, D, P> BatchAction<JournalRow> for JournalEntry<'a, D, P>
where
    D: PortalDriver + ?Sized,
    P: OperatorPrompt + ?Sized,
{
    async fn run(&self, item: &JournalRow) -> ActionResult {
        self.driver
            .scroll_into_view(&portal::ACCOUNT_INPUT, portal::CONTROL_WAIT)
            .await?;
        actions::pick_suggestion(
            self.driver,
            &portal::ACCOUNT_INPUT,
            &portal::account_option(item.account_code.as_str()),
            &item.account_code,
        )
        .await?;

        if let Some(debit) = &item.debit {
            self.driver
                .click(&portal::DEBIT_INPUT, portal::CONTROL_WAIT)
                .await?;
            self.driver
                .type_text(&portal::DEBIT_INPUT, debit, portal::CONTROL_WAIT)
                .await?;
        }
        if let Some(credit) = &item.credit {
            self.driver
                .click(&portal::CREDIT_INPUT, portal::CONTROL_WAIT)
                .await?;
            self.driver
                .type_text(&portal::CREDIT_INPUT, credit, portal::CONTROL_WAIT)
                .await?;
        }

        self.driver
            .scroll_into_view(&portal::ADD_ROW_BUTTON, portal::CONTROL_WAIT)
            .await?;
        self.driver
            .click(&portal::ADD_ROW_BUTTON, portal::CONTROL_WAIT)
            .await?;
        Ok(None)
    }
}
