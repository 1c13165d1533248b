//! Discard the stored session and log in from scratch.

use super::RunContext;
use crate::prompt::TermPrompt;
use anyhow::Result;
use sipd_bot::auth::Authenticator;
use sipd_core::session::SessionStore;

pub fn execute(ctx: &RunContext) -> Result<()> {
    super::with_browser(ctx, move |driver| async move {
        let store = SessionStore::new(&ctx.session);
        let prompt = TermPrompt;
        let auth = Authenticator::new(&driver, &store, &prompt);

        println!("🔑 Clearing the stored session, a fresh login follows...");
        auth.reset_session().await?;

        println!("✅ Session saved to {}", store.path().display());
        Ok(())
    })
}
