//! Terminal implementation of the operator pause.

use async_trait::async_trait;
use console::Term;
use sipd_bot::prompt::OperatorPrompt;

/// Prints the instruction and blocks until the operator presses Enter.
///
/// The read runs on a blocking thread so the browser's event handling
/// keeps going while the operator works on the CAPTCHA or the form.
pub struct TermPrompt;

#[async_trait]
impl OperatorPrompt for TermPrompt {
    async fn pause(&self, message: &str) -> sipd_bot::Result<()> {
        let message = message.to_string();
        let read = tokio::task::spawn_blocking(move || {
            let term = Term::stdout();
            term.write_line("")?;
            term.write_line(&format!("⏸️  {}", message))?;
            term.read_line()?;
            Ok::<(), std::io::Error>(())
        })
        .await
        .map_err(|e| sipd_core::Error::Io(std::io::Error::other(e)))?;

        read.map_err(sipd_core::Error::Io)?;
        Ok(())
    }
}
