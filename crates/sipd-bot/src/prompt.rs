use async_trait::async_trait;

/// The deliberate, user-paced suspension point in a workflow.
///
/// Login pauses here while the operator finishes credentials and the
/// CAPTCHA; data-entry flows pause here around the manually filled form
/// header. Everything else in a workflow is bounded by timeouts.
#[async_trait]
pub trait OperatorPrompt: Send + Sync {
    /// Show `message` and block until the operator presses Enter.
    async fn pause(&self, message: &str) -> crate::Result<()>;
}

/// Prompt that never blocks, for unattended tests.
pub struct NoopPrompt;

#[async_trait]
impl OperatorPrompt for NoopPrompt {
    async fn pause(&self, _message: &str) -> crate::Result<()> {
        Ok(())
    }
}
