use async_trait::async_trait;
use atelier_application::CompletionClient;
use atelier_core::AppResult;
use tracing::info;

/// Development completion client that logs the prompt and returns canned
/// text instead of calling the completion API.
#[derive(Debug, Default)]
pub struct ConsoleCompletionClient;

impl ConsoleCompletionClient {
    /// Creates the console client.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CompletionClient for ConsoleCompletionClient {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        info!(prompt, "completion requested (console mode)");

        let first_line = prompt.lines().next().unwrap_or_default();
        Ok(format!(
            "[console completion] {first_line}\n\nThis is placeholder brief text; configure the \
             completion API provider to generate real briefs."
        ))
    }
}
