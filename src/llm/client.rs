use std::future::Future;
use std::time::Duration;

use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::{debug, instrument};

use super::error::LlmError;
use super::types::{CompletionOptions, Prompt};

/// Free-text completion. Replies are untrusted and may be slow or malformed.
pub trait LanguageModel: Send + Sync {
    fn complete(
        &self,
        prompt: &Prompt,
        options: CompletionOptions,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}

/// Chat model reached through `genai` (provider picked from the model name,
/// credentials from the provider's usual environment variable).
#[derive(Clone)]
pub struct GenaiModel {
    client: Client,
    model: String,
    timeout: Duration,
}

impl GenaiModel {
    pub fn new(model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, prompt), fields(model = %self.model, max_tokens = options.max_tokens))]
    pub async fn complete(
        &self,
        prompt: &Prompt,
        options: CompletionOptions,
    ) -> Result<String, LlmError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(prompt.system.clone()),
            ChatMessage::user(prompt.user.clone()),
        ]);
        let chat_options = ChatOptions::default()
            .with_temperature(options.temperature)
            .with_max_tokens(options.max_tokens);

        let response = tokio::time::timeout(
            self.timeout,
            self.client
                .exec_chat(&self.model, request, Some(&chat_options)),
        )
        .await
        .map_err(|_| LlmError::Timeout {
            timeout_ms: self.timeout.as_millis() as u64,
        })??;

        let text = response.first_text().unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        debug!(reply_len = text.len(), "Language model replied");
        Ok(text)
    }
}

impl std::fmt::Debug for GenaiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiModel")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LanguageModel for GenaiModel {
    async fn complete(&self, prompt: &Prompt, options: CompletionOptions) -> Result<String, LlmError> {
        GenaiModel::complete(self, prompt, options).await
    }
}

impl<L: LanguageModel + ?Sized> LanguageModel for std::sync::Arc<L> {
    fn complete(
        &self,
        prompt: &Prompt,
        options: CompletionOptions,
    ) -> impl Future<Output = Result<String, LlmError>> + Send {
        (**self).complete(prompt, options)
    }
}
