use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::client::LanguageModel;
use super::error::LlmError;
use super::types::{CompletionOptions, Prompt};

type Responder = dyn Fn(&Prompt) -> Result<String, LlmError> + Send + Sync;

/// Scripted language model that records every prompt it receives.
#[derive(Clone)]
pub struct MockLanguageModel {
    responder: Arc<Responder>,
    delay: Option<Duration>,
    prompts: Arc<Mutex<Vec<Prompt>>>,
}

impl MockLanguageModel {
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&Prompt) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            delay: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always answers `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        let reply = reply.into();
        Self::with_responder(move |_| Ok(reply.clone()))
    }

    /// Always fails, as if the provider were down.
    pub fn failing() -> Self {
        Self::with_responder(|_| {
            Err(LlmError::RequestFailed {
                reason: "mock provider unavailable".to_string(),
            })
        })
    }

    /// Sleeps before answering (pair with a caller-side timeout).
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().clone()
    }

    pub fn last_prompt(&self) -> Option<Prompt> {
        self.prompts.lock().last().cloned()
    }
}

impl std::fmt::Debug for MockLanguageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockLanguageModel")
            .field("calls", &self.call_count())
            .field("delay", &self.delay)
            .finish()
    }
}

impl LanguageModel for MockLanguageModel {
    async fn complete(&self, prompt: &Prompt, _options: CompletionOptions) -> Result<String, LlmError> {
        self.prompts.lock().push(prompt.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.responder)(prompt)
    }
}
