use super::client::{GenaiModel, LanguageModel};
use super::error::LlmError;
use super::types::{CompletionOptions, Prompt};

#[cfg(any(test, feature = "mock"))]
use super::mock::MockLanguageModel;

#[derive(Debug, Clone)]
/// Chat backend wrapper (genai or mock).
pub enum ChatBackend {
    Genai(GenaiModel),
    #[cfg(any(test, feature = "mock"))]
    Mock(MockLanguageModel),
}

impl LanguageModel for ChatBackend {
    async fn complete(&self, prompt: &Prompt, options: CompletionOptions) -> Result<String, LlmError> {
        match self {
            ChatBackend::Genai(m) => m.complete(prompt, options).await,
            #[cfg(any(test, feature = "mock"))]
            ChatBackend::Mock(m) => m.complete(prompt, options).await,
        }
    }
}
