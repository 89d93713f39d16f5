//! Language-model access.

mod backend;
mod client;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod types;

#[cfg(test)]
mod tests;

pub use backend::ChatBackend;
pub use client::{GenaiModel, LanguageModel};
pub use error::LlmError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockLanguageModel;
pub use types::{CompletionOptions, Prompt};
