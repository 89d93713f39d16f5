/// A system instruction plus one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Sampling parameters for one completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl CompletionOptions {
    /// Short, near-deterministic reply ("3, 7").
    pub const SELECTION: Self = Self {
        temperature: 0.3,
        max_tokens: 50,
    };

    /// Three or four sentences of prose.
    pub const TASTING_NOTE: Self = Self {
        temperature: 0.7,
        max_tokens: 250,
    };

    pub const PAIRING: Self = Self {
        temperature: 0.5,
        max_tokens: 100,
    };

    pub const MENU_PAIRING: Self = Self {
        temperature: 0.5,
        max_tokens: 150,
    };
}
