//! Nur library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod api;
pub mod core;
pub mod inference;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which AI engine answers insight and isnad requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Hosted Gemini API with schema-constrained output.
    #[default]
    Gemini,
    /// Locally hosted Ollama server, best-effort JSON.
    Ollama,
}

impl Engine {
    pub fn next(self) -> Engine {
        match self {
            Engine::Gemini => Engine::Ollama,
            Engine::Ollama => Engine::Gemini,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Engine::Gemini => "Gemini",
            Engine::Ollama => "Local",
        }
    }
}
