use std::fmt;

use async_trait::async_trait;

use super::types::{AiInsight, InsightRequest, IsnadAnalysis};

/// Errors that can occur while asking an engine for an answer.
#[derive(Debug)]
pub enum EngineError {
    /// Engine misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (DNS, connection refused, local server down).
    Network(String),
    /// The service returned an error response.
    Api { status: u16, message: String },
    /// The answer wasn't the JSON shape we asked for.
    Parse(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Config(msg) => write!(f, "config error: {msg}"),
            EngineError::Network(msg) => write!(f, "network error: {msg}"),
            EngineError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            EngineError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// An AI backend that can explain a text and study a narrator chain.
#[async_trait]
pub trait InsightEngine: Send + Sync {
    /// Returns the name of the engine.
    fn name(&self) -> &str;

    /// Translates `request.text` into `request.language` with commentary and
    /// key themes.
    async fn generate_insight(&self, request: &InsightRequest) -> Result<AiInsight, EngineError>;

    /// Grades the narrator chain `chain` of the narration `text`.
    async fn analyze_chain(&self, chain: &str, text: &str) -> Result<IsnadAnalysis, EngineError>;
}
