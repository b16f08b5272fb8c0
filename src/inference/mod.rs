pub mod prompts;
pub mod provider;
pub mod providers;
pub mod types;

use std::sync::Arc;

use crate::Engine;
use crate::core::config::ResolvedConfig;

pub use provider::{EngineError, InsightEngine};
pub use providers::{GeminiEngine, OllamaEngine};
pub use types::{AiInsight, InsightRequest, IsnadAnalysis, NarratorRecord};

/// Builds the engine selected by `engine` from resolved settings.
pub fn build_engine(engine: Engine, config: &ResolvedConfig) -> Arc<dyn InsightEngine> {
    match engine {
        Engine::Gemini => Arc::new(GeminiEngine::new(
            config.gemini_api_key.clone(),
            Some(config.gemini_base_url.clone()),
            Some(config.gemini_insight_model.clone()),
            Some(config.gemini_isnad_model.clone()),
        )),
        Engine::Ollama => Arc::new(OllamaEngine::new(
            Some(config.ollama_base_url.clone()),
            Some(config.ollama_model.clone()),
        )),
    }
}
