//! Local Ollama engine using `/api/generate`.
//!
//! Ollama's `format: "json"` only promises syntactically valid JSON, not our
//! shape. The expected layout is spelled out in the prompt and the answer is
//! parsed best-effort: as-is first, then the outermost `{...}` slice.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::inference::prompts::{local_insight_prompt, local_isnad_prompt};
use crate::inference::{AiInsight, EngineError, InsightEngine, InsightRequest, IsnadAnalysis};

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";

#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    format: &'static str,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Parses a model answer that should be JSON but may be wrapped in prose or
/// code fences.
pub fn parse_lenient<T: DeserializeOwned>(raw: &str) -> Result<T, EngineError> {
    let trimmed = raw.trim();
    let direct_err = match serde_json::from_str::<T>(trimmed) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) else {
        return Err(EngineError::Parse(direct_err.to_string()));
    };
    if end <= start {
        return Err(EngineError::Parse(direct_err.to_string()));
    }

    debug!("Retrying parse on embedded object ({} bytes)", end + 1 - start);
    serde_json::from_str::<T>(&trimmed[start..=end]).map_err(|e| EngineError::Parse(e.to_string()))
}

/// Ollama engine (local inference server, no auth)
pub struct OllamaEngine {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaEngine {
    pub fn new(base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    async fn generate<T: DeserializeOwned>(&self, prompt: String) -> Result<T, EngineError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: "json",
        };

        info!("Ollama generate request: model={}", self.model);

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::Network(e.to_string()))?;

        debug!("Ollama response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Ollama API error: {} - {}", status, err_body);
            return Err(EngineError::Api {
                status,
                message: err_body,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Parse(e.to_string()))?;
        debug!("Ollama answer: {} bytes", body.response.len());

        parse_lenient(&body.response)
    }
}

#[async_trait]
impl InsightEngine for OllamaEngine {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate_insight(&self, request: &InsightRequest) -> Result<AiInsight, EngineError> {
        self.generate(local_insight_prompt(request)).await
    }

    async fn analyze_chain(&self, chain: &str, text: &str) -> Result<IsnadAnalysis, EngineError> {
        self.generate(local_isnad_prompt(chain, text)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_plain_json() {
        let raw = r#"{"translation":"t","explanation":"e","keyThemes":[]}"#;
        let insight: AiInsight = parse_lenient(raw).unwrap();
        assert_eq!(insight.translation, "t");
    }

    #[test]
    fn test_parse_lenient_strips_code_fence_and_prose() {
        let raw = "Sure! Here it is:\n```json\n{\"translation\":\"t\",\"explanation\":\"e\",\"themes\":[\"patience\"]}\n```";
        let insight: AiInsight = parse_lenient(raw).unwrap();
        assert_eq!(insight.key_themes, vec!["patience".to_string()]);
    }

    #[test]
    fn test_parse_lenient_rejects_wrong_shape() {
        let result: Result<IsnadAnalysis, _> = parse_lenient(r#"{"verdict":"sound"}"#);
        assert!(matches!(result, Err(EngineError::Parse(_))));
    }

    #[test]
    fn test_parse_lenient_rejects_non_json() {
        let result: Result<AiInsight, _> = parse_lenient("I cannot help with that.");
        assert!(matches!(result, Err(EngineError::Parse(_))));
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerateRequest {
            model: "llama3",
            prompt: "p".to_string(),
            stream: false,
            format: "json",
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"model":"llama3","prompt":"p","stream":false,"format":"json"}"#
        );
    }
}
