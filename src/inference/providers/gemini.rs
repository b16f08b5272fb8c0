//! Gemini engine using the `generateContent` endpoint with structured output.
//!
//! The response schema travels in `generationConfig.responseJsonSchema`, so the
//! service itself enforces the shape. The answer arrives as JSON text inside
//! `candidates[0].content.parts`.

use async_trait::async_trait;
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::inference::prompts::{insight_prompt, isnad_prompt};
use crate::inference::types::response_schema;
use crate::inference::{AiInsight, EngineError, InsightEngine, InsightRequest, IsnadAnalysis};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_INSIGHT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ISNAD_MODEL: &str = "gemini-3-pro-preview";

// ============================================================================
// generateContent API Types
// ============================================================================

#[derive(Serialize, Debug)]
struct Part {
    text: String,
}

#[derive(Serialize, Debug)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_json_schema: serde_json::Value,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Builds a single-turn request whose output must match `T`'s schema.
fn build_request<T: JsonSchema>(prompt: String) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part { text: prompt }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_json_schema: response_schema::<T>(),
        },
    }
}

/// Concatenates the text parts of the first candidate.
fn response_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().map(|p| p.text).collect();
    let text = text.trim().to_string();
    (!text.is_empty()).then_some(text)
}

// ============================================================================
// Engine Implementation
// ============================================================================

/// Hosted Gemini engine.
pub struct GeminiEngine {
    api_key: Option<String>,
    base_url: String,
    insight_model: String,
    isnad_model: String,
    client: reqwest::Client,
}

impl GeminiEngine {
    /// Creates a new Gemini engine.
    ///
    /// A missing API key is reported per request as `EngineError::Config`, so
    /// the app can still start and switch to the local engine.
    pub fn new(
        api_key: Option<String>,
        base_url: Option<String>,
        insight_model: Option<String>,
        isnad_model: Option<String>,
    ) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            insight_model: insight_model.unwrap_or_else(|| DEFAULT_INSIGHT_MODEL.to_string()),
            isnad_model: isnad_model.unwrap_or_else(|| DEFAULT_ISNAD_MODEL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    /// Sends a schema-constrained request and parses the answer as `T`.
    async fn generate<T: JsonSchema + DeserializeOwned>(
        &self,
        model: &str,
        prompt: String,
    ) -> Result<T, EngineError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            EngineError::Config("Gemini API key not set (GEMINI_API_KEY or config file)".to_string())
        })?;

        let request = build_request::<T>(prompt);
        info!("Gemini generateContent request: model={model}");

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, model))
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::Network(e.to_string()))?;

        debug!("Gemini response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Gemini API error: {} - {}", status, err_body);
            return Err(EngineError::Api {
                status,
                message: err_body,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Parse(e.to_string()))?;
        let text = response_text(body)
            .ok_or_else(|| EngineError::Parse("response had no text candidate".to_string()))?;
        debug!("Gemini answer: {} bytes", text.len());

        serde_json::from_str(&text).map_err(|e| EngineError::Parse(e.to_string()))
    }
}

#[async_trait]
impl InsightEngine for GeminiEngine {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_insight(&self, request: &InsightRequest) -> Result<AiInsight, EngineError> {
        self.generate(&self.insight_model, insight_prompt(request)).await
    }

    async fn analyze_chain(&self, chain: &str, text: &str) -> Result<IsnadAnalysis, EngineError> {
        self.generate(&self.isnad_model, isnad_prompt(chain, text)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_schema_config() {
        let request = build_request::<AiInsight>("hello".to_string());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(
            json["generationConfig"]["responseJsonSchema"]["properties"]
                .get("keyThemes")
                .is_some()
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response_text(response).as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_response_text_empty_candidates() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(response_text(response).is_none());
    }

    #[tokio::test]
    async fn test_missing_api_key_is_config_error() {
        let engine = GeminiEngine::new(None, Some("http://127.0.0.1:9".to_string()), None, None);
        let result = engine.analyze_chain("chain", "text").await;
        assert!(matches!(result, Err(EngineError::Config(_))));
    }
}
